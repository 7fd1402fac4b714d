use crate::models::QuestionId;
use std::collections::BTreeSet;

/// 收藏集合
///
/// 持久化格式是标识字符串组成的 JSON 数组，顺序无意义。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<QuestionId>,
}

impl FavoriteSet {
    /// 解析持久化的值；无法解析时返回 None
    pub fn from_json(json: &str) -> Option<Self> {
        let ids: Vec<QuestionId> = serde_json::from_str(json).ok()?;
        Some(Self {
            ids: ids.into_iter().collect(),
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.ids).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn contains(&self, id: &QuestionId) -> bool {
        self.ids.contains(id)
    }

    /// 切换收藏状态，返回切换后是否已收藏
    pub fn toggle(&mut self, id: &QuestionId) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.clone());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &QuestionId> {
        self.ids.iter()
    }
}
