//! 题库 - 业务能力层
//!
//! 启动时加载一次，之后只读。

use crate::error::AppResult;
use crate::infrastructure::{FetchSource, OfflineCache};
use crate::models::{parse_records, CardSummary, QuestionRecord};
use std::collections::HashSet;
use tracing::{error, info};

/// 没有数据时导航栏显示的考试部分
pub const FALLBACK_PARTS: [&str; 3] = ["Part 1", "Part 2", "Part 3"];

/// 题库加载状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Loaded,
    /// 加载或解析失败，附带原因
    Failed(String),
}

/// 题库
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<QuestionRecord>,
    cards: Vec<CardSummary>,
    parts: Vec<String>,
}

impl RecordStore {
    /// 空题库（加载完成前、加载失败后使用）
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<QuestionRecord>) -> Self {
        let cards = summarize_cards(&records);
        let parts = distinct_parts(&records);
        Self {
            records,
            cards,
            parts,
        }
    }

    /// 通过离线缓存加载数据源
    pub async fn load(cache: &OfflineCache) -> AppResult<Self> {
        let key = cache.client().data_source_key();
        let result = async {
            let (bytes, source) = if key.is_empty() {
                let client = cache.client();
                (client.fetch(client.data_source()).await?, FetchSource::Network)
            } else {
                cache.fetch(&key).await?
            };
            let records = parse_records(&key, &bytes)?;
            AppResult::Ok((records, source))
        }
        .await;

        match result {
            Ok((records, source)) => {
                info!("📚 数据来自{:?}: {} 道题目", source, records.len());
                Ok(Self::from_records(records))
            }
            Err(e) => {
                error!("❌ 题库加载失败: {}", e);
                Err(e)
            }
        }
    }

    pub fn records(&self) -> &[QuestionRecord] {
        &self.records
    }

    pub fn cards(&self) -> &[CardSummary] {
        &self.cards
    }

    /// 导航栏上的考试部分；题库为空时给出默认的三个部分
    pub fn parts(&self) -> Vec<&str> {
        if self.parts.is_empty() {
            FALLBACK_PARTS.to_vec()
        } else {
            self.parts.iter().map(String::as_str).collect()
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// 每个 card_id 第一次出现时的摘要，保持首次出现顺序；没有 card_id 的记录不参与
fn summarize_cards(records: &[QuestionRecord]) -> Vec<CardSummary> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| !r.card_id.is_empty())
        .filter(|r| seen.insert(r.card_id.as_str()))
        .map(|r| CardSummary {
            card_id: r.card_id.clone(),
            card_topic: r.card_topic.clone(),
        })
        .collect()
}

fn distinct_parts(records: &[QuestionRecord]) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| !r.part.is_empty())
        .filter(|r| seen.insert(r.part.as_str()))
        .map(|r| r.part.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(json: &str) -> RecordStore {
        RecordStore::from_records(parse_records("exam.json", json.as_bytes()).unwrap())
    }

    #[test]
    fn test_card_summaries_first_seen_order() {
        let store = store(
            r#"[
            {"Mavzular": "Card B", "Mavzular nomi": "Chemistry", "Qism": "Part 2"},
            {"Mavzular": "Card A", "Mavzular nomi": "Biology", "Qism": "Part 1"},
            {"Mavzular": "Card B", "Mavzular nomi": "Renamed", "Qism": "Part 1"},
            {"Qism": "Part 3"}
        ]"#,
        );

        let cards: Vec<_> = store.cards().iter().map(|c| c.to_string()).collect();
        assert_eq!(cards, vec!["Card B · Chemistry", "Card A · Biology"]);
        assert_eq!(store.parts(), vec!["Part 2", "Part 1", "Part 3"]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_empty_store_has_fallback_parts() {
        let store = RecordStore::empty();
        assert!(store.is_empty());
        assert!(store.cards().is_empty());
        assert_eq!(store.parts(), FALLBACK_PARTS.to_vec());
    }
}
