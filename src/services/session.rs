//! 会话状态 - 业务能力层
//!
//! 视图状态和收藏集合集中在一个显式的状态对象里。持久化只发生在两处：
//! 启动时 [`Session::restore`] 读一次，之后每次修改立即写回。
//!
//! 搜索词不持久化，重启后总是从空搜索开始。

use crate::infrastructure::LocalStore;
use crate::models::view::{DEFAULT_CARD, DEFAULT_PART};
use crate::models::{QuestionId, Theme, ViewState};
use crate::services::favorites::FavoriteSet;
use tracing::{debug, warn};

pub const FAVORITES_KEY: &str = "favorites";
pub const CARD_KEY: &str = "currentCard";
pub const PART_KEY: &str = "currentPart";
pub const THEME_KEY: &str = "theme";

/// 会话状态
#[derive(Debug)]
pub struct Session {
    store: LocalStore,
    view: ViewState,
    favorites: FavoriteSet,
}

impl Session {
    /// 从本地存储恢复；每个键独立读取，缺失或无法解析时用默认值
    pub fn restore(store: LocalStore) -> Self {
        let selected_card = store
            .get(CARD_KEY)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_CARD)
            .to_string();
        let selected_part = store
            .get(PART_KEY)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_PART)
            .to_string();
        let theme = store.get(THEME_KEY).and_then(Theme::parse).unwrap_or_default();
        let favorites = store
            .get(FAVORITES_KEY)
            .and_then(FavoriteSet::from_json)
            .unwrap_or_default();

        debug!(
            "恢复会话: {} / {} / {} / 收藏 {}",
            selected_card,
            selected_part,
            theme,
            favorites.len()
        );

        Self {
            store,
            view: ViewState {
                selected_card,
                selected_part,
                search_query: String::new(),
                theme,
            },
            favorites,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn favorites(&self) -> &FavoriteSet {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &QuestionId) -> bool {
        self.favorites.contains(id)
    }

    pub fn select_card(&mut self, card_id: impl Into<String>) {
        self.view.selected_card = card_id.into();
        let value = self.view.selected_card.clone();
        self.persist(CARD_KEY, value);
    }

    pub fn select_part(&mut self, part: impl Into<String>) {
        self.view.selected_part = part.into();
        let value = self.view.selected_part.clone();
        self.persist(PART_KEY, value);
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.view.search_query = query.into();
    }

    /// 切换主题并返回新主题
    pub fn toggle_theme(&mut self) -> Theme {
        self.view.theme = self.view.theme.toggled();
        self.persist(THEME_KEY, self.view.theme.as_str().to_string());
        self.view.theme
    }

    /// 切换收藏并写回完整集合，返回切换后是否已收藏
    pub fn toggle_favorite(&mut self, id: &QuestionId) -> bool {
        let now_favorite = self.favorites.toggle(id);
        let json = self.favorites.to_json();
        self.persist(FAVORITES_KEY, json);
        now_favorite
    }

    /// 写入失败时只记日志，状态留在内存里继续用
    fn persist(&mut self, key: &str, value: String) {
        if let Err(e) = self.store.set(key, value) {
            warn!("⚠️ 保存 {} 失败，本次会话仅保留在内存中: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_on_first_run() {
        let session = Session::restore(LocalStore::in_memory());
        assert_eq!(session.view(), &ViewState::default());
        assert!(session.favorites().is_empty());
    }

    #[test]
    fn test_unparsable_values_fall_back_independently() {
        let mut store = LocalStore::in_memory();
        store.set(THEME_KEY, "sepia").unwrap();
        store.set(FAVORITES_KEY, "not json").unwrap();
        store.set(CARD_KEY, "Card C").unwrap();

        let session = Session::restore(store);
        assert_eq!(session.view().theme, Theme::Light);
        assert!(session.favorites().is_empty());
        assert_eq!(session.view().selected_card, "Card C");
        assert_eq!(session.view().selected_part, DEFAULT_PART);
    }

    #[test]
    fn test_changes_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        let id = QuestionId::new("Card B", "Part 2", 0);

        let mut session = Session::restore(LocalStore::open(&path));
        session.select_card("Card B");
        session.select_part("Part 2");
        session.set_search("cell");
        assert_eq!(session.toggle_theme(), Theme::Dark);
        assert!(session.toggle_favorite(&id));
        drop(session);

        let session = Session::restore(LocalStore::open(&path));
        assert_eq!(session.view().selected_card, "Card B");
        assert_eq!(session.view().selected_part, "Part 2");
        assert_eq!(session.view().theme, Theme::Dark);
        assert_eq!(session.view().search_query, "");
        assert!(session.is_favorite(&id));
    }
}
