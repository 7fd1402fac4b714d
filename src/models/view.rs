use std::fmt;

/// 默认卡片
pub const DEFAULT_CARD: &str = "Card A";
/// 默认考试部分
pub const DEFAULT_PART: &str = "Part 1";

/// 界面主题
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// 解析持久化的值，未知值返回 None
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// 主题切换按钮上显示的图标（显示的是切换后的主题）
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 当前视图状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub selected_card: String,
    pub selected_part: String,
    pub search_query: String,
    pub theme: Theme,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            selected_card: DEFAULT_CARD.to_string(),
            selected_part: DEFAULT_PART.to_string(),
            search_query: String::new(),
            theme: Theme::default(),
        }
    }
}

impl ViewState {
    /// 去掉首尾空白后的搜索词，空串表示未搜索
    pub fn active_query(&self) -> Option<&str> {
        let q = self.search_query.trim();
        (!q.is_empty()).then_some(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_roundtrip_and_toggle() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn test_active_query_ignores_whitespace() {
        let mut view = ViewState::default();
        assert_eq!(view.active_query(), None);
        view.search_query = "   ".to_string();
        assert_eq!(view.active_query(), None);
        view.search_query = " cell ".to_string();
        assert_eq!(view.active_query(), Some("cell"));
    }
}
