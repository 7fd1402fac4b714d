use crate::models::Theme;
use crossterm::style::{Color, ContentStyle, Stylize};
use std::fmt::Display;

/// 界面上的文字角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Title,
    /// 当前选中的卡片 / 部分
    Active,
    Muted,
    Translation,
    Label,
    Favorite,
    Error,
}

/// 终端配色
///
/// 关闭颜色时 `paint` 原样返回文本，输出纯文本。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    styles: Option<Styles>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Styles {
    title: ContentStyle,
    active: ContentStyle,
    muted: ContentStyle,
    translation: ContentStyle,
    label: ContentStyle,
    favorite: ContentStyle,
    error: ContentStyle,
}

impl Styles {
    fn light() -> Self {
        Self {
            title: ContentStyle::new().with(Color::DarkBlue).bold(),
            active: ContentStyle::new().with(Color::DarkBlue).bold().reverse(),
            muted: ContentStyle::new().with(Color::DarkGrey),
            translation: ContentStyle::new().with(Color::DarkGreen).italic(),
            label: ContentStyle::new().with(Color::DarkMagenta).bold(),
            favorite: ContentStyle::new().with(Color::DarkYellow),
            error: ContentStyle::new().with(Color::DarkRed).bold(),
        }
    }

    fn dark() -> Self {
        Self {
            title: ContentStyle::new().with(Color::Cyan).bold(),
            active: ContentStyle::new().with(Color::Cyan).bold().reverse(),
            muted: ContentStyle::new().with(Color::Grey),
            translation: ContentStyle::new().with(Color::Green).italic(),
            label: ContentStyle::new().with(Color::Magenta).bold(),
            favorite: ContentStyle::new().with(Color::Yellow),
            error: ContentStyle::new().with(Color::Red).bold(),
        }
    }

    fn get(&self, role: Role) -> ContentStyle {
        match role {
            Role::Title => self.title,
            Role::Active => self.active,
            Role::Muted => self.muted,
            Role::Translation => self.translation,
            Role::Label => self.label,
            Role::Favorite => self.favorite,
            Role::Error => self.error,
        }
    }
}

impl Palette {
    pub const PLAIN: Palette = Palette { styles: None };

    pub fn for_theme(theme: Theme, color: bool) -> Self {
        let styles = match (color, theme) {
            (false, _) => None,
            (true, Theme::Light) => Some(Styles::light()),
            (true, Theme::Dark) => Some(Styles::dark()),
        };
        Self { styles }
    }

    pub fn is_plain(&self) -> bool {
        self.styles.is_none()
    }

    /// 按角色上色；纯文本模式下原样返回
    pub fn paint(&self, role: Role, text: impl Display) -> String {
        match &self.styles {
            Some(styles) => styles.get(role).apply(text).to_string(),
            None => text.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_is_plain_for_every_theme() {
        assert!(Palette::for_theme(Theme::Light, false).is_plain());
        assert!(Palette::for_theme(Theme::Dark, false).is_plain());
        assert_ne!(
            Palette::for_theme(Theme::Light, true),
            Palette::for_theme(Theme::Dark, true)
        );
    }

    #[test]
    fn test_paint_styles_only_in_color_mode() {
        assert_eq!(Palette::PLAIN.paint(Role::Title, "Card A"), "Card A");

        let painted = Palette::for_theme(Theme::Dark, true).paint(Role::Error, "Xatolik");
        assert!(painted.contains("Xatolik"));
        assert!(painted.starts_with('\x1b'));
        assert_ne!(painted, "Xatolik");
    }
}
