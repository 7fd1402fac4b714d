//! 渲染器
//!
//! 每次渲染都是整屏替换：先清屏，再根据视图状态和收藏集合重新画出全部内容。
//! 界面上不保存任何状态，编号到题目的映射也在每次渲染时重建。

use crate::models::{Answer, CardSummary, QuestionId, QuestionRecord, ViewState};
use crate::render::palette::{Palette, Role};
use crate::services::{EmptyReason, FavoriteSet};
use crate::utils::terminal_text;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};

const RULE_WIDTH: usize = 60;
const INDENT: &str = "     ";

pub const FAVORITE_ON: &str = "★";
pub const FAVORITE_OFF: &str = "☆";
pub const AUDIO_ICON: &str = "🔊";

/// 内容区
#[derive(Debug, Clone)]
pub enum Content<'a> {
    Loading,
    /// 加载失败的原因
    Failed(&'a str),
    Empty(EmptyReason),
    Records(Vec<&'a QuestionRecord>),
}

/// 一帧画面需要的全部输入
#[derive(Debug, Clone)]
pub struct Frame<'a> {
    pub cards: &'a [CardSummary],
    pub parts: Vec<&'a str>,
    pub view: &'a ViewState,
    pub favorites: &'a FavoriteSet,
    pub content: Content<'a>,
}

/// 终端渲染器
pub struct Renderer<W: Write> {
    out: W,
    color: bool,
    palette: Palette,
    /// 当前屏幕上第 n 张卡片（从 1 开始）对应的题目
    displayed: Vec<QuestionId>,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, color: bool) -> Self {
        Self {
            out,
            color,
            palette: Palette::for_theme(Default::default(), color),
            displayed: Vec::new(),
        }
    }

    /// 屏幕上编号为 `number`（从 1 开始）的题目
    pub fn displayed(&self, number: usize) -> Option<&QuestionId> {
        number.checked_sub(1).and_then(|i| self.displayed.get(i))
    }

    pub fn displayed_count(&self) -> usize {
        self.displayed.len()
    }

    pub fn get_ref(&self) -> &W {
        &self.out
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// 整屏渲染
    pub fn render(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        self.palette = Palette::for_theme(frame.view.theme, self.color);
        self.displayed.clear();

        let p = self.palette;
        if p.is_plain() {
            writeln!(self.out, "{}", "=".repeat(RULE_WIDTH))?;
        } else {
            queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        self.render_header(frame)?;
        writeln!(self.out, "{}", p.paint(Role::Muted, "─".repeat(RULE_WIDTH)))?;

        match &frame.content {
            Content::Loading => {
                writeln!(self.out, "{}", p.paint(Role::Muted, "Yuklanmoqda..."))?;
            }
            Content::Failed(reason) => {
                writeln!(self.out, "{}", p.paint(Role::Error, "Xatolik: Ma'lumotni yuklab bo'lmadi."))?;
                writeln!(self.out, "{}", p.paint(Role::Muted, terminal_text(reason)))?;
            }
            Content::Empty(reason) => {
                let message = empty_message(*reason, frame.view);
                writeln!(self.out, "{}", p.paint(Role::Muted, terminal_text(&message)))?;
            }
            Content::Records(records) => {
                let favorites = records.iter().filter(|r| frame.favorites.contains(&r.id)).count();
                let progress = format!("{} ta savol · {} ta sevimli", records.len(), favorites);
                writeln!(self.out, "{}", p.paint(Role::Muted, progress))?;
                for (i, record) in records.iter().enumerate() {
                    let is_favorite = frame.favorites.contains(&record.id);
                    self.render_record(i + 1, record, is_favorite)?;
                    self.displayed.push(record.id.clone());
                }
            }
        }

        self.out.flush()
    }

    /// 只更新一张卡片的收藏标记，不重画整屏
    pub fn render_favorite(&mut self, number: usize, is_favorite: bool) -> io::Result<()> {
        let marker = format!("#{} {}", number, favorite_marker(is_favorite));
        writeln!(self.out, "{}", self.palette.paint(Role::Favorite, marker))?;
        self.out.flush()
    }

    /// 不替换内容区的一行提示
    pub fn notice(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.out, "{}", self.palette.paint(Role::Muted, terminal_text(message)))?;
        self.out.flush()
    }

    fn render_header(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let p = self.palette;
        let view = frame.view;
        writeln!(
            self.out,
            "{}  {} [{}]",
            p.paint(Role::Title, "Imtihon kartochkalari"),
            view.theme.toggle_icon(),
            view.theme
        )?;

        let cards: Vec<String> = frame
            .cards
            .iter()
            .enumerate()
            .map(|(i, card)| {
                let label = format!("{}. {}", i + 1, card);
                highlight(&p, &label, card.card_id == view.selected_card)
            })
            .collect();
        writeln!(self.out, "Cards: {}", cards.join("  "))?;

        let parts: Vec<String> = frame
            .parts
            .iter()
            .map(|part| highlight(&p, part, *part == view.selected_part))
            .collect();
        writeln!(self.out, "Parts: {}", parts.join("  "))?;

        if let Some(query) = view.active_query() {
            writeln!(self.out, "Qidiruv: \"{}\"", terminal_text(query))?;
        }
        Ok(())
    }

    fn render_record(&mut self, number: usize, record: &QuestionRecord, is_favorite: bool) -> io::Result<()> {
        let p = self.palette;
        writeln!(
            self.out,
            "{} {} {}",
            p.paint(Role::Title, format!("#{}", number)),
            p.paint(Role::Favorite, favorite_marker(is_favorite)),
            AUDIO_ICON
        )?;

        let question = record.question_text.as_deref().unwrap_or("(savol yo'q)");
        self.write_block("Q", question)?;
        if let Some(translation) = &record.question_translation {
            self.write_translation(translation)?;
        }

        match &record.answer {
            Answer::Simple { text, translation } => {
                self.write_block("A", text.as_deref().unwrap_or("No answer"))?;
                if let Some(translation) = translation {
                    self.write_translation(translation)?;
                }
            }
            Answer::Structured(blocks) => {
                for block in blocks {
                    self.write_block(block.label(), &block.text)?;
                    if let Some(translation) = &block.translation {
                        self.write_translation(translation)?;
                    }
                }
            }
        }
        writeln!(self.out)
    }

    /// 带标签的多行文本，续行缩进对齐
    fn write_block(&mut self, label: &str, text: &str) -> io::Result<()> {
        let p = self.palette;
        let cleaned = terminal_text(text);
        let mut lines = cleaned.split('\n');
        writeln!(
            self.out,
            "  {} {}",
            p.paint(Role::Label, format!("{}:", label)),
            lines.next().unwrap_or_default()
        )?;
        for line in lines {
            writeln!(self.out, "{}{}", INDENT, line)?;
        }
        Ok(())
    }

    fn write_translation(&mut self, text: &str) -> io::Result<()> {
        let p = self.palette;
        let cleaned = terminal_text(text);
        let lines: Vec<&str> = cleaned.split('\n').collect();
        let last = lines.len() - 1;
        for (i, line) in lines.iter().enumerate() {
            let open = if i == 0 { "(" } else { "" };
            let close = if i == last { ")" } else { "" };
            let styled = p.paint(Role::Translation, format!("{}{}{}", open, line, close));
            writeln!(self.out, "{}{}", INDENT, styled)?;
        }
        Ok(())
    }
}

fn favorite_marker(is_favorite: bool) -> &'static str {
    if is_favorite {
        FAVORITE_ON
    } else {
        FAVORITE_OFF
    }
}

/// 当前选中的控件用方括号和高亮标出
fn highlight(p: &Palette, label: &str, active: bool) -> String {
    let label = terminal_text(label);
    if active {
        p.paint(Role::Active, format!("[{}]", label))
    } else {
        label.into_owned()
    }
}

fn empty_message(reason: EmptyReason, view: &ViewState) -> String {
    match reason {
        EmptyReason::NoData => format!(
            "{} uchun {} ma'lumotlari topilmadi.",
            view.selected_card, view.selected_part
        ),
        EmptyReason::NoMatches => format!(
            "\"{}\" bo'yicha hech narsa topilmadi.",
            view.search_query.trim()
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::parse_records;
    use crate::services::RecordStore;

    fn store() -> RecordStore {
        RecordStore::from_records(
            parse_records(
                "exam.json",
                br#"[
                {"Mavzular": "Card A", "Mavzular nomi": "Biology", "Qism": "Part 1",
                 "Sovollar": "Explain Photosynthesis", "Sovollar (UZ)": "Fotosintez",
                 "Jovoblar (EN)": "Light\\nto sugar", "Jovoblar (UZ)": "Yorug'lik"},
                {"Mavzular": "Card A", "Qism": "Part 1", "Sovollar": "Why?",
                 "Answer (EN)": "Because", "Example (EN)": "Leaf\r\nRoot"}
            ]"#,
            )
            .unwrap(),
        )
    }

    fn render(frame: &Frame<'_>) -> (String, Renderer<Vec<u8>>) {
        let mut renderer = Renderer::new(Vec::new(), false);
        renderer.render(frame).unwrap();
        let text = String::from_utf8(renderer.get_ref().clone()).unwrap();
        (text, renderer)
    }

    #[test]
    fn test_records_render_with_line_breaks_and_blocks() {
        let store = store();
        let view = ViewState::default();
        let mut favorites = FavoriteSet::default();
        favorites.toggle(&store.records()[1].id);

        let frame = Frame {
            cards: store.cards(),
            parts: store.parts(),
            view: &view,
            favorites: &favorites,
            content: Content::Records(store.records().iter().collect()),
        };
        let (text, renderer) = render(&frame);

        assert!(text.contains("Cards: [1. Card A · Biology]"));
        assert!(text.contains("Parts: [Part 1]"));
        assert!(text.contains("2 ta savol · 1 ta sevimli"));
        assert!(text.contains("#1 ☆ 🔊"));
        assert!(text.contains("#2 ★ 🔊"));
        assert!(text.contains("  A: Light\n     to sugar\n"));
        assert!(text.contains("     (Yorug'lik)"));
        assert!(text.contains("  Answer: Because\n"));
        assert!(text.contains("  Example: Leaf\n     Root\n"));
        assert!(!text.contains("\\n"));
        assert!(!text.contains('\x1b'));

        assert_eq!(renderer.displayed_count(), 2);
        assert_eq!(renderer.displayed(2), Some(&store.records()[1].id));
        assert_eq!(renderer.displayed(0), None);
        assert_eq!(renderer.displayed(3), None);
    }

    #[test]
    fn test_empty_placeholders() {
        let store = RecordStore::empty();
        let favorites = FavoriteSet::default();

        let view = ViewState::default();
        let frame = Frame {
            cards: store.cards(),
            parts: store.parts(),
            view: &view,
            favorites: &favorites,
            content: Content::Empty(EmptyReason::NoData),
        };
        let (text, renderer) = render(&frame);
        assert!(text.contains("Card A uchun Part 1 ma'lumotlari topilmadi."));
        assert!(text.contains("Parts: [Part 1]  Part 2  Part 3"));
        assert_eq!(renderer.displayed_count(), 0);

        let searching = ViewState {
            search_query: "cell".to_string(),
            ..ViewState::default()
        };
        let frame = Frame {
            view: &searching,
            content: Content::Empty(EmptyReason::NoMatches),
            ..frame
        };
        let (text, _) = render(&frame);
        assert!(text.contains("Qidiruv: \"cell\""));
        assert!(text.contains("\"cell\" bo'yicha hech narsa topilmadi."));
    }

    #[test]
    fn test_error_and_loading_states() {
        let view = ViewState::default();
        let favorites = FavoriteSet::default();
        let frame = Frame {
            cards: &[],
            parts: vec!["Part 1"],
            view: &view,
            favorites: &favorites,
            content: Content::Failed("no such file"),
        };
        let (text, _) = render(&frame);
        assert!(text.contains("Xatolik: Ma'lumotni yuklab bo'lmadi."));
        assert!(text.contains("no such file"));

        let frame = Frame {
            content: Content::Loading,
            ..frame
        };
        let (text, _) = render(&frame);
        assert!(text.contains("Yuklanmoqda..."));
    }

    #[test]
    fn test_favorite_update_is_single_line() {
        let mut renderer = Renderer::new(Vec::new(), false);
        renderer.render_favorite(3, true).unwrap();
        assert_eq!(String::from_utf8(renderer.into_inner()).unwrap(), "#3 ★\n");
    }

    #[test]
    fn test_color_output_clears_screen() {
        let view = ViewState::default();
        let favorites = FavoriteSet::default();
        let frame = Frame {
            cards: &[],
            parts: vec!["Part 1"],
            view: &view,
            favorites: &favorites,
            content: Content::Loading,
        };
        let mut renderer = Renderer::new(Vec::new(), true);
        renderer.render(&frame).unwrap();
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.starts_with("\x1b[2J\x1b[1;1H"));
        assert!(text.contains("Yuklanmoqda..."));
        assert!(text.contains("\x1b[0m"));
    }

    #[test]
    fn test_control_characters_in_data_are_not_written() {
        let store = RecordStore::from_records(
            parse_records(
                "exam.json",
                br#"[{"Mavzular": "Card A", "Qism": "Part 1",
                      "Sovollar": "Leaf\u001b[2J\u0007", "Jovoblar (EN)": "Root\u001b]0;x\u0007\r\nStem",
                      "Jovoblar (UZ)": "Ildiz\u009b"}]"#,
            )
            .unwrap(),
        );
        let view = ViewState::default();
        let favorites = FavoriteSet::default();
        let frame = Frame {
            cards: store.cards(),
            parts: store.parts(),
            view: &view,
            favorites: &favorites,
            content: Content::Records(store.records().iter().collect()),
        };
        let (text, _) = render(&frame);

        assert!(!text.chars().any(|c| c != '\n' && c.is_control()));
        assert!(text.contains("  Q: Leaf[2J\n"));
        assert!(text.contains("  A: Root]0;x\n     Stem\n"));
        assert!(text.contains("     (Ildiz)"));
    }
}
