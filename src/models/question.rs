use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::field::BlockKind;

/// 题目的稳定标识，也是收藏集合里存的字符串
///
/// 格式为 `"{card}-{part}-{ordinal}"`，`ordinal` 是题目在所属 (card, part)
/// 分组中按加载顺序的位置。它在加载时确定，不会因为搜索过滤而改变。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    pub fn new(card_id: &str, part: &str, ordinal: usize) -> Self {
        Self(format!("{}-{}-{}", card_id, part, ordinal))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for QuestionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 结构化答案中的一块
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerBlock {
    pub kind: BlockKind,
    pub text: String,
    pub translation: Option<String>,
}

impl AnswerBlock {
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

/// 答案：简单的中英对照，或按块组织的结构化答案
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Simple {
        text: Option<String>,
        translation: Option<String>,
    },
    /// 只包含有文本的块，按 Answer / Reason / Example / Extra Info 顺序
    Structured(Vec<AnswerBlock>),
}

impl Answer {
    /// 朗读用的答案正文
    ///
    /// 结构化答案取 Answer 块（没有时取第一块），简单答案取英文答案。
    pub fn spoken_text(&self) -> Option<&str> {
        match self {
            Answer::Simple { text, .. } => text.as_deref(),
            Answer::Structured(blocks) => blocks
                .iter()
                .find(|b| b.kind == BlockKind::Answer)
                .or_else(|| blocks.first())
                .map(|b| b.text.as_str()),
        }
    }

    /// 所有可搜索的答案文本（正文和翻译）
    pub fn searchable_texts(&self) -> Vec<&str> {
        match self {
            Answer::Simple { text, translation } => {
                [text, translation].into_iter().flatten().map(String::as_str).collect()
            }
            Answer::Structured(blocks) => blocks
                .iter()
                .flat_map(|b| std::iter::once(b.text.as_str()).chain(b.translation.as_deref()))
                .collect(),
        }
    }
}

/// 一道题目，加载后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    pub id: QuestionId,
    pub card_id: String,
    pub card_topic: Option<String>,
    pub part: String,
    pub question_text: Option<String>,
    pub question_translation: Option<String>,
    pub answer: Answer,
}

impl QuestionRecord {
    /// 属于给定 (card, part) 吗
    pub fn belongs_to(&self, card_id: &str, part: &str) -> bool {
        self.card_id == card_id && self.part == part
    }

    /// 所有可搜索文本：问题、问题翻译、答案各字段
    pub fn searchable_texts(&self) -> Vec<&str> {
        let mut texts: Vec<&str> = [&self.question_text, &self.question_translation]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect();
        texts.extend(self.answer.searchable_texts());
        texts
    }
}

/// 导航栏上的一张卡片
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardSummary {
    pub card_id: String,
    pub card_topic: Option<String>,
}

impl fmt::Display for CardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.card_topic {
            Some(topic) => write!(f, "{} · {}", self.card_id, topic),
            None => write!(f, "{}", self.card_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(kind: BlockKind, text: &str, translation: Option<&str>) -> AnswerBlock {
        AnswerBlock {
            kind,
            text: text.to_string(),
            translation: translation.map(str::to_string),
        }
    }

    #[test]
    fn test_question_id_format() {
        assert_eq!(QuestionId::new("Card A", "Part 1", 0).as_str(), "Card A-Part 1-0");
    }

    #[test]
    fn test_spoken_text_prefers_answer_block() {
        let answer = Answer::Structured(vec![
            block(BlockKind::Reason, "because", None),
            block(BlockKind::Answer, "yes", Some("ha")),
        ]);
        assert_eq!(answer.spoken_text(), Some("yes"));

        let answer = Answer::Structured(vec![block(BlockKind::Example, "e.g.", None)]);
        assert_eq!(answer.spoken_text(), Some("e.g."));

        let answer = Answer::Simple {
            text: None,
            translation: Some("javob".to_string()),
        };
        assert_eq!(answer.spoken_text(), None);
    }

    #[test]
    fn test_searchable_texts_cover_translations() {
        let answer = Answer::Structured(vec![
            block(BlockKind::Answer, "yes", Some("ha")),
            block(BlockKind::Example, "e.g.", None),
        ]);
        assert_eq!(answer.searchable_texts(), vec!["yes", "ha", "e.g."]);
    }
}
