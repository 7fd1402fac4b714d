use crate::error::{AppError, AppResult};
use crate::models::field::{BlockKind, Field};
use crate::models::question::{Answer, AnswerBlock, QuestionId, QuestionRecord};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::{debug, warn};

/// 从 JSON 字节解析题库
///
/// 顶层必须是数组；数组里不是对象的元素会被跳过。缺失的字段不算错误。
///
/// # 参数
/// - `source_name`: 数据源名称（只用于错误信息和日志）
/// - `bytes`: 原始 JSON
pub fn parse_records(source_name: &str, bytes: &[u8]) -> AppResult<Vec<QuestionRecord>> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| AppError::data_parse_failed(source_name, e.to_string()))?;

    let Value::Array(items) = value else {
        return Err(AppError::data_parse_failed(source_name, "顶层不是 JSON 数组"));
    };

    let mut ordinals: HashMap<(String, String), usize> = HashMap::new();
    let mut records = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let Value::Object(map) = item else {
            warn!("跳过第 {} 个元素: 不是 JSON 对象", index);
            continue;
        };

        let fields = RawFields::from_map(&map);
        let card_id = fields.get(Field::CardId).unwrap_or_default();
        let part = fields.get(Field::Part).unwrap_or_default();

        let ordinal = ordinals.entry((card_id.clone(), part.clone())).or_insert(0);
        let id = QuestionId::new(&card_id, &part, *ordinal);
        *ordinal += 1;

        records.push(QuestionRecord {
            id,
            card_topic: fields.get(Field::CardTopic),
            question_text: fields.get(Field::Question),
            question_translation: fields.get(Field::QuestionTranslation),
            answer: fields.answer(),
            card_id,
            part,
        });
    }

    debug!("{}: 解析出 {} 道题目", source_name, records.len());
    Ok(records)
}

/// 一条记录里被识别出的字段
struct RawFields(HashMap<Field, String>);

impl RawFields {
    fn from_map(map: &Map<String, Value>) -> Self {
        let mut fields = HashMap::new();
        for (key, value) in map {
            let Some(field) = Field::from_key(key) else {
                continue;
            };
            if let Some(text) = scalar_text(value) {
                // 同一字段出现多种写法时保留第一个有值的
                fields.entry(field).or_insert(text);
            }
        }
        Self(fields)
    }

    fn get(&self, field: Field) -> Option<String> {
        self.0.get(&field).cloned()
    }

    /// `Answer (EN)` 有值时按结构化答案处理
    fn answer(&self) -> Answer {
        if self.0.contains_key(&Field::BlockAnswer) {
            let blocks = BlockKind::ALL
                .into_iter()
                .filter_map(|kind| {
                    let (text_field, translation_field) = kind.fields();
                    Some(AnswerBlock {
                        kind,
                        text: self.get(text_field)?,
                        translation: self.get(translation_field),
                    })
                })
                .collect();
            Answer::Structured(blocks)
        } else {
            Answer::Simple {
                text: self.get(Field::AnswerText),
                translation: self.get(Field::AnswerTranslation),
            }
        }
    }
}

/// 标量转文本；null、空串、数组和对象视为缺失
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_records_and_ordinals() {
        let json = r#"[
            {"Mavzular": "Card A", "Mavzular nomi": "Biology", "Qism": "Part 1",
             "Sovollar": "Explain Photosynthesis", "Sovollar (UZ)": "Fotosintezni tushuntiring",
             "Jovoblar (EN)": "Plants make food", "Jovoblar (UZ)": "O'simliklar"},
            {"Mavzular": "Card A", "Qism": "Part 1", "Sovollar": "Second"},
            {"Mavzular": "Card A", "Qism": "Part 2", "Sovollar": "Third"}
        ]"#;

        let records = parse_records("exam.json", json.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].id.as_str(), "Card A-Part 1-0");
        assert_eq!(records[1].id.as_str(), "Card A-Part 1-1");
        assert_eq!(records[2].id.as_str(), "Card A-Part 2-0");
        assert_eq!(records[0].card_topic.as_deref(), Some("Biology"));
        assert_eq!(
            records[0].answer,
            Answer::Simple {
                text: Some("Plants make food".to_string()),
                translation: Some("O'simliklar".to_string()),
            }
        );
        assert_eq!(records[1].card_topic, None);
    }

    #[test]
    fn test_parse_structured_answer_skips_missing_blocks() {
        let json = r#"[{
            "Mavzular": "Card B", "Qism": "Part 2", "Sovollar": "Why?",
            "Answer (EN)": "Because", "Javob (UZ)": "Chunki",
            "Reason (EN)": "", "Example (EN)": "For example", "Extra Info (EN)": null,
            "Jovoblar (EN)": "legacy"
        }]"#;

        let records = parse_records("exam.json", json.as_bytes()).unwrap();
        let Answer::Structured(blocks) = &records[0].answer else {
            panic!("expected structured answer");
        };
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].kind, BlockKind::Answer);
        assert_eq!(blocks[0].translation.as_deref(), Some("Chunki"));
        assert_eq!(blocks[1].kind, BlockKind::Example);
        assert_eq!(blocks[1].translation, None);
    }

    #[test]
    fn test_legacy_keys_and_numbers() {
        let json = r#"[{"Unnamed: 0": "Card A", "Unnamed: 1": "Part 1", "Question": 42,
                        "Answer (EN):": "yes", "Javob (UZ):": "ha"}]"#;
        let records = parse_records("exam.json", json.as_bytes()).unwrap();
        assert_eq!(records[0].card_id, "Card A");
        assert_eq!(records[0].question_text.as_deref(), Some("42"));
        assert_eq!(records[0].answer.spoken_text(), Some("yes"));
    }

    #[test]
    fn test_non_array_and_malformed_are_parse_errors() {
        assert!(parse_records("exam.json", b"{\"a\": 1}").is_err());
        assert!(parse_records("exam.json", b"[{").is_err());
    }

    #[test]
    fn test_non_object_items_are_skipped() {
        let records = parse_records("exam.json", br#"[1, "x", {"Mavzular": "Card A"}]"#).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].part, "");
        assert_eq!(records[0].question_text, None);
    }
}
