/// 数据源字段
///
/// 题库 JSON 的键名是本地化的，而且在不同版本的数据里出现过不同写法，
/// 这里把所有已知写法映射到同一个字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// 卡片编号（如 "Card A"）
    CardId,
    /// 卡片主题名
    CardTopic,
    /// 考试部分（如 "Part 1"）
    Part,
    /// 问题（英文）
    Question,
    /// 问题（乌兹别克语翻译）
    QuestionTranslation,
    /// 简单答案（英文）
    AnswerText,
    /// 简单答案（翻译）
    AnswerTranslation,
    /// 结构化答案各块，英文 / 翻译成对出现
    BlockAnswer,
    BlockAnswerTranslation,
    BlockReason,
    BlockReasonTranslation,
    BlockExample,
    BlockExampleTranslation,
    BlockExtraInfo,
    BlockExtraInfoTranslation,
}

static FIELD_KEYS: phf::Map<&'static str, Field> = phf::phf_map! {
    "Mavzular" => Field::CardId,
    "Unnamed: 0" => Field::CardId,
    "Mavzular nomi" => Field::CardTopic,
    "Qism" => Field::Part,
    "Unnamed: 1" => Field::Part,
    "Sovollar" => Field::Question,
    "Question" => Field::Question,
    "Sovollar (UZ)" => Field::QuestionTranslation,
    "UZ tarjima:" => Field::QuestionTranslation,
    "Jovoblar (EN)" => Field::AnswerText,
    "Answer (EN):" => Field::AnswerText,
    "Jovoblar (UZ)" => Field::AnswerTranslation,
    "Javob (UZ):" => Field::AnswerTranslation,
    "Answer (EN)" => Field::BlockAnswer,
    "Javob (UZ)" => Field::BlockAnswerTranslation,
    "Reason (EN)" => Field::BlockReason,
    "Sabab (UZ)" => Field::BlockReasonTranslation,
    "Example (EN)" => Field::BlockExample,
    "Misol (UZ)" => Field::BlockExampleTranslation,
    "Extra Info (EN)" => Field::BlockExtraInfo,
    "Qo'shimcha ma'lumot (UZ)" => Field::BlockExtraInfoTranslation,
};

impl Field {
    /// 从 JSON 键名解析字段（精确匹配，区分大小写）
    pub fn from_key(key: &str) -> Option<Self> {
        FIELD_KEYS.get(key).copied()
    }
}

/// 结构化答案块的种类，顺序即显示顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Answer,
    Reason,
    Example,
    ExtraInfo,
}

impl BlockKind {
    pub const ALL: [BlockKind; 4] = [
        BlockKind::Answer,
        BlockKind::Reason,
        BlockKind::Example,
        BlockKind::ExtraInfo,
    ];

    /// 显示标签
    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Answer => "Answer",
            BlockKind::Reason => "Reason",
            BlockKind::Example => "Example",
            BlockKind::ExtraInfo => "Extra Info",
        }
    }

    /// (英文字段, 翻译字段)
    pub fn fields(self) -> (Field, Field) {
        match self {
            BlockKind::Answer => (Field::BlockAnswer, Field::BlockAnswerTranslation),
            BlockKind::Reason => (Field::BlockReason, Field::BlockReasonTranslation),
            BlockKind::Example => (Field::BlockExample, Field::BlockExampleTranslation),
            BlockKind::ExtraInfo => (Field::BlockExtraInfo, Field::BlockExtraInfoTranslation),
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_aliases() {
        assert_eq!(Field::from_key("Mavzular"), Some(Field::CardId));
        assert_eq!(Field::from_key("Unnamed: 0"), Some(Field::CardId));
        assert_eq!(Field::from_key("Answer (EN):"), Some(Field::AnswerText));
        assert_eq!(Field::from_key("Answer (EN)"), Some(Field::BlockAnswer));
        assert_eq!(Field::from_key("mavzular"), None);
    }
}
