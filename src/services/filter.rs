//! 过滤引擎 - 业务能力层
//!
//! 线性扫描，保持题库原有顺序，不排序、不做模糊匹配。

use crate::models::QuestionRecord;
use crate::utils::contains_ignore_case;

/// 过滤结果为空的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// 该卡片 / 部分下没有任何题目
    NoData,
    /// 有题目，但都不包含搜索词
    NoMatches,
}

/// 过滤结果
#[derive(Debug, Clone)]
pub struct FilterOutcome<'a> {
    pub records: Vec<&'a QuestionRecord>,
    /// (card, part) 过滤后、搜索前的题目数
    pub total_in_part: usize,
}

impl FilterOutcome<'_> {
    pub fn empty_reason(&self) -> Option<EmptyReason> {
        if !self.records.is_empty() {
            None
        } else if self.total_in_part == 0 {
            Some(EmptyReason::NoData)
        } else {
            Some(EmptyReason::NoMatches)
        }
    }
}

/// 按卡片、部分和搜索词过滤
///
/// 搜索词去掉首尾空白后为空时不做搜索过滤；否则忽略大小写，
/// 匹配问题、问题翻译和答案的任意字段。
pub fn filter<'a>(
    records: &'a [QuestionRecord],
    card: &str,
    part: &str,
    query: &str,
) -> FilterOutcome<'a> {
    let in_part: Vec<&QuestionRecord> = records.iter().filter(|r| r.belongs_to(card, part)).collect();
    let total_in_part = in_part.len();

    let query = query.trim().to_lowercase();
    let records = if query.is_empty() {
        in_part
    } else {
        in_part.into_iter().filter(|r| matches_query(r, &query)).collect()
    };

    FilterOutcome {
        records,
        total_in_part,
    }
}

/// `query_lower` 必须已经是小写
pub fn matches_query(record: &QuestionRecord, query_lower: &str) -> bool {
    record
        .searchable_texts()
        .into_iter()
        .any(|text| contains_ignore_case(text, query_lower))
}
