//! 文本处理工具

use regex::Regex;
use std::borrow::Cow;
use std::sync::OnceLock;

fn line_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // 真实换行、Windows 换行，以及数据里残留的字面量 "\n"
    RE.get_or_init(|| Regex::new(r"\r\n|\r|\\n").expect("line break pattern is valid"))
}

/// 把存储文本中的各种换行写法统一成 `\n`
pub fn normalize_line_breaks(text: &str) -> Cow<'_, str> {
    line_break_re().replace_all(text, "\n")
}

/// 准备写到终端的数据文本：统一换行，并去掉除 `\n` 以外的控制字符
///
/// 题库里的文本原样写进终端，残留的 ESC 等字符会被终端当作控制序列执行。
pub fn terminal_text(text: &str) -> Cow<'_, str> {
    let normalized = normalize_line_breaks(text);
    if !normalized.chars().any(is_unsafe_control) {
        return normalized;
    }
    Cow::Owned(normalized.chars().filter(|c| !is_unsafe_control(*c)).collect())
}

fn is_unsafe_control(c: char) -> bool {
    c != '\n' && c.is_control()
}

/// 忽略大小写的子串匹配，`needle_lower` 必须已经是小写
pub fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}
