//! 用户命令
//!
//! 每行输入对应一次界面操作，相当于网页上的一次点击或一次按键。

use thiserror::Error;

/// 用户命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 卡片编号或序号（从 1 开始）
    SelectCard(String),
    /// 部分编号，或纯数字（`2` 即 `Part 2`）
    SelectPart(String),
    /// 搜索词，空串表示清除搜索
    Search(String),
    /// 切换屏幕上第 n 张卡片的收藏
    ToggleFavorite(usize),
    /// 朗读屏幕上第 n 张卡片：先问题后答案
    Play(usize),
    Stop,
    ToggleTheme,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("noma'lum buyruq: {0}")]
    Unknown(String),
    #[error("{command} uchun raqam kerak: {value:?}")]
    ExpectedNumber { command: &'static str, value: String },
    #[error("{0} uchun qiymat kerak")]
    MissingArgument(&'static str),
}

pub const HELP: &str = "\
Buyruqlar:
  card <id|n>     kartochkani tanlash        (c)
  part <id|n>     qismni tanlash             (p)
  search <matn>   qidirish, bo'sh = tozalash (s, /matn)
  fav <n>         sevimliga qo'shish/olish   (f)
  play <n>        savol va javobni o'qish    (>)
  stop            ovozni to'xtatish
  theme           mavzuni almashtirish       (t)
  list            qayta chizish              (l)
  help            yordam                     (?)
  quit            chiqish                    (q)";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandParseError> {
        let line = line.trim();

        // `/query` 是搜索的简写
        if let Some(query) = line.strip_prefix('/') {
            return Ok(Command::Search(query.trim().to_string()));
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "" | "l" | "list" => Ok(Command::Refresh),
            "c" | "card" => required(arg, "card").map(Command::SelectCard),
            "p" | "part" => required(arg, "part").map(Command::SelectPart),
            "s" | "search" => Ok(Command::Search(arg.to_string())),
            "f" | "fav" => number(arg, "fav").map(Command::ToggleFavorite),
            ">" | "play" => number(arg, "play").map(Command::Play),
            "stop" => Ok(Command::Stop),
            "t" | "theme" => Ok(Command::ToggleTheme),
            "?" | "help" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandParseError::Unknown(line.to_string())),
        }
    }
}

fn required(arg: &str, command: &'static str) -> Result<String, CommandParseError> {
    if arg.is_empty() {
        Err(CommandParseError::MissingArgument(command))
    } else {
        Ok(arg.to_string())
    }
}

fn number(arg: &str, command: &'static str) -> Result<usize, CommandParseError> {
    arg.parse().map_err(|_| CommandParseError::ExpectedNumber {
        command,
        value: arg.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(Command::parse("card Card B"), Ok(Command::SelectCard("Card B".into())));
        assert_eq!(Command::parse("  c 2 "), Ok(Command::SelectCard("2".into())));
        assert_eq!(Command::parse("PART Part 3"), Ok(Command::SelectPart("Part 3".into())));
        assert_eq!(Command::parse(""), Ok(Command::Refresh));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
    }

    #[test]
    fn test_parse_search_forms() {
        assert_eq!(Command::parse("/Photo synthesis"), Ok(Command::Search("Photo synthesis".into())));
        assert_eq!(Command::parse("search"), Ok(Command::Search(String::new())));
        assert_eq!(Command::parse("s  cell "), Ok(Command::Search("cell".into())));
    }

    #[test]
    fn test_parse_numbered_commands() {
        assert_eq!(Command::parse("fav 3"), Ok(Command::ToggleFavorite(3)));
        assert_eq!(Command::parse("> 1"), Ok(Command::Play(1)));
        assert!(matches!(
            Command::parse("fav x"),
            Err(CommandParseError::ExpectedNumber { command: "fav", .. })
        ));
        assert_eq!(Command::parse("card"), Err(CommandParseError::MissingArgument("card")));
        assert!(matches!(Command::parse("dance"), Err(CommandParseError::Unknown(_))));
    }
}
