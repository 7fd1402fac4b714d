//! 本地键值存储 - 基础设施层
//!
//! 相当于浏览器的 localStorage：键和值都是字符串，整个表存成一个 JSON 文件。

use crate::error::{AppResult, StorageError};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 本地键值存储
///
/// 职责：
/// - 启动时读一次文件
/// - 每次写入都把完整的表落盘
/// - 文件损坏或不可读时退化为纯内存存储，不影响使用
#[derive(Debug)]
pub struct LocalStore {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl LocalStore {
    /// 打开存储文件，不存在时从空表开始
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match Self::read_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("⚠️ 本地状态不可用，使用空状态: {}", e);
                BTreeMap::new()
            }
        };
        debug!("本地状态 {} 共 {} 个键", path.display(), entries.len());
        Self {
            path: Some(path),
            entries,
        }
    }

    /// 不落盘的存储
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: BTreeMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// 写入一个键并落盘
    ///
    /// 内存中的值总会更新；落盘失败时返回错误，调用方决定是否只记日志。
    pub fn set(&mut self, key: &str, value: impl Into<String>) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.into());
        self.flush()
    }

    pub fn remove(&mut self, key: &str) -> AppResult<()> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::ReadFailed {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupted {
            path: path.display().to_string(),
            source,
        })
    }

    fn flush(&self) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let write_failed = |source| StorageError::WriteFailed {
            path: path.display().to_string(),
            source,
        };

        let json = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            write_failed(std::io::Error::new(ErrorKind::InvalidData, e))
        })?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }
        // 先写临时文件再改名，避免写到一半留下损坏的状态文件
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(write_failed)?;
        fs::rename(&tmp, path).map_err(write_failed)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut store = LocalStore::open(&path);
        assert_eq!(store.get("currentCard"), None);
        store.set("currentCard", "Card B").unwrap();
        store.set("theme", "dark").unwrap();

        let reopened = LocalStore::open(&path);
        assert_eq!(reopened.get("currentCard"), Some("Card B"));
        assert_eq!(reopened.get("theme"), Some("dark"));
    }

    #[test]
    fn test_corrupted_file_falls_back_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();

        let mut store = LocalStore::open(&path);
        assert_eq!(store.get("favorites"), None);
        store.set("favorites", "[]").unwrap();
        assert_eq!(LocalStore::open(&path).get("favorites"), Some("[]"));
    }

    #[test]
    fn test_write_failure_keeps_value_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        // 父路径是一个普通文件，创建目录必然失败
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let mut store = LocalStore::open(blocker.join("state.json"));

        assert!(store.set("theme", "dark").is_err());
        assert_eq!(store.get("theme"), Some("dark"));
    }

    #[test]
    fn test_in_memory_never_fails() {
        let mut store = LocalStore::in_memory();
        store.set("currentPart", "Part 2").unwrap();
        store.remove("currentPart").unwrap();
        assert_eq!(store.get("currentPart"), None);
        assert!(store.path().is_none());
    }
}
