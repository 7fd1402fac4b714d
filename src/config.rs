use crate::error::{AppResult, ConfigError};
use serde::Deserialize;
use std::path::PathBuf;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// 题库数据源：本地路径或 http(s) URL
    pub data_source: String,
    /// 离线缓存根目录
    pub cache_dir: PathBuf,
    /// 缓存名称，资源清单变化时必须一起更新
    pub cache_name: String,
    /// 安装时写入缓存的资源清单（相对 data_source 所在位置）
    pub cache_assets: Vec<String>,
    /// 激活时是否删除旧名称的缓存
    pub purge_stale_caches: bool,
    /// 本地状态文件（收藏、当前卡片、主题）
    pub state_file: PathBuf,
    // --- 语音配置 ---
    pub speech_command: String,
    pub speech_args: Vec<String>,
    pub speech_lang: String,
    /// 问题和答案之间的停顿（毫秒）
    pub speech_gap_ms: u64,
    /// 是否输出 ANSI 颜色
    pub color: bool,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件，空字符串表示不写文件
    pub output_log_file: String,
    /// 数据请求超时（秒），0 表示不设超时
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: "exam.json".to_string(),
            cache_dir: PathBuf::from(".exam-cache"),
            cache_name: "exam-cache-v16".to_string(),
            cache_assets: vec!["exam.json".to_string()],
            purge_stale_caches: false,
            state_file: PathBuf::from(".exam-state.json"),
            speech_command: "espeak-ng".to_string(),
            speech_args: Vec::new(),
            speech_lang: "en-US".to_string(),
            speech_gap_ms: 1500,
            color: true,
            verbose_logging: false,
            output_log_file: String::new(),
            request_timeout_secs: 0,
        }
    }
}

impl Config {
    /// 加载配置：可选的 TOML 文件（`FLASHCARDS_CONFIG`）打底，环境变量覆盖
    pub fn load() -> AppResult<Self> {
        let base = match std::env::var("FLASHCARDS_CONFIG") {
            Ok(path) if !path.is_empty() => Self::from_toml_file(&path)?,
            _ => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn from_toml_str(path: &str, content: &str) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: path.to_string(),
                source,
            }
            .into()
        })
    }

    fn from_toml_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(path, &content)
    }

    fn with_env_overrides(self) -> Self {
        let base = self;
        Self {
            data_source: std::env::var("DATA_SOURCE").unwrap_or(base.data_source),
            cache_dir: std::env::var("CACHE_DIR").map(PathBuf::from).unwrap_or(base.cache_dir),
            cache_name: std::env::var("CACHE_NAME").unwrap_or(base.cache_name),
            cache_assets: std::env::var("CACHE_ASSETS").ok().map(|v| split_list(&v)).unwrap_or(base.cache_assets),
            purge_stale_caches: std::env::var("PURGE_STALE_CACHES").ok().and_then(|v| v.parse().ok()).unwrap_or(base.purge_stale_caches),
            state_file: std::env::var("STATE_FILE").map(PathBuf::from).unwrap_or(base.state_file),
            speech_command: std::env::var("SPEECH_COMMAND").unwrap_or(base.speech_command),
            speech_args: std::env::var("SPEECH_ARGS").ok().map(|v| v.split_whitespace().map(str::to_string).collect()).unwrap_or(base.speech_args),
            speech_lang: std::env::var("SPEECH_LANG").unwrap_or(base.speech_lang),
            speech_gap_ms: std::env::var("SPEECH_GAP_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.speech_gap_ms),
            color: std::env::var("NO_COLOR").map(|_| false).unwrap_or(base.color),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(base.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(base.output_log_file),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(base.request_timeout_secs),
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
