//! 错误类型
//!
//! 库内部统一返回 [`AppResult`]，编排层和二进制入口再用 `anyhow` 包一层上下文。

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 数据源加载 / 解析错误
    #[error("数据错误: {0}")]
    Data(#[from] DataError),
    /// 本地存储错误
    #[error("存储错误: {0}")]
    Storage(#[from] StorageError),
    /// 离线缓存错误
    #[error("缓存错误: {0}")]
    Cache(#[from] CacheError),
    /// 语音播放错误
    #[error("语音错误: {0}")]
    Speech(#[from] SpeechError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 数据源错误
///
/// 加载失败和解析失败在界面上的表现完全一致，只是日志里区分开。
#[derive(Debug, Error)]
pub enum DataError {
    /// 网络失败、非 2xx 响应、文件读取失败
    #[error("无法加载数据 ({source_name}): {source}")]
    Load {
        source_name: String,
        #[source]
        source: BoxError,
    },
    /// 非 2xx 响应
    #[error("数据源返回错误状态 ({source_name}): {status}")]
    BadStatus { source_name: String, status: u16 },
    /// JSON 格式错误或顶层不是数组
    #[error("无法解析数据 ({source_name}): {reason}")]
    Parse { source_name: String, reason: String },
}

/// 本地存储错误
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("读取存储文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入存储文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("存储文件已损坏 ({path}): {source}")]
    Corrupted {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 离线缓存错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("缓存目录不可用 ({path}): {source}")]
    DirectoryUnavailable {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("写入缓存条目失败 ({asset}): {source}")]
    WriteFailed {
        asset: String,
        #[source]
        source: std::io::Error,
    },
    #[error("缓存索引损坏 ({path}): {source}")]
    IndexCorrupted {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// 语音播放错误
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("无法启动语音命令 {command}: {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("语音命令 {command} 异常退出: {status}")]
    Failed { command: String, status: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("配置文件解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建数据加载错误
    pub fn data_load_failed(
        source_name: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Data(DataError::Load {
            source_name: source_name.into(),
            source: Box::new(source),
        })
    }

    /// 创建数据解析错误
    pub fn data_parse_failed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        AppError::Data(DataError::Parse {
            source_name: source_name.into(),
            reason: reason.into(),
        })
    }

    /// 是否属于数据源错误（加载或解析）
    pub fn is_data_error(&self) -> bool {
        matches!(self, AppError::Data(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
