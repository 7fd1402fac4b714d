/// 资源客户端
///
/// 负责真正去"网络"取资源：数据源可以是 http(s) URL，也可以是本地文件路径。
/// 清单里的资源路径都相对于数据源所在位置解析。
use crate::config::Config;
use crate::error::{AppError, AppResult, DataError};
use reqwest::Url;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// 资源位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLocation {
    Remote(Url),
    Local(PathBuf),
}

impl std::fmt::Display for AssetLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetLocation::Remote(url) => write!(f, "{}", url),
            AssetLocation::Local(path) => write!(f, "{}", path.display()),
        }
    }
}

/// 资源客户端
#[derive(Debug, Clone)]
pub struct AssetClient {
    http: reqwest::Client,
    data_source: AssetLocation,
}

impl AssetClient {
    /// 创建新的资源客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let mut builder = reqwest::Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        let http = builder
            .build()
            .map_err(|e| AppError::data_load_failed(&config.data_source, e))?;

        Ok(Self {
            http,
            data_source: parse_location(&config.data_source),
        })
    }

    /// 数据源本身的位置
    pub fn data_source(&self) -> &AssetLocation {
        &self.data_source
    }

    /// 数据源对应的缓存键（文件名）
    pub fn data_source_key(&self) -> String {
        match &self.data_source {
            AssetLocation::Remote(url) => url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or_default()
                .to_string(),
            AssetLocation::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }

    /// 把清单里的相对路径解析成实际位置
    pub fn resolve(&self, asset: &str) -> AppResult<AssetLocation> {
        match &self.data_source {
            AssetLocation::Remote(base) => base
                .join(asset)
                .map(AssetLocation::Remote)
                .map_err(|e| AppError::data_load_failed(asset, e)),
            AssetLocation::Local(path) => {
                let base = path.parent().unwrap_or_else(|| Path::new(""));
                Ok(AssetLocation::Local(base.join(asset)))
            }
        }
    }

    /// 获取资源原始字节
    pub async fn fetch(&self, location: &AssetLocation) -> AppResult<Vec<u8>> {
        debug!("获取资源: {}", location);
        match location {
            AssetLocation::Remote(url) => {
                let source_name = url.to_string();
                let response = self
                    .http
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(|e| AppError::data_load_failed(&source_name, e))?;

                let status = response.status();
                if !status.is_success() {
                    return Err(DataError::BadStatus {
                        source_name,
                        status: status.as_u16(),
                    }
                    .into());
                }

                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| AppError::data_load_failed(&source_name, e))?;
                Ok(bytes.to_vec())
            }
            AssetLocation::Local(path) => tokio::fs::read(path)
                .await
                .map_err(|e| AppError::data_load_failed(path.display().to_string(), e)),
        }
    }
}

fn parse_location(source: &str) -> AssetLocation {
    match Url::parse(source) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => AssetLocation::Remote(url),
        _ => AssetLocation::Local(PathBuf::from(source)),
    }
}
