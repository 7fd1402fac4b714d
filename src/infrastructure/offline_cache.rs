//! 离线缓存 - 基础设施层
//!
//! 安装时把固定清单里的资源快照到一个命名缓存目录；之后每次取资源先查缓存，
//! 查不到再走网络。缓存没有失效策略，资源清单或内容变化时必须换一个缓存名。
//!
//! 目录结构：
//!
//! ```text
//! <cache_dir>/
//!     exam-cache-v16/
//!         index.json      # 缓存名、创建时间、已缓存的资源
//!         exam.json
//!     exam-cache-v15/     # 旧缓存，activate 时可选删除
//! ```

use crate::clients::AssetClient;
use crate::error::{AppResult, CacheError};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

const INDEX_FILE: &str = "index.json";

/// 缓存索引
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheIndex {
    pub cache_name: String,
    /// RFC 3339 时间
    pub created_at: String,
    pub assets: Vec<String>,
}

/// 安装结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub cached: Vec<String>,
    pub skipped: Vec<String>,
}

impl InstallReport {
    pub fn total(&self) -> usize {
        self.cached.len() + self.skipped.len()
    }
}

/// 资源的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchSource {
    Cache,
    Network,
}

/// 离线缓存
pub struct OfflineCache {
    root: PathBuf,
    name: String,
    client: AssetClient,
}

impl OfflineCache {
    pub fn new(root: impl Into<PathBuf>, name: impl Into<String>, client: AssetClient) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
            client,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &AssetClient {
        &self.client
    }

    fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.name)
    }

    /// 当前名称的缓存是否已安装
    pub async fn is_installed(&self) -> bool {
        matches!(self.read_index().await, Ok(Some(index)) if index.cache_name == self.name)
    }

    pub async fn read_index(&self) -> AppResult<Option<CacheIndex>> {
        let path = self.cache_dir().join(INDEX_FILE);
        let content = match fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(CacheError::DirectoryUnavailable {
                    path: path.display().to_string(),
                    source,
                }
                .into())
            }
        };
        let index = serde_json::from_str(&content).map_err(|source| CacheError::IndexCorrupted {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Some(index))
    }

    /// 安装：逐个获取清单中的资源并写入缓存
    ///
    /// 单个资源失败只记录并跳过；缓存目录本身不可写才算失败。
    pub async fn install(&self, manifest: &[String]) -> AppResult<InstallReport> {
        let dir = self.cache_dir();
        fs::create_dir_all(&dir)
            .await
            .map_err(|source| CacheError::DirectoryUnavailable {
                path: dir.display().to_string(),
                source,
            })?;

        let mut report = InstallReport::default();
        for asset in manifest {
            let Some(key) = cache_key(asset) else {
                debug!("跳过不可缓存的条目: {:?}", asset);
                report.skipped.push(asset.clone());
                continue;
            };

            let bytes = match self.fetch_network(&key).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("⚠️ 缓存资源失败 {}: {}", asset, e);
                    report.skipped.push(asset.clone());
                    continue;
                }
            };

            self.write_entry(&key, &bytes).await?;
            report.cached.push(key);
        }

        let index = CacheIndex {
            cache_name: self.name.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
            assets: report.cached.clone(),
        };
        let json = serde_json::to_vec_pretty(&index).map_err(|source| CacheError::IndexCorrupted {
            path: dir.join(INDEX_FILE).display().to_string(),
            source,
        })?;
        self.write_entry(INDEX_FILE, &json).await?;

        info!(
            "💾 缓存 {} 已安装 {} 个资源",
            self.name,
            report.cached.len()
        );
        Ok(report)
    }

    /// 激活：可选地删除名称不同的旧缓存，返回被删除的缓存名
    pub async fn activate(&self, purge_stale: bool) -> AppResult<Vec<String>> {
        if !purge_stale {
            return Ok(Vec::new());
        }

        let mut removed = Vec::new();
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(removed),
            Err(source) => {
                return Err(CacheError::DirectoryUnavailable {
                    path: self.root.display().to_string(),
                    source,
                }
                .into())
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name().to_string_lossy().to_string();
            let is_dir = entry.file_type().await.map(|t| t.is_dir()).unwrap_or(false);
            if !is_dir || name == self.name {
                continue;
            }
            match fs::remove_dir_all(entry.path()).await {
                Ok(()) => {
                    info!("🧹 删除旧缓存: {}", name);
                    removed.push(name);
                }
                Err(e) => warn!("⚠️ 删除旧缓存 {} 失败: {}", name, e),
            }
        }
        Ok(removed)
    }

    /// 只查缓存
    pub async fn match_cached(&self, asset: &str) -> Option<Vec<u8>> {
        let key = cache_key(asset)?;
        fs::read(self.cache_dir().join(&key)).await.ok()
    }

    /// 取资源：有缓存用缓存，否则走网络
    pub async fn fetch(&self, asset: &str) -> AppResult<(Vec<u8>, FetchSource)> {
        if let Some(bytes) = self.match_cached(asset).await {
            debug!("缓存命中: {}", asset);
            return Ok((bytes, FetchSource::Cache));
        }
        let bytes = self.fetch_network(asset).await?;
        Ok((bytes, FetchSource::Network))
    }

    async fn fetch_network(&self, asset: &str) -> AppResult<Vec<u8>> {
        let location = self.client.resolve(asset)?;
        self.client.fetch(&location).await
    }

    async fn write_entry(&self, key: &str, bytes: &[u8]) -> AppResult<()> {
        let path = self.cache_dir().join(key);
        let write_failed = |source| CacheError::WriteFailed {
            asset: key.to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(write_failed)?;
        }
        fs::write(&path, bytes).await.map_err(write_failed)?;
        Ok(())
    }
}

/// 规范化缓存键：去掉开头的 `./`，拒绝目录条目、绝对路径和 `..`
fn cache_key(asset: &str) -> Option<String> {
    let trimmed = asset.trim().trim_start_matches("./");
    if trimmed.is_empty() || trimmed.ends_with('/') || trimmed == INDEX_FILE {
        return None;
    }
    let path = Path::new(trimmed);
    let safe = path.components().all(|c| matches!(c, Component::Normal(_)));
    safe.then(|| trimmed.to_string())
}
