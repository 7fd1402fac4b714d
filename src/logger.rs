//! 日志初始化
//!
//! 日志统一写到 stderr，stdout 只留给渲染出来的卡片界面。

use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化默认日志（info 级别，可用 `RUST_LOG` 覆盖）
pub fn init() {
    let _ = try_init(false, None);
}

/// 按配置初始化日志
///
/// # 参数
/// - `verbose`: 为 true 时默认级别为 debug
/// - `log_file`: 额外镜像一份日志到该文件（会先写入文件头）
pub fn try_init(verbose: bool, log_file: Option<&str>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = match log_file.filter(|p| !p.is_empty()) {
        Some(path) => {
            let file = init_log_file(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .context("日志系统已初始化")?;

    Ok(())
}

/// 创建日志文件并写入文件头
pub fn init_log_file(log_file_path: &str) -> Result<File> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(log_file_path)
        .with_context(|| format!("无法创建日志文件: {}", log_file_path))?;

    let log_header = format!(
        "{}\n学习日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    file.write_all(log_header.as_bytes())?;
    Ok(file)
}
