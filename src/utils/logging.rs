/// 日志工具模块
///
/// 提供启动信息、加载结果等日志输出的辅助函数
use crate::config::Config;
use tracing::{info, warn};

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 单词卡学习模式");
    info!("📄 数据源: {}", config.data_source);
    info!("💾 缓存: {} ({})", config.cache_name, config.cache_dir.display());
    info!("{}", "=".repeat(60));
}

/// 记录题库加载结果
///
/// # 参数
/// - `records`: 题目总数
/// - `cards`: 卡片（主题）数量
pub fn log_records_loaded(records: usize, cards: usize) {
    if records == 0 {
        warn!("⚠️ 题库为空，界面将显示空占位");
    } else {
        info!("✓ 加载 {} 道题目，共 {} 张卡片", records, cards);
    }
}

/// 记录缓存安装结果
pub fn log_cache_installed(cache_name: &str, cached: usize, total: usize) {
    if cached == total {
        info!("✓ 缓存 {} 安装完成: {}/{}", cache_name, cached, total);
    } else {
        warn!("⚠️ 缓存 {} 部分安装: {}/{}", cache_name, cached, total);
    }
}

/// 记录会话结束统计
pub fn log_session_end(favorites: usize) {
    info!("{}", "─".repeat(60));
    info!(
        "👋 会话结束 {} | 收藏 {} 道题",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        favorites
    );
    info!("{}", "─".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
