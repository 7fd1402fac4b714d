//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `app` - 应用生命周期
//! - 安装 / 激活离线缓存
//! - 恢复会话状态
//! - 加载题库，读命令循环
//!
//! ### `navigation` - 导航控制器
//! - 把一条命令变成一次状态修改
//! - 修改后重新过滤、重新渲染
//!
//! ### `command` - 命令解析
//!
//! ## 层次关系
//!
//! ```text
//! app (会话生命周期)
//!     ↓
//! navigation (处理单条命令)
//!     ↓
//! services / render (过滤、收藏、朗读、渲染)
//!     ↓
//! infrastructure (本地存储、离线缓存、语音命令)
//! ```

pub mod app;
pub mod command;
pub mod navigation;

pub use app::App;
pub use command::{Command, CommandParseError};
pub use navigation::{Flow, NavigationController};
