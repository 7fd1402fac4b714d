//! # Exam Flashcards
//!
//! 终端里的双语（英语 / 乌兹别克语）考试复习卡片
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有外部资源，只暴露能力
//! - `LocalStore` - 本地键值状态文件
//! - `OfflineCache` - 带版本名的离线资源缓存
//! - `SpeechBackend` - 朗读能力（默认调用外部 TTS 命令）
//!
//! ### ② 数据模型（Models）
//! - `models/` - 题目记录、视图状态、本地化字段名
//! - `models/loaders` - 从 JSON 数组解析题目记录
//!
//! ### ③ 业务能力层（Services）
//! - `RecordStore` - 加载后的题库、卡片列表、部分列表
//! - `filter` - 卡片 + 部分 + 搜索词的过滤
//! - `FavoriteSet` / `Session` - 收藏与可持久化的视图状态
//! - `AudioPlayer` - 同一时间只有一段朗读
//!
//! ### ④ 渲染与编排（Render / Orchestration）
//! - `render/` - 把一帧状态画成文本界面
//! - `orchestrator/` - 命令解析、导航控制、应用生命周期
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod render;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{CommandSpeech, LocalStore, OfflineCache, SpeechBackend};
pub use models::{Answer, QuestionId, QuestionRecord, Theme, ViewState};
pub use orchestrator::{App, Command, NavigationController};
pub use services::{AudioPlayer, RecordStore, Session};
