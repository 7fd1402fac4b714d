use crate::clients::AssetClient;
use crate::config::Config;
use crate::infrastructure::{CommandSpeech, LocalStore, OfflineCache, SpeechBackend};
use crate::orchestrator::command::Command;
use crate::orchestrator::navigation::{Flow, NavigationController};
use crate::render::Renderer;
use crate::services::{AudioPlayer, RecordStore, Session};
use crate::utils::logging::{log_cache_installed, log_records_loaded, log_session_end, log_startup};
use anyhow::{Context, Result};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 运行应用主逻辑：标准输入读命令，标准输出画界面
    pub async fn run(&self) -> Result<()> {
        let input = BufReader::new(tokio::io::stdin());
        let speech = CommandSpeech::from_config(&self.config);
        self.run_with(input, std::io::stdout(), speech).await?;
        Ok(())
    }

    /// 用给定的输入、输出和语音后端跑一次完整会话，返回输出端
    pub async fn run_with<R, W, S>(&self, input: R, output: W, speech: S) -> Result<W>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
        S: SpeechBackend,
    {
        let config = &self.config;
        let session = Session::restore(LocalStore::open(&config.state_file));
        let renderer = Renderer::new(output, config.color);
        let audio = AudioPlayer::new(
            speech,
            &config.speech_lang,
            Duration::from_millis(config.speech_gap_ms),
        );
        let mut nav = NavigationController::new(session, renderer, audio);

        // 先画加载中，缓存安装和数据加载都可能要等网络
        nav.redraw()?;

        let client = AssetClient::new(config).context("无法创建资源客户端")?;
        let cache = OfflineCache::new(&config.cache_dir, &config.cache_name, client);
        prepare_cache(&cache, config).await;

        let loaded = RecordStore::load(&cache).await;
        if let Ok(store) = &loaded {
            log_records_loaded(store.len(), store.cards().len());
        }
        nav.set_loaded(loaded);
        nav.redraw()?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await.context("读取输入失败")? {
            match Command::parse(&line) {
                Ok(command) => {
                    if nav.handle(command)? == Flow::Quit {
                        break;
                    }
                }
                Err(e) => nav.notice(&e.to_string())?,
            }
        }

        nav.stop_audio();
        log_session_end(nav.session().favorites().len());
        Ok(nav.into_renderer().into_inner())
    }
}

/// 缓存尚未安装时安装，然后激活；任何失败都只记日志，程序照常启动
async fn prepare_cache(cache: &OfflineCache, config: &Config) {
    if cache.is_installed().await {
        info!("💾 使用已安装的缓存: {}", cache.name());
    } else {
        match cache.install(&config.cache_assets).await {
            Ok(report) => log_cache_installed(cache.name(), report.cached.len(), report.total()),
            Err(e) => warn!("⚠️ 缓存安装失败，直接使用网络: {}", e),
        }
    }

    if let Err(e) = cache.activate(config.purge_stale_caches).await {
        warn!("⚠️ 清理旧缓存失败: {}", e);
    }
}
