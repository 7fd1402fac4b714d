use anyhow::Result;
use exam_flashcards::{logger, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置，配置文件坏了也要先把日志起来再报错
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            logger::init();
            return Err(e.into());
        }
    };

    // 初始化日志
    logger::try_init(config.verbose_logging, Some(&config.output_log_file))?;

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
