use anyhow::Result;
use question_extract::utils::logging;
use question_extract::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志（先于配置，配置解析的告警才能输出）
    let verbose = std::env::var("VERBOSE_LOGGING")
        .map(|v| v.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    logging::init(verbose);

    // 加载配置
    let config = Config::from_env();

    // 初始化并运行应用
    App::initialize(config).await?.run().await?;

    Ok(())
}
