use anyhow::Result;
use clap::Parser;
use rock_classifier::{config::Config, web::serve};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rock-classifier")]
#[command(about = "Classify rock photographs as Coal, Limestone or Sandstone")]
struct Args {
    /// Server bind address
    #[arg(long, default_value = "127.0.0.1:8501")]
    bind: String,

    /// Path to the pretrained ONNX model
    #[arg(long, default_value = "models/cnn_model.onnx")]
    model: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// ONNX Runtime intra-op threads
    #[arg(long)]
    intra_threads: Option<usize>,

    /// Enable development mode
    #[arg(long)]
    dev: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志系统
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&args.log_level))
        )
        .with_target(false)
        .init();

    tracing::info!("Starting rock classifier...");
    tracing::info!("Bind address: {}", args.bind);
    tracing::info!("Model path: {}", args.model);

    let config = Config::new(args.bind, args.model, args.intra_threads, args.dev)?;

    // 模型加载失败时直接退出，不重试
    if let Err(e) = serve(config).await {
        tracing::error!("Rock classifier stopped: {}", e);
        return Err(e.into());
    }

    Ok(())
}
