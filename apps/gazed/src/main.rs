use clap::Parser;
use gaze_base::log_fatal;
use gaze_model::{HostedModel, HostedModelConfig};
use gaze_proxy::AppState;
use std::sync::Arc;

/// Gaze analysis proxy daemon.
///
/// Accepts frame batches on /api/analyze and forwards them to the hosted
/// model named by --model. The API key comes from GAZE_API_KEY.
#[derive(Parser, Debug)]
#[command(name = "gazed", about = "Gaze analysis proxy")]
struct Args {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1:8090")]
    addr: String,

    /// Hosted model identifier.
    #[arg(long, default_value = "gemini-2.0-flash")]
    model: String,

    /// Base URL of the hosted generation service.
    #[arg(long, default_value = "https://generativelanguage.googleapis.com")]
    base_url: String,
}

#[tokio::main]
async fn main() {
    gaze_base::init_stdout_logger();
    let args = Args::parse();

    let api_key = std::env::var("GAZE_API_KEY").unwrap_or_default();
    let config = HostedModelConfig::default()
        .with_base_url(args.base_url)
        .with_model(args.model)
        .with_api_key(api_key);

    let model = match HostedModel::new(config) {
        Ok(model) => model,
        Err(e) => log_fatal!("model client init failed: {e} (is GAZE_API_KEY set?)"),
    };
    log::info!("using hosted model {}", model.config().model());

    let state = AppState {
        model: Arc::new(model),
    };
    let (addr, server) = match gaze_proxy::bind(args.addr.as_str(), state).await {
        Ok(bound) => bound,
        Err(e) => log_fatal!("bind {} failed: {e}", args.addr),
    };
    log::info!("gazed listening on {addr}");

    if let Err(e) = server.await {
        log_fatal!("server task failed: {e}");
    }
}
