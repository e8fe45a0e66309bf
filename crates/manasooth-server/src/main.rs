use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use manasooth_bedrock::client::BedrockClient;
use manasooth_server::config::{ServerConfig, config_path};
use manasooth_server::{AppState, router};
use manasooth_storage::Store;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    color_eyre::install()?;

    let path = config_path()?;
    let mut config = ServerConfig::load(&path)?;
    config.apply_overrides(|key| std::env::var(key).ok());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if config.log_json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    tracing::info!(
        config = %path.display(),
        data_dir = %config.data_dir.display(),
        region = %config.region,
        model = %config.model_id,
        "starting manasooth"
    );

    let store = Store::open(&config.data_dir).await?;
    let model = BedrockClient::from_env(&config.region, config.model_id.clone()).await;
    let app = router(AppState::new(store, Arc::new(model)));

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
