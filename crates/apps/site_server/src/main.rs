use site_server::config::Config;
use site_server::{app, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    let state = AppState::from_config(&config)?;
    let router = app(state, config.max_upload_bytes);

    info!(
        backend = %config.backend_url,
        "site server listening on http://{}",
        config.addr
    );
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}
