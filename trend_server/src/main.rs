mod analyze;
mod docs;
mod error;
mod info;
mod router;
mod session;
mod state;

use std::sync::Arc;

use dotenvy::dotenv;
use log::info;
use router::router;
use state::ServerState;
use trend_core::config::TrendConfig;

#[tokio::main(flavor = "multi_thread", worker_threads = 4)]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = TrendConfig::from_env()?;
    let state = Arc::new(ServerState::from_config(&config).await?);

    let app = router(state, &config.cors_origins);

    let listener = tokio::net::TcpListener::bind(&config.server_domain).await?;
    info!("trend_server listening on {}", config.server_domain);

    axum::serve(listener, app).await?;

    Ok(())
}
