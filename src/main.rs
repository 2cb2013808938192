use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use log::{info, warn};

use octometrics::routes;
use octometrics::{AppState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env();
    if config.github_token.is_none() {
        warn!("GH_TOKEN environment variable not set; metrics requests will be rejected");
    }

    let state = Arc::new(AppState::from_config(&config));
    let app = routes::router(state);

    let addr: SocketAddr = config.bind_addr.parse().context("parse BIND_ADDR")?;
    info!("listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("bind tcp listener")?;
    axum::serve(listener, app.into_make_service())
        .await
        .context("server shutdown")?;

    Ok(())
}
