use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tower_http::trace::TraceLayer;

use shared_schedule::{
    config::AppConfig,
    db::connection,
    logging::init_tracing,
    realtime::RealtimeHandle,
    routes::{catch_panic_layer, router},
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        eprintln!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::from_env().context("failed to load config")?;
    init_tracing(&cfg.logging)?;

    let db = connection::connect(&cfg.database).await?;
    let hub = RealtimeHandle::spawn(cfg.realtime.clone());
    let addr: SocketAddr = cfg
        .bind_addr()
        .parse()
        .with_context(|| format!("invalid host/port '{}'", cfg.bind_addr()))?;

    let state = AppState::new(cfg, db, Arc::new(hub.clone()));
    let app = Router::new()
        .merge(router(Arc::clone(&state), hub))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http());

    tracing::info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
