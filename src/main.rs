use gecom::{AppState, build_app, config::Config, db, init_tracing};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env()?;
    init_tracing(&config);

    let pool = db::create_pool(&config.database())?;
    let addr: SocketAddr = config.server_address().parse()?;

    let state = Arc::new(AppState::new(pool, config));
    let app = build_app(state);

    tracing::info!(%addr, "GECOM server listening");
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
