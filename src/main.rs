use std::sync::Arc;

use items_api::{
    clock::SystemClock, config::AppConfig, db::connection, logging::init_tracing, routes::app,
    state::AppState,
};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            // Tracing is not up yet.
            eprintln!("failed to load config: {err:?}");
            std::process::exit(1);
        }
    };
    init_tracing(&cfg.logging.rust_log);

    let db = connection::connect(cfg.database()?).await?;
    let state = AppState::new(cfg, db, Arc::new(SystemClock));

    let addr = state.config.general.socket_addr()?;
    let app = app(Arc::clone(&state));

    tracing::info!(database = %state.config.database()?.path, "listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
