//! devprojects server: reads config from the environment (and `.env`), connects to PostgreSQL and serves the API.
//!
//! Run from repo root: `cargo run -p devprojects-server`

use devprojects::{api_router, AppState, PgStore, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::load()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("devprojects=info,tower_http=info")),
        )
        .init();

    let store = PgStore::connect(&config.database_url, config.max_connections).await?;
    let state = AppState::new(store);

    let app = api_router(state, config.body_limit);
    let listener = TcpListener::bind(config.listen_addr).await?;
    tracing::info!("devprojects listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
