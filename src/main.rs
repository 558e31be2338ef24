#![recursion_limit = "256"]

mod config;
mod db;
mod error;
mod routes;
mod services;
mod state;

use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = config::Config::from_env()?;
    let pool = db::init_pool(&config.database_url, config.db_max_connections).await?;
    tokio::fs::create_dir_all(&config.images_dir).await?;

    let state = state::AppState::new(pool, &config);
    let app = routes::leptos_app(state)?;
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;

    tracing::info!(
        port = config.port,
        images_dir = %config.images_dir.display(),
        display_offset = %config.display_offset,
        "smartfeeder listening"
    );
    axum::serve(listener, app).await?;
    Ok(())
}
