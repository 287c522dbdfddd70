mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use md_pull_sdk::{AsyncPullSdk, FixupTable, InMemoryCatalog};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use config::ServiceConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = ServiceConfig::from_env();

    let mut builder = AsyncPullSdk::builder().offline(cfg.offline);
    if let Some(dir) = &cfg.cache_dir {
        builder = builder.cache_dir(dir);
    }
    if let Some(path) = &cfg.fixups_path {
        let fixups = FixupTable::from_path(path).expect("Failed to load fixup table");
        builder = builder.fixups(fixups);
    }
    if let Some(path) = &cfg.catalog_path {
        let catalog = InMemoryCatalog::from_path(path).expect("Failed to load catalog snapshot");
        tracing::info!(path = %path.display(), "using catalog snapshot");
        builder = builder.catalog(catalog);
    }

    let sdk = builder.build().await.expect("Failed to initialize pull SDK");
    let state = Arc::new(AppState { sdk });

    let app = Router::new()
        .route("/api/pull", post(routes::pulls::perform_pulls))
        .route("/api/packs", get(routes::packs::list_packs))
        .route("/api/version", get(routes::meta::get_version))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", cfg.port);
    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
