mod config;
mod error;
mod models;
mod pdf;
mod registry;
mod routes;

use std::sync::Arc;

use crate::{config::Config, models::AppState, pdf::PdfGenerator, registry::InMemoryRegistry};

use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use axum::http::header;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cfg = Config::from_env();

    let documents = PdfGenerator::new(cfg.pdf_dir.clone());
    documents.ensure_dir()?;

    let state = AppState {
        registry: Arc::new(InMemoryRegistry::new()),
        documents,
    };

    // Browser clients call from other origins; without this the OPTIONS
    // preflight returns 405.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]);

    let app = routes::router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on http://{}", cfg.bind_addr);
    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
