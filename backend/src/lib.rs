mod dbs;
mod handlers;

use crate::dbs::Database;
use crate::handlers::{create_personality, get_personality, list_personalities};
use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use crate::dbs::{DatabaseConfig, DbError};

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
}

pub async fn init(router: Router<AppState>, config: DatabaseConfig) -> Result<Router<()>, DbError> {
    let db = dbs::connect(&config).await?;
    let state = AppState { db };

    Ok(router
        .route("/api/health", get(|| async { "OK" }))
        .route(
            "/api/personalities",
            get(list_personalities).post(create_personality),
        )
        .route("/api/personalities/{key}", get(get_personality))
        .layer(CorsLayer::permissive())
        .with_state(state))
}
