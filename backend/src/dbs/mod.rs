use async_trait::async_trait;
use shared::models::Personality;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

pub mod local;
pub mod postgres;

pub type DbResult<T> = Result<T, DbError>;

#[derive(Clone, Debug)]
pub enum DatabaseConfig {
    Local { path: PathBuf },
    Postgres { url: String },
}

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Entity not found: {0}")]
    NotFound(String),
    #[error("Duplicate key: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

#[async_trait]
pub trait Database: Send + Sync {
    /// All personalities, or only those created by `creator_id`.
    async fn get_personalities(&self, creator_id: Option<Uuid>) -> DbResult<Vec<Personality>>;
    async fn get_personality(&self, key: &str) -> DbResult<Personality>;
    /// Fails with [`DbError::Conflict`] when the key is already taken.
    async fn create_personality(&self, personality: Personality) -> DbResult<()>;
}

pub async fn connect(config: &DatabaseConfig) -> DbResult<Arc<dyn Database>> {
    match config {
        DatabaseConfig::Local { path } => {
            tracing::info!("Using local database at {}", path.display());
            Ok(Arc::new(local::LocalDatabase::load(path.clone())?))
        }
        DatabaseConfig::Postgres { url } => {
            tracing::info!("Connecting to PostgreSQL");
            Ok(Arc::new(postgres::PostgresDatabase::connect(url).await?))
        }
    }
}
