use crate::AppState;
use crate::dbs::DbError;
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use shared::models::{CreatePersonalityRequest, ListPersonalitiesQuery, Personality};
use shared::validation::validate_request;
use uuid::Uuid;

pub async fn list_personalities(
    State(state): State<AppState>,
    Query(params): Query<ListPersonalitiesQuery>,
) -> Result<Json<Vec<Personality>>, StatusCode> {
    let personalities = state
        .db
        .get_personalities(params.creator_id)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list personalities: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;
    Ok(Json(personalities))
}

pub async fn get_personality(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<Personality>, StatusCode> {
    let personality = state.db.get_personality(&key).await.map_err(|e| {
        if matches!(e, DbError::NotFound(_)) {
            StatusCode::NOT_FOUND
        } else {
            tracing::error!("Failed to get personality: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })?;
    Ok(Json(personality))
}

pub async fn create_personality(
    State(state): State<AppState>,
    Json(payload): Json<CreatePersonalityRequest>,
) -> Result<Json<Personality>, StatusCode> {
    if let Err(e) = validate_request(&payload) {
        tracing::warn!("Rejected personality {}: {}", payload.key, e);
        return Err(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let personality = Personality::from_request(Uuid::new_v4(), payload);

    state
        .db
        .create_personality(personality.clone())
        .await
        .map_err(|e| match e {
            DbError::Conflict(key) => {
                tracing::warn!("Personality key already taken: {}", key);
                StatusCode::CONFLICT
            }
            e => {
                tracing::error!("Failed to create personality: {:?}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    tracing::info!(
        "Created {} personality {} for {}",
        personality.provider,
        personality.key,
        personality.creator_id
    );
    Ok(Json(personality))
}
