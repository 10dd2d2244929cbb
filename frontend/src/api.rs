use async_trait::async_trait;
use gloo_net::http::Request;
use shared::forms::{CreateError, PersonalityCreator};
use shared::models::*;
use uuid::Uuid;

const API_BASE: &str = "/api";

pub async fn fetch_personalities(creator_id: Uuid) -> Result<Vec<Personality>, gloo_net::Error> {
    Request::get(&format!(
        "{}/personalities?creator_id={}",
        API_BASE, creator_id
    ))
    .send()
    .await?
    .json()
    .await
}

pub async fn create_personality(
    req: &CreatePersonalityRequest,
) -> Result<Personality, CreateError> {
    let response = Request::post(&format!("{}/personalities", API_BASE))
        .json(req)
        .map_err(|e| CreateError::Transport(e.to_string()))?
        .send()
        .await
        .map_err(|e| CreateError::Transport(e.to_string()))?;

    if !response.ok() {
        return Err(CreateError::Status(response.status()));
    }

    response
        .json()
        .await
        .map_err(|e| CreateError::Decode(e.to_string()))
}

/// Backend-backed create operation handed to the form controllers.
#[derive(Clone, Copy, Debug, Default)]
pub struct ApiClient;

#[async_trait(?Send)]
impl PersonalityCreator for ApiClient {
    async fn create_personality(
        &self,
        request: CreatePersonalityRequest,
    ) -> Result<Personality, CreateError> {
        create_personality(&request).await
    }
}
