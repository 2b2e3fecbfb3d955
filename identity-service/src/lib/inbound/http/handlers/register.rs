use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::principal::models::Principal;
use crate::principal::models::RegisterCommand;
use crate::principal::models::Username;
use crate::principal::ports::IdentityServicePort;
use crate::principal::ports::PrincipalRepository;

pub async fn register<R>(
    State(state): State<AppState<R>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<RegisterResponseData>, ApiError>
where
    R: PrincipalRepository,
{
    let username = Username::new(body.username)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .identity_service
        .register(RegisterCommand::new(username, body.password))
        .await
        .map_err(ApiError::from)
        .map(|ref principal| ApiSuccess::new(StatusCode::CREATED, principal.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    username: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterResponseData {
    pub username: String,
    pub role: String,
}

impl From<&Principal> for RegisterResponseData {
    fn from(principal: &Principal) -> Self {
        Self {
            username: principal.username.to_string(),
            role: principal.role.clone(),
        }
    }
}
