use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::principal::errors::IdentityError;
use crate::principal::models::Username;
use crate::principal::ports::IdentityServicePort;
use crate::principal::ports::PrincipalRepository;

/// Verify credentials and issue a bearer token.
///
/// Every credential-path failure — unparseable username, unknown username,
/// wrong password — produces the identical 401 body, so responses cannot
/// be used to probe which usernames exist.
pub async fn login<R>(
    State(state): State<AppState<R>>,
    Json(body): Json<LoginRequestBody>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError>
where
    R: PrincipalRepository,
{
    let username = Username::new(body.username).map_err(|_| invalid_credentials())?;

    let principal = state
        .identity_service
        .resolve(&username)
        .await
        .map_err(|e| match e {
            IdentityError::NotFound(_) => invalid_credentials(),
            other => ApiError::from(other),
        })?;

    let result = state
        .authenticator
        .authenticate(
            &body.password,
            &principal.password_hash,
            principal.username.as_str(),
        )
        .map_err(|e| match e {
            auth::AuthenticationError::InvalidCredentials => invalid_credentials(),
            auth::AuthenticationError::Password(err) => {
                ApiError::InternalServerError(format!("Password verification failed: {}", err))
            }
            auth::AuthenticationError::Token(err) => {
                ApiError::InternalServerError(format!("Token issuance failed: {}", err))
            }
        })?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        LoginResponseData {
            token: result.access_token,
        },
    ))
}

fn invalid_credentials() -> ApiError {
    ApiError::Unauthorized("Invalid credentials".to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    username: String,
    password: String,
}

/// The token is a single opaque string; callers must not pick it apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub token: String,
}
