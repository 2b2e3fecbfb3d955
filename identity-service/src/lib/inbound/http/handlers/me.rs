use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentPrincipal;

/// Authenticated-identity probe. The `CurrentPrincipal` extractor is the
/// policy check: without a populated security context this handler is
/// never reached.
pub async fn me(CurrentPrincipal(principal): CurrentPrincipal) -> ApiSuccess<MeResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        MeResponseData {
            username: principal.username,
            role: principal.role,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MeResponseData {
    pub username: String,
    pub role: String,
}
