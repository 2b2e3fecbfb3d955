use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::principal::models::Principal;
use crate::principal::models::Username;
use crate::principal::ports::IdentityServicePort;
use crate::principal::ports::PrincipalRepository;

/// Paths reachable without a token. Matched exactly; everything else is
/// protected.
pub const PUBLIC_PATHS: &[&str] = &["/auth/login", "/auth/register"];

/// Per-request security context: the authenticated principal, stored in
/// request extensions. Absent unless the gate populated it.
#[derive(Debug, Clone)]
pub struct AuthenticatedPrincipal {
    pub username: String,
    pub role: String,
}

impl From<&Principal> for AuthenticatedPrincipal {
    fn from(principal: &Principal) -> Self {
        Self {
            username: principal.username.to_string(),
            role: principal.role.clone(),
        }
    }
}

/// The request gate.
///
/// Classifies each request as public or protected, and for protected
/// requests verifies any presented bearer token and annotates the request
/// with the resolved principal. The gate never rejects: every outcome
/// continues down the chain, and routes that require authentication
/// enforce it through [`CurrentPrincipal`]. Keeping classification here
/// and enforcement there lets the public path list evolve independently
/// of the token mechanics.
pub async fn annotate_principal<R>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: PrincipalRepository,
{
    if PUBLIC_PATHS.contains(&req.uri().path()) {
        return next.run(req).await;
    }

    let Some(token) = bearer_token(&req).map(str::to_string) else {
        return next.run(req).await;
    };

    let subject = match state.authenticator.parse_subject(&token) {
        Ok(subject) => subject,
        Err(e) => {
            tracing::debug!(error = %e, "Discarding unverifiable bearer token");
            return next.run(req).await;
        }
    };

    // The gate runs at most once per request; a context populated earlier
    // in the chain is left untouched.
    if req.extensions().get::<AuthenticatedPrincipal>().is_some() {
        return next.run(req).await;
    }

    // A signed subject that is not even a well-formed username cannot
    // resolve to a principal.
    let Ok(username) = Username::new(subject) else {
        return next.run(req).await;
    };

    let principal = match state.identity_service.resolve(&username).await {
        Ok(principal) => principal,
        Err(e) => {
            tracing::debug!(username = %username, error = %e, "Token subject did not resolve");
            return next.run(req).await;
        }
    };

    if state
        .authenticator
        .validate(&token, principal.username.as_str())
    {
        req.extensions_mut()
            .insert(AuthenticatedPrincipal::from(&principal));
    }

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

/// Extractor enforcing the per-route authentication policy.
///
/// Handlers that require an authenticated caller take this as an argument;
/// it rejects with 401 when the gate left the security context empty.
pub struct CurrentPrincipal(pub AuthenticatedPrincipal);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentPrincipal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(CurrentPrincipal)
            .ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))
    }
}
