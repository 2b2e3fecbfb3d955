use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::login::login;
use super::handlers::me::me;
use super::handlers::register::register;
use super::middleware::annotate_principal;
use crate::domain::principal::service::IdentityService;
use crate::principal::ports::PrincipalRepository;

pub struct AppState<R: PrincipalRepository> {
    pub identity_service: Arc<IdentityService<R>>,
    pub authenticator: Arc<Authenticator>,
}

// Manual impl: #[derive(Clone)] would demand R: Clone, which the Arcs make
// unnecessary.
impl<R: PrincipalRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            identity_service: Arc::clone(&self.identity_service),
            authenticator: Arc::clone(&self.authenticator),
        }
    }
}

pub fn create_router<R>(
    identity_service: Arc<IdentityService<R>>,
    authenticator: Arc<Authenticator>,
) -> Router
where
    R: PrincipalRepository,
{
    let state = AppState {
        identity_service,
        authenticator,
    };

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    // The gate layer sees every route; it classifies public vs protected
    // itself so the route table stays flat.
    Router::new()
        .route("/auth/register", post(register::<R>))
        .route("/auth/login", post(login::<R>))
        .route("/auth/me", get(me))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            annotate_principal::<R>,
        ))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
