//! jot-server: the HTTP surface of Jot.
//!
//! Request flow: bearer-token guard ([`extract::AuthPrincipal`]) derives the
//! authenticated principal, route handlers validate input and apply the
//! tenant-scoped store operation, and [`error::ApiError`] maps every failure
//! onto the `{"error": ...}` wire shape.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router over an already-initialized state.
///
/// Schema creation and seeding happen before this is called; nothing on the
/// request path initializes anything.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/auth", routes::auth::router())
        .nest("/notes", routes::notes::router())
        .nest("/tenants", routes::tenants::router())
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}
