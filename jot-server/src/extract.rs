// The authorization guard.

use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use jot_auth::extract_bearer_token;
use jot_core::errors::JotError;
use jot_core::model::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracts the authenticated principal from the `Authorization` header.
///
/// A handler taking this extractor is never entered unauthenticated: a
/// missing header, a non-Bearer scheme, or a token that fails verification
/// all reject with 401 before the handler runs. Role checks stay with the
/// individual operations.
pub struct AuthPrincipal(pub Principal);

impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(extract_bearer_token)
            .and_then(|token| state.tokens.decode(token));

        match principal {
            Some(principal) => Ok(Self(principal)),
            None => Err(JotError::not_authenticated("Authentication required")
                .into_anyhow()
                .into()),
        }
    }
}
