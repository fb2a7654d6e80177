// Login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use jot_auth::password;
use jot_core::errors::JotError;

use crate::error::{map_json_rejection, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

/// `POST /auth/login` — verify credentials and issue a session token.
///
/// Unknown email, wrong password, and blank fields are indistinguishable to
/// the caller.
async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<serde_json::Value>> {
    let Json(body) = body.map_err(map_json_rejection)?;

    let invalid = || JotError::not_authenticated("Invalid credentials").into_anyhow();

    let email = body.email.trim();
    if email.is_empty() || body.password.is_empty() {
        return Err(invalid().into());
    }

    let user = state.store.user_by_email(email)?.ok_or_else(invalid)?;
    if !password::verify(&body.password, &user.password_hash) {
        return Err(invalid().into());
    }

    let token = state.tokens.issue(&user)?;
    tracing::debug!(user = %user.email, "login succeeded");

    Ok(Json(json!({
        "token": token,
        "user": user.public(),
    })))
}
