// Tenant metadata and plan upgrade.

use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;

use jot_core::errors::JotError;
use jot_core::model::Plan;
use jot_core::policy;

use crate::error::ApiResult;
use crate::extract::AuthPrincipal;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/{slug}/upgrade", post(upgrade))
}

fn tenant_not_found() -> anyhow::Error {
    JotError::not_found("Tenant not found").into_anyhow()
}

/// `GET /tenants/me` — the caller's tenant row plus its current note count.
///
/// Clients read plan and usage from here instead of guessing them from the
/// token payload.
async fn me(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> ApiResult<Json<serde_json::Value>> {
    let tenant = state
        .store
        .tenant_by_id(principal.tenant_id)?
        .ok_or_else(tenant_not_found)?;
    let note_count = state.store.note_count(principal.tenant_id)?;

    Ok(Json(json!({
        "tenant": tenant,
        "note_count": note_count,
    })))
}

/// `POST /tenants/{slug}/upgrade` — flip the plan from free to pro.
///
/// Admin-only, and only for the caller's own tenant. The transition is
/// one-way; upgrading an already-pro tenant is rejected without touching
/// the row.
async fn upgrade(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(slug): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    policy::require_admin(&principal)?;

    let tenant = state
        .store
        .tenant_by_slug(&slug)?
        .ok_or_else(tenant_not_found)?;
    policy::require_same_tenant(&principal, tenant.id)?;

    if tenant.subscription_plan == Plan::Pro {
        return Err(JotError::bad_request("Tenant is already on Pro plan")
            .into_anyhow()
            .into());
    }

    let tenant = state
        .store
        .upgrade_tenant(tenant.id)?
        .ok_or_else(tenant_not_found)?;
    tracing::info!(tenant = %tenant.slug, "tenant upgraded to pro");

    Ok(Json(json!({
        "message": "Tenant upgraded to Pro plan successfully",
        "tenant": tenant,
    })))
}
