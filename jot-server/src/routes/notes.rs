// Note CRUD. Every operation is scoped to the caller's tenant; a note in
// another tenant answers exactly like a missing one.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::json;

use jot_core::errors::JotError;
use jot_core::model::Note;
use jot_store::NoteCreation;

use crate::error::{map_json_rejection, ApiResult};
use crate::extract::AuthPrincipal;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_note).put(update).delete(remove))
}

#[derive(Deserialize)]
struct NotePayload {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

impl NotePayload {
    /// Both fields are required; blank counts as missing. No partial updates.
    fn validated(self) -> ApiResult<(String, String)> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(JotError::bad_request("Title and content are required")
                .into_anyhow()
                .into());
        }
        Ok((self.title, self.content))
    }
}

fn note_not_found() -> anyhow::Error {
    JotError::not_found("Note not found").into_anyhow()
}

/// `GET /notes` — the tenant's notes, newest-created first.
async fn list(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
) -> ApiResult<Json<Vec<Note>>> {
    let notes = state.store.notes_for_tenant(principal.tenant_id)?;
    Ok(Json(notes))
}

/// `GET /notes/{id}`
async fn get_note(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i64>,
) -> ApiResult<Json<Note>> {
    let note = state
        .store
        .note_for_tenant(principal.tenant_id, id)?
        .ok_or_else(note_not_found)?;
    Ok(Json(note))
}

/// `POST /notes` — create a note, enforcing the free-plan quota.
async fn create(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    body: Result<Json<NotePayload>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = body.map_err(map_json_rejection)?;
    let (title, content) = payload.validated()?;

    match state
        .store
        .create_note(principal.tenant_id, principal.user_id, &title, &content)?
    {
        NoteCreation::Created(note) => Ok((StatusCode::CREATED, Json(note))),
        NoteCreation::LimitReached => Err(JotError::forbidden(
            "Free plan limit reached. Upgrade to Pro for unlimited notes.",
        )
        .into_anyhow()
        .into()),
    }
}

/// `PUT /notes/{id}` — replace title and content, refreshing `updated_at`.
async fn update(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i64>,
    body: Result<Json<NotePayload>, JsonRejection>,
) -> ApiResult<Json<Note>> {
    let Json(payload) = body.map_err(map_json_rejection)?;
    let (title, content) = payload.validated()?;

    let note = state
        .store
        .update_note(principal.tenant_id, id, &title, &content)?
        .ok_or_else(note_not_found)?;
    Ok(Json(note))
}

/// `DELETE /notes/{id}`
async fn remove(
    State(state): State<AppState>,
    AuthPrincipal(principal): AuthPrincipal,
    Path(id): Path<i64>,
) -> ApiResult<Json<serde_json::Value>> {
    if !state.store.delete_note(principal.tenant_id, id)? {
        return Err(note_not_found().into());
    }
    Ok(Json(json!({ "message": "Note deleted successfully" })))
}
