//! # Errors
//!
//! Jot uses a small set of structured errors that map one-to-one onto the
//! HTTP responses the service produces. Core goals:
//! - consistent status codes across every handler
//! - can be carried through `anyhow::Error` so `?` composes across crates
//! - transport-agnostic (the server crate decides how to serialize)
//!
//! Clients always receive `{"error": "<message>"}`; internal failures keep
//! their real cause server-side and present a generic message.

use std::fmt;

use anyhow::Error as AnyError;

/// A convenience result type for Jot core APIs.
pub type JotResult<T> = std::result::Result<T, AnyError>;

/// Error categories with their HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,       // 400
    NotAuthenticated, // 401
    Forbidden,        // 403
    NotFound,         // 404
    GeneralError,     // 500
}

impl ErrorKind {
    pub fn status_code(&self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotAuthenticated => 401,
            ErrorKind::Forbidden => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::GeneralError => 500,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::NotAuthenticated => "NotAuthenticated",
            ErrorKind::Forbidden => "Forbidden",
            ErrorKind::NotFound => "NotFound",
            ErrorKind::GeneralError => "GeneralError",
        }
    }
}

/// A structured Jot error that can live inside `anyhow::Error`.
#[derive(Debug)]
pub struct JotError {
    pub kind: ErrorKind,
    pub message: String,
    pub source: Option<AnyError>,
}

impl JotError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Convert into `anyhow::Error` so it flows through `?` chains.
    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    /// Downcast an `anyhow::Error` to a `JotError` if possible.
    pub fn from_anyhow(err: &AnyError) -> Option<&JotError> {
        err.chain().find_map(|e| e.downcast_ref::<JotError>())
    }

    /// Turn any error into a JotError:
    /// - if it is already a JotError, keep it (lossless)
    /// - otherwise wrap as GeneralError
    pub fn normalize(err: AnyError) -> JotError {
        match err.downcast::<JotError>() {
            Ok(jot) => jot,
            Err(other) => {
                JotError::new(ErrorKind::GeneralError, other.to_string()).with_source(other)
            }
        }
    }

    /// The message a client is allowed to see. Internal failures collapse to
    /// a generic message; their real cause stays server-side.
    pub fn client_message(&self) -> &str {
        match self.kind {
            ErrorKind::GeneralError => "Internal server error",
            _ => &self.message,
        }
    }

    /// The wire payload for every error response.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.client_message() })
    }

    // ---- Constructors ----

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg)
    }
    pub fn not_authenticated(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotAuthenticated, msg)
    }
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, msg)
    }
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg)
    }
    pub fn general_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::GeneralError, msg)
    }
}

impl fmt::Display for JotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.name(), self.code(), self.message)
    }
}

impl std::error::Error for JotError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_to_expected_status_codes() {
        assert_eq!(ErrorKind::BadRequest.status_code(), 400);
        assert_eq!(ErrorKind::NotAuthenticated.status_code(), 401);
        assert_eq!(ErrorKind::Forbidden.status_code(), 403);
        assert_eq!(ErrorKind::NotFound.status_code(), 404);
        assert_eq!(ErrorKind::GeneralError.status_code(), 500);
    }

    #[test]
    fn normalize_keeps_structured_errors_lossless() {
        let err = JotError::forbidden("Admin access required").into_anyhow();
        let back = JotError::normalize(err);
        assert_eq!(back.kind, ErrorKind::Forbidden);
        assert_eq!(back.message, "Admin access required");
    }

    #[test]
    fn normalize_wraps_plain_errors_as_general() {
        let err = anyhow::anyhow!("database exploded");
        let back = JotError::normalize(err);
        assert_eq!(back.kind, ErrorKind::GeneralError);
        assert_eq!(back.message, "database exploded");
    }

    #[test]
    fn client_payload_never_leaks_internal_detail() {
        let internal = JotError::general_error("SQLITE_BUSY at notes.rs:42");
        assert_eq!(internal.to_json(), serde_json::json!({"error": "Internal server error"}));

        let visible = JotError::not_found("Note not found");
        assert_eq!(visible.to_json(), serde_json::json!({"error": "Note not found"}));
    }

    #[test]
    fn from_anyhow_finds_error_through_context_chain() {
        let err = JotError::not_found("Note not found")
            .into_anyhow()
            .context("while handling request");
        let found = JotError::from_anyhow(&err).expect("should downcast");
        assert_eq!(found.kind, ErrorKind::NotFound);
    }
}
