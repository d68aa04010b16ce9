//! Tool error type and its `{status:"error", ...}` response shape.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use genealogy_core::Error as CoreError;
use serde_json::{Value, json};
use thiserror::Error;

use crate::envelope::Envelope;

/// Longest store error message returned to callers; the full text is logged.
const MAX_DETAIL_CHARS: usize = 200;

/// An error returned by a tool.
#[derive(Debug, Error)]
pub enum ToolError {
  #[error(transparent)]
  Core(#[from] CoreError),

  #[error("invalid identifier: {0:?}")]
  InvalidId(String),

  #[error("unknown tool: {0}")]
  UnknownTool(String),

  #[error("invalid arguments: {0}")]
  InvalidArguments(String),
}

impl ToolError {
  /// Wrap a storage backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Core(CoreError::store(e))
  }

  /// The machine-readable error code.
  pub fn code(&self) -> &'static str {
    match self {
      Self::Core(e) => match e {
        CoreError::NotFound { .. } => "not_found",
        CoreError::NoIds => "no_ids",
        CoreError::MissingName => "missing_name",
        CoreError::MissingType => "missing_type",
        CoreError::MissingFields => "missing_fields",
        CoreError::MissingNote => "missing_note",
        CoreError::UnknownSubjectKind(_) => "invalid_subject_kind",
        CoreError::Store(_) => "store_error",
      },
      Self::InvalidId(_) => "invalid_id",
      Self::UnknownTool(_) => "unknown_tool",
      Self::InvalidArguments(_) => "invalid_arguments",
    }
  }

  /// Structured context for the error; `{}` when there is none.
  pub fn details(&self) -> Value {
    match self {
      Self::Core(CoreError::NotFound { kind, id }) => json!({ "kind": kind, "id": id }),
      Self::Core(CoreError::UnknownSubjectKind(kind)) => json!({ "value": kind }),
      Self::Core(CoreError::Store(e)) => json!({ "message": bounded(e.to_string()) }),
      Self::InvalidId(value) => json!({ "value": value }),
      Self::UnknownTool(name) => json!({ "tool": name }),
      Self::InvalidArguments(message) => json!({ "message": message }),
      Self::Core(_) => json!({}),
    }
  }

  pub fn status_code(&self) -> StatusCode {
    match self {
      Self::Core(CoreError::NotFound { .. }) | Self::UnknownTool(_) => {
        StatusCode::NOT_FOUND
      }
      Self::Core(CoreError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
      _ => StatusCode::BAD_REQUEST,
    }
  }
}

impl IntoResponse for ToolError {
  fn into_response(self) -> Response {
    if let Self::Core(CoreError::Store(e)) = &self {
      tracing::error!(error = %e, "store error");
    }
    let body = Envelope::Error {
      error:   self.code(),
      details: self.details(),
    };
    (self.status_code(), body).into_response()
  }
}

fn bounded(message: String) -> String {
  match message.char_indices().nth(MAX_DETAIL_CHARS) {
    Some((cut, _)) => format!("{}…", &message[..cut]),
    None => message,
  }
}
