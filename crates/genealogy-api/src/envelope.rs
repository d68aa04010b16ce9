//! The two result shapes every tool returns.

use axum::{
  Json,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::Value;

/// `{"status":"ok","data":…}` or `{"status":"error","error":…,"details":{…}}`.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope {
  Ok { data: Value },
  Error { error: &'static str, details: Value },
}

impl IntoResponse for Envelope {
  fn into_response(self) -> Response { Json(self).into_response() }
}
