//! Tool-call boundary for the genealogy service.
//!
//! Exposes an axum [`Router`] backed by any [`GenealogyStore`]. Each tool is
//! invoked with `POST /tools/{name}` and a flat JSON argument object, and
//! answers with an [`Envelope`]. Auth and TLS are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, genealogy_api::api_router(Arc::new(store))).await?;
//! ```

pub mod args;
pub mod assertions;
pub mod envelope;
pub mod error;
pub mod ids;
pub mod notes;
pub mod persons;
pub mod records;
pub mod relationships;
pub mod review;
pub mod tools;


use std::sync::Arc;

use axum::{
  Router,
  body::Bytes,
  extract::{Path, State},
  response::{IntoResponse, Response},
  routing::{get, post},
};
use genealogy_core::store::GenealogyStore;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;

pub use envelope::Envelope;
pub use error::ToolError;

use args::Args;

/// Build the tool router for `store`.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: GenealogyStore + 'static,
{
  Router::new()
    .route("/tools", get(list_tools))
    .route("/tools/{name}", post(call_tool::<S>))
    .route("/health", get(health))
    .layer(TraceLayer::new_for_http())
    .with_state(store)
}

// ─── Handlers ────────────────────────────────────────────────────────────────

async fn call_tool<S>(
  State(store): State<Arc<S>>,
  Path(name): Path<String>,
  body: Bytes,
) -> Response
where
  S: GenealogyStore + 'static,
{
  let result = match parse_body(&body) {
    Ok(args) => tools::call(store.as_ref(), &name, args).await,
    Err(e) => Err(e),
  };
  match result {
    Ok(data) => Envelope::Ok { data }.into_response(),
    Err(e) => {
      tracing::debug!(tool = %name, code = e.code(), "tool failed");
      e.into_response()
    }
  }
}

async fn list_tools() -> Envelope {
  Envelope::Ok { data: json!({ "tools": tools::tool_names() }) }
}

async fn health() -> &'static str { "ok" }

/// An empty or whitespace-only body counts as `{}`.
fn parse_body(body: &[u8]) -> Result<Args, ToolError> {
  if body.iter().all(u8::is_ascii_whitespace) {
    return Ok(Args::default());
  }
  let value: Value = serde_json::from_slice(body)
    .map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
  Args::new(value)
}
