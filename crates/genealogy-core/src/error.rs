//! Error types for `genealogy-core`.

use thiserror::Error;
use uuid::Uuid;

use crate::status::ReviewKind;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{kind} not found: {id}")]
  NotFound { kind: &'static str, id: Uuid },

  #[error("no identifiers supplied")]
  NoIds,

  #[error("a first or last name is required")]
  MissingName,

  #[error("a type is required")]
  MissingType,

  #[error("subject kind, subject id and field name are required")]
  MissingFields,

  #[error("note text is required")]
  MissingNote,

  #[error("unknown subject kind: {0:?}")]
  UnknownSubjectKind(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  pub fn person_not_found(id: Uuid) -> Self {
    Self::NotFound { kind: "person", id }
  }

  pub fn review_not_found(kind: ReviewKind, id: Uuid) -> Self {
    Self::NotFound { kind: kind.into(), id }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
