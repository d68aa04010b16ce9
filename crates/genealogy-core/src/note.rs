//! Research notes attached to a person.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, text::non_empty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchNote {
  pub id:         Uuid,
  pub person_id:  Uuid,
  pub note:       String,
  pub source_url: Option<String>,
  pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResearchNote {
  pub person_id:  Uuid,
  pub note:       String,
  pub source_url: Option<String>,
}

impl NewResearchNote {
  pub fn new(person_id: Uuid, note: &str, source_url: &str) -> Result<Self> {
    if note.trim().is_empty() {
      return Err(Error::MissingNote);
    }
    Ok(Self {
      person_id,
      note: note.to_owned(),
      source_url: non_empty(Some(source_url)),
    })
  }
}
