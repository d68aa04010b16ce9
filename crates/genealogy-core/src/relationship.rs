//! Relationship edges between two people.
//!
//! An edge records its endpoints positionally (`a`, `b`) but carries no
//! direction field of its own. What the edge means is spelled out by its
//! free-text `type` together with which slot a given person occupies; see
//! [`crate::family`] for the classification rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, status::ReviewState, text::non_empty};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
  pub id:            Uuid,
  pub person_id_a:   Uuid,
  pub person_id_b:   Uuid,
  #[serde(rename = "type")]
  pub relation_type: String,
  pub created_at:    DateTime<Utc>,
  #[serde(flatten)]
  pub review:        ReviewState,
}

impl Relationship {
  /// The endpoint opposite `person_id`. For a self-referential edge this is
  /// the person itself.
  pub fn other_endpoint(&self, person_id: Uuid) -> Uuid {
    if self.person_id_a == person_id {
      self.person_id_b
    } else {
      self.person_id_a
    }
  }
}

/// Input to [`crate::store::GenealogyStore::create_relationship`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRelationship {
  pub person_id_a:   Uuid,
  pub person_id_b:   Uuid,
  pub relation_type: String,
}

impl NewRelationship {
  pub fn new(a: Uuid, b: Uuid, relation_type: &str) -> Result<Self> {
    let relation_type = non_empty(Some(relation_type)).ok_or(Error::MissingType)?;
    Ok(Self { person_id_a: a, person_id_b: b, relation_type })
  }
}
