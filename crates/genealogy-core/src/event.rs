//! Life events and the roles people play in them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role recorded when a link is created without one.
pub const DEFAULT_ROLE: &str = "subject";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  pub id:         Uuid,
  #[serde(rename = "type")]
  pub event_type: String,
  pub created_at: DateTime<Utc>,
}

/// A person's participation in an event. At most one link exists per
/// `(person_id, event_id)`; relinking replaces the role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonEvent {
  pub person_id: Uuid,
  pub event_id:  Uuid,
  pub role:      String,
}

/// An event as seen from one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventParticipation {
  #[serde(flatten)]
  pub event: Event,
  pub role:  String,
}
