//! Named places.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
  pub id:         Uuid,
  pub name:       String,
  pub created_at: DateTime<Utc>,
}
