//! Review status: the three-state verification model shared by people,
//! relationships and assertions.
//!
//! Every reviewable row starts out [`ReviewStatus::Unreviewed`]. Either
//! terminal-looking state can be left again: a rejected row may be verified
//! later and vice versa. Only the current status and its note are stored.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

/// Where a reviewable record sits in the verification workflow.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReviewStatus {
  /// Pending review. Storage may represent this as NULL.
  #[default]
  Unreviewed,
  Verified,
  Rejected,
}

/// The entity kinds the review workflow is instantiated for.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReviewKind {
  Person,
  Relationship,
  Assertion,
}

impl ReviewKind {
  pub const ALL: [Self; 3] = [Self::Person, Self::Relationship, Self::Assertion];
}

/// Status fields carried by every reviewable record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
  pub status:       ReviewStatus,
  pub status_notes: Option<String>,
}

/// Outcome of a single-entity transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
  pub kind:   ReviewKind,
  pub id:     Uuid,
  pub status: ReviewStatus,
}

/// Outcome of a bulk transition.
///
/// `requested` is the number of identifiers submitted, not the number of rows
/// that changed; unknown identifiers are skipped without being reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BulkTransition {
  pub kind:      ReviewKind,
  pub requested: usize,
  pub status:    ReviewStatus,
}
