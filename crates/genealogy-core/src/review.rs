//! The review workflow.
//!
//! [`ReviewQueue`] instantiates the three-state workflow for one
//! [`ReviewKind`]. Transitions are unconditional and last-write-wins:
//! there is no terminal state and no history. Only the target kind varies
//! between instantiations; the transition rules are shared.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  assertion::Assertion,
  limit::Limit,
  person::Person,
  relationship::Relationship,
  status::{BulkTransition, ReviewKind, ReviewStatus, Transition},
  store::GenealogyStore,
  text::supplied,
};

/// Default page size for [`ReviewQueue::list_unreviewed`].
pub const DEFAULT_PENDING_LIMIT: i64 = 50;

/// A row returned from a pending-review listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewRecord {
  Person(Person),
  Relationship(Relationship),
  Assertion(Assertion),
}

/// The review workflow bound to a store and an entity kind.
pub struct ReviewQueue<'s, S> {
  store: &'s S,
  kind:  ReviewKind,
}

impl<'s, S: GenealogyStore> ReviewQueue<'s, S> {
  pub fn new(store: &'s S, kind: ReviewKind) -> Self { Self { store, kind } }

  /// Mark one record verified. An empty `notes` keeps the stored note.
  pub async fn mark_verified(&self, id: Uuid, notes: Option<&str>) -> Result<Transition> {
    self.transition(id, ReviewStatus::Verified, notes).await
  }

  /// Mark one record rejected. An empty `reason` keeps the stored note.
  pub async fn mark_rejected(&self, id: Uuid, reason: Option<&str>) -> Result<Transition> {
    self.transition(id, ReviewStatus::Rejected, reason).await
  }

  /// Mark every listed record verified. Stored notes are left untouched.
  pub async fn bulk_mark_verified(&self, ids: Vec<Uuid>) -> Result<BulkTransition> {
    self.bulk_transition(ids, ReviewStatus::Verified, None).await
  }

  /// Mark every listed record rejected, recording `reason` if non-empty.
  pub async fn bulk_mark_rejected(
    &self,
    ids: Vec<Uuid>,
    reason: Option<&str>,
  ) -> Result<BulkTransition> {
    self.bulk_transition(ids, ReviewStatus::Rejected, reason).await
  }

  /// Records still awaiting review, oldest first.
  pub async fn list_unreviewed(&self, limit: Limit) -> Result<Vec<ReviewRecord>> {
    self
      .store
      .list_pending_review(self.kind, limit)
      .await
      .map_err(Error::store)
  }

  async fn transition(
    &self,
    id: Uuid,
    status: ReviewStatus,
    note: Option<&str>,
  ) -> Result<Transition> {
    let changed = self
      .store
      .set_review_status(self.kind, vec![id], status, supplied(note))
      .await
      .map_err(Error::store)?;
    if changed == 0 {
      return Err(Error::review_not_found(self.kind, id));
    }

    tracing::info!(kind = %self.kind, %id, %status, "review status changed");
    Ok(Transition { kind: self.kind, id, status })
  }

  /// Apply `status` to `ids` in one statement.
  ///
  /// The reported count is the number of ids requested. Ids with no row are
  /// skipped silently, so callers cannot tell full success from partial
  /// success by the result alone.
  async fn bulk_transition(
    &self,
    ids: Vec<Uuid>,
    status: ReviewStatus,
    note: Option<&str>,
  ) -> Result<BulkTransition> {
    if ids.is_empty() {
      return Err(Error::NoIds);
    }
    let requested = ids.len();
    let changed = self
      .store
      .set_review_status(self.kind, ids, status, supplied(note))
      .await
      .map_err(Error::store)?;

    tracing::debug!(kind = %self.kind, requested, changed, %status, "bulk review update");
    Ok(BulkTransition { kind: self.kind, requested, status })
  }
}
