//! The `GenealogyStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `genealogy-store-sqlite`). The family resolver, the review workflow and the
//! tool boundary depend on this abstraction, not on any concrete backend.
//!
//! Each method is one bounded unit of work against storage. Backends must
//! release whatever connection they borrow on every exit path and must not
//! retry on failure.

use std::future::Future;

use uuid::Uuid;

use crate::{
  assertion::{Assertion, NewAssertion, SubjectRef},
  event::{Event, EventParticipation, PersonEvent},
  limit::Limit,
  location::Location,
  note::{NewResearchNote, ResearchNote},
  person::{Person, PersonName},
  relationship::{NewRelationship, Relationship},
  review::ReviewRecord,
  status::{ReviewKind, ReviewStatus},
};

/// Abstraction over a genealogy record store.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait GenealogyStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── People ────────────────────────────────────────────────────────────

  /// Persist a new person. The caller has already validated `name`.
  fn create_person(
    &self,
    name: PersonName,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Batch fetch. Ids with no matching row are absent from the result; the
  /// order of the result is unspecified.
  fn get_persons(
    &self,
    ids: Vec<Uuid>,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Case-insensitive substring match on any name part, ordered by last
  /// name then first name with missing names last.
  fn search_persons(
    &self,
    text: String,
    limit: Limit,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Overwrite the name parts present in `name`, keeping the others.
  /// Returns `false` if no person has this id.
  fn update_person(
    &self,
    id: Uuid,
    name: PersonName,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Locations and events ──────────────────────────────────────────────

  fn create_location(
    &self,
    name: String,
  ) -> impl Future<Output = Result<Location, Self::Error>> + Send + '_;

  fn search_locations(
    &self,
    text: String,
    limit: Limit,
  ) -> impl Future<Output = Result<Vec<Location>, Self::Error>> + Send + '_;

  fn create_event(
    &self,
    event_type: String,
  ) -> impl Future<Output = Result<Event, Self::Error>> + Send + '_;

  /// Insert or replace the link between a person and an event.
  fn link_person_event(
    &self,
    link: PersonEvent,
  ) -> impl Future<Output = Result<PersonEvent, Self::Error>> + Send + '_;

  /// Events a person takes part in, ordered by event type.
  fn events_for_person(
    &self,
    person_id: Uuid,
    limit: Limit,
  ) -> impl Future<Output = Result<Vec<EventParticipation>, Self::Error>>
  + Send
  + '_;

  // ── Relationships ─────────────────────────────────────────────────────

  fn create_relationship(
    &self,
    input: NewRelationship,
  ) -> impl Future<Output = Result<Relationship, Self::Error>> + Send + '_;

  /// Every edge in which `person_id` occupies either endpoint, ordered by
  /// type. `None` returns all of them.
  fn relationships_for_person(
    &self,
    person_id: Uuid,
    limit: Option<Limit>,
  ) -> impl Future<Output = Result<Vec<Relationship>, Self::Error>> + Send + '_;

  // ── Assertions ────────────────────────────────────────────────────────

  fn add_assertion(
    &self,
    input: NewAssertion,
  ) -> impl Future<Output = Result<Assertion, Self::Error>> + Send + '_;

  /// Assertions about `subject`, ordered by id, optionally restricted to one
  /// field name.
  fn list_assertions(
    &self,
    subject: SubjectRef,
    field_name: Option<String>,
    limit: Limit,
  ) -> impl Future<Output = Result<Vec<Assertion>, Self::Error>> + Send + '_;

  // ── Research notes ────────────────────────────────────────────────────

  fn save_research_note(
    &self,
    input: NewResearchNote,
  ) -> impl Future<Output = Result<ResearchNote, Self::Error>> + Send + '_;

  /// Notes about a person, newest first.
  fn list_research_notes(
    &self,
    person_id: Uuid,
    limit: Limit,
  ) -> impl Future<Output = Result<Vec<ResearchNote>, Self::Error>> + Send + '_;

  /// Case-insensitive substring match on note text, newest first.
  fn search_research_notes(
    &self,
    text: String,
    limit: Limit,
  ) -> impl Future<Output = Result<Vec<ResearchNote>, Self::Error>> + Send + '_;

  // ── Review status ─────────────────────────────────────────────────────

  /// Set `status` on every row of `kind` whose id is in `ids`. `note`, when
  /// present, replaces the stored status note; `None` keeps it. Returns the
  /// number of rows actually changed.
  fn set_review_status(
    &self,
    kind: ReviewKind,
    ids: Vec<Uuid>,
    status: ReviewStatus,
    note: Option<String>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Rows of `kind` still pending review, oldest first.
  fn list_pending_review(
    &self,
    kind: ReviewKind,
    limit: Limit,
  ) -> impl Future<Output = Result<Vec<ReviewRecord>, Self::Error>> + Send + '_;
}
