//! Integration tests for `SqliteStore` against an in-memory database,
//! including the family resolver and review workflow running on top of it.

use genealogy_core::{
  Error as CoreError,
  assertion::{NewAssertion, SOURCE_LINK_FIELD, SubjectKind, SubjectRef},
  event::PersonEvent,
  family::resolve_family_group,
  limit::Limit,
  note::NewResearchNote,
  person::{Person, PersonName},
  relationship::NewRelationship,
  review::{ReviewQueue, ReviewRecord},
  status::{ReviewKind, ReviewStatus},
  store::GenealogyStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

async fn person(s: &SqliteStore, first: &str, last: &str) -> Person {
  s.create_person(PersonName::from_parts(first, "", last))
    .await
    .unwrap()
}

async fn relate(s: &SqliteStore, a: Uuid, b: Uuid, kind: &str) -> Uuid {
  s.create_relationship(NewRelationship::new(a, b, kind).unwrap())
    .await
    .unwrap()
    .id
}

fn ids(people: &[Person]) -> Vec<Uuid> { people.iter().map(|p| p.id).collect() }

// ─── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let s = store().await;
  let ada = person(&s, "Ada", "Lovelace").await;

  let fetched = s.get_person(ada.id).await.unwrap().unwrap();
  assert_eq!(fetched.first_name.as_deref(), Some("Ada"));
  assert_eq!(fetched.middle_name, None);
  assert_eq!(fetched.review.status, ReviewStatus::Unreviewed);
  assert_eq!(fetched.review.status_notes, None);
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  assert!(s.get_person(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn search_is_case_insensitive_and_ordered() {
  let s = store().await;
  person(&s, "Mary", "Smith").await;
  person(&s, "John", "Smithers").await;
  person(&s, "Anne", "Baker").await;
  s.create_person(PersonName::from_parts("Smithy", "", ""))
    .await
    .unwrap();

  let found = s
    .search_persons("smith".into(), Limit::clamped(20, Limit::SEARCH_MAX))
    .await
    .unwrap();
  let names: Vec<_> = found.iter().map(|p| p.first_name.as_deref()).collect();
  // Missing last names sort after present ones.
  assert_eq!(names, [Some("Mary"), Some("John"), Some("Smithy")]);

  let capped = s
    .search_persons("smith".into(), Limit::clamped(1, Limit::SEARCH_MAX))
    .await
    .unwrap();
  assert_eq!(capped.len(), 1);
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
  let s = store().await;
  let emile = person(&s, "Émile", "Öberg").await;
  person(&s, "Emil", "Oberg").await;
  let limit = Limit::clamped(20, Limit::SEARCH_MAX);

  for needle in ["émile", "ÉMILE", "öberg", "ÖBERG"] {
    let found = s.search_persons(needle.into(), limit).await.unwrap();
    assert_eq!(ids(&found), [emile.id], "query {needle:?}");
  }

  s.create_location("Ålesund".into()).await.unwrap();
  let places = s.search_locations("åles".into(), limit).await.unwrap();
  assert_eq!(places.len(), 1);

  s.save_research_note(NewResearchNote::new(emile.id, "Baptised at SANKT GÖRAN", "").unwrap())
    .await
    .unwrap();
  let notes = s
    .search_research_notes("göran".into(), Limit::clamped(100, Limit::LIST_MAX))
    .await
    .unwrap();
  assert_eq!(notes.len(), 1);
}

#[tokio::test]
async fn update_person_keeps_blank_parts() {
  let s = store().await;
  let p = person(&s, "Ada", "Byron").await;

  let found = s
    .update_person(p.id, PersonName::from_parts("", "Augusta", "Lovelace"))
    .await
    .unwrap();
  assert!(found);

  let p = s.get_person(p.id).await.unwrap().unwrap();
  assert_eq!(p.first_name.as_deref(), Some("Ada"));
  assert_eq!(p.middle_name.as_deref(), Some("Augusta"));
  assert_eq!(p.last_name.as_deref(), Some("Lovelace"));
}

#[tokio::test]
async fn update_missing_person_reports_false() {
  let s = store().await;
  let found = s
    .update_person(Uuid::new_v4(), PersonName::from_parts("X", "", ""))
    .await
    .unwrap();
  assert!(!found);
}

// ─── Locations, events, notes, assertions ────────────────────────────────────

#[tokio::test]
async fn locations_search_by_name() {
  let s = store().await;
  s.create_location("Cork, Ireland".into()).await.unwrap();
  s.create_location("Boston".into()).await.unwrap();
  s.create_location("New York".into()).await.unwrap();

  let found = s
    .search_locations("o".into(), Limit::clamped(20, Limit::SEARCH_MAX))
    .await
    .unwrap();
  let names: Vec<_> = found.iter().map(|l| l.name.as_str()).collect();
  assert_eq!(names, ["Boston", "Cork, Ireland", "New York"]);
}

#[tokio::test]
async fn relinking_an_event_replaces_the_role() {
  let s = store().await;
  let p = person(&s, "Ada", "Lovelace").await;
  let birth = s.create_event("birth".into()).await.unwrap();
  let marriage = s.create_event("marriage".into()).await.unwrap();

  for (event_id, role) in [(birth.id, "subject"), (marriage.id, "witness"), (marriage.id, "bride")] {
    s.link_person_event(PersonEvent { person_id: p.id, event_id, role: role.into() })
      .await
      .unwrap();
  }

  let events = s
    .events_for_person(p.id, Limit::clamped(100, Limit::LIST_MAX))
    .await
    .unwrap();
  let got: Vec<_> = events
    .iter()
    .map(|e| (e.event.event_type.as_str(), e.role.as_str()))
    .collect();
  assert_eq!(got, [("birth", "subject"), ("marriage", "bride")]);
}

#[tokio::test]
async fn research_notes_newest_first() {
  let s = store().await;
  let p = person(&s, "Ada", "Lovelace").await;
  let first = NewResearchNote::new(p.id, "Parish register entry", "").unwrap();
  let second = NewResearchNote::new(p.id, "Census 1841", "https://example.org/c").unwrap();
  s.save_research_note(first).await.unwrap();
  s.save_research_note(second).await.unwrap();

  let notes = s
    .list_research_notes(p.id, Limit::clamped(100, Limit::LIST_MAX))
    .await
    .unwrap();
  assert_eq!(notes.len(), 2);
  assert_eq!(notes[0].note, "Census 1841");
  assert_eq!(notes[0].source_url.as_deref(), Some("https://example.org/c"));
  assert_eq!(notes[1].source_url, None);

  let hits = s
    .search_research_notes("PARISH".into(), Limit::clamped(100, Limit::LIST_MAX))
    .await
    .unwrap();
  assert_eq!(hits.len(), 1);
}

#[tokio::test]
async fn assertions_filter_by_subject_and_field() {
  let s = store().await;
  let p = person(&s, "Ada", "Lovelace").await;
  let subject = SubjectRef::person(p.id);

  s.add_assertion(NewAssertion::source_link(p.id, "FamilySearch:ABC"))
    .await
    .unwrap();
  s.add_assertion(
    NewAssertion::from_parts("person", Some(p.id), "birth_year", "1815").unwrap(),
  )
  .await
  .unwrap();
  // Subjects are never checked for existence.
  s.add_assertion(
    NewAssertion::from_parts("location", Some(Uuid::new_v4()), "name", "Nowhere")
      .unwrap(),
  )
  .await
  .unwrap();

  let limit = Limit::clamped(200, Limit::LIST_MAX);
  let all = s.list_assertions(subject, None, limit).await.unwrap();
  assert_eq!(all.len(), 2);
  assert!(all.iter().all(|a| a.subject() == subject));

  let sources = s
    .list_assertions(subject, Some(SOURCE_LINK_FIELD.into()), limit)
    .await
    .unwrap();
  assert_eq!(sources.len(), 1);
  assert_eq!(sources[0].asserted_value, "FamilySearch:ABC");
  assert_eq!(sources[0].subject_kind, SubjectKind::Person);
}

// ─── Family groups ───────────────────────────────────────────────────────────

#[tokio::test]
async fn family_group_parent_and_spouse() {
  let s = store().await;
  let a = person(&s, "A", "X").await;
  let b = person(&s, "B", "X").await;
  let c = person(&s, "C", "Y").await;
  relate(&s, a.id, b.id, "parent").await;
  relate(&s, a.id, c.id, "spouse").await;

  let group = resolve_family_group(&s, a.id).await.unwrap();
  assert_eq!(group.person.id, a.id);
  assert_eq!(ids(&group.children), [b.id]);
  assert_eq!(ids(&group.spouses), [c.id]);
  assert!(group.parents.is_empty());

  // The same edges read from the other side.
  let from_b = resolve_family_group(&s, b.id).await.unwrap();
  assert_eq!(ids(&from_b.parents), [a.id]);
  let from_c = resolve_family_group(&s, c.id).await.unwrap();
  assert_eq!(ids(&from_c.spouses), [a.id]);
}

#[tokio::test]
async fn family_group_child_edges() {
  let s = store().await;
  let p = person(&s, "P", "").await;
  let q = person(&s, "Q", "").await;
  let r = person(&s, "R", "").await;
  relate(&s, p.id, q.id, "Daughter").await;
  relate(&s, r.id, p.id, "child").await;

  let group = resolve_family_group(&s, p.id).await.unwrap();
  assert_eq!(ids(&group.parents), [q.id]);
  assert_eq!(ids(&group.children), [r.id]);
}

#[tokio::test]
async fn family_group_duplicates_and_unknown_types() {
  let s = store().await;
  let p = person(&s, "P", "").await;
  let q = person(&s, "Q", "").await;
  relate(&s, p.id, q.id, "spouse").await;
  relate(&s, q.id, p.id, "partner").await;
  relate(&s, p.id, q.id, "spouse").await;
  relate(&s, p.id, q.id, "cousin").await;

  let group = resolve_family_group(&s, p.id).await.unwrap();
  assert_eq!(ids(&group.spouses), [q.id]);
  assert!(group.parents.is_empty());
  assert!(group.children.is_empty());
}

#[tokio::test]
async fn family_group_drops_dangling_endpoints() {
  let s = store().await;
  let p = person(&s, "P", "").await;
  let q = person(&s, "Q", "").await;
  relate(&s, p.id, q.id, "father").await;
  relate(&s, p.id, Uuid::new_v4(), "mother").await;

  let group = resolve_family_group(&s, p.id).await.unwrap();
  assert_eq!(ids(&group.children), [q.id]);
}

#[tokio::test]
async fn family_group_lists_are_sorted_by_id() {
  let s = store().await;
  let p = person(&s, "P", "").await;
  let mut kids = Vec::new();
  for name in ["K1", "K2", "K3", "K4"] {
    let k = person(&s, name, "").await;
    relate(&s, p.id, k.id, "parent").await;
    kids.push(k.id);
  }
  kids.sort();

  let group = resolve_family_group(&s, p.id).await.unwrap();
  assert_eq!(ids(&group.children), kids);
}

#[tokio::test]
async fn family_group_without_edges_is_empty() {
  let s = store().await;
  let p = person(&s, "Solo", "").await;

  let group = resolve_family_group(&s, p.id).await.unwrap();
  assert!(group.parents.is_empty());
  assert!(group.children.is_empty());
  assert!(group.spouses.is_empty());
}

#[tokio::test]
async fn family_group_missing_person_is_not_found() {
  let s = store().await;
  let missing = Uuid::new_v4();
  let err = resolve_family_group(&s, missing).await.unwrap_err();
  assert!(matches!(err, CoreError::NotFound { kind: "person", id } if id == missing));
}

#[tokio::test]
async fn family_group_self_referential_edges() {
  let s = store().await;
  let p = person(&s, "Ouroboros", "").await;
  relate(&s, p.id, p.id, "spouse").await;
  relate(&s, p.id, p.id, "parent").await;
  relate(&s, p.id, p.id, "son").await;

  let group = resolve_family_group(&s, p.id).await.unwrap();
  assert_eq!(ids(&group.spouses), [p.id]);
  assert_eq!(ids(&group.parents), [p.id]);
  assert!(group.children.is_empty());
}

// ─── Review workflow ─────────────────────────────────────────────────────────

#[tokio::test]
async fn verify_then_reject_is_last_write_wins() {
  let s = store().await;
  let p = person(&s, "Ada", "").await;
  let queue = ReviewQueue::new(&s, ReviewKind::Person);

  queue.mark_verified(p.id, Some("census match")).await.unwrap();
  let t = queue.mark_rejected(p.id, None).await.unwrap();
  assert_eq!(t.status, ReviewStatus::Rejected);

  let p = s.get_person(p.id).await.unwrap().unwrap();
  assert_eq!(p.review.status, ReviewStatus::Rejected);
  assert_eq!(p.review.status_notes.as_deref(), Some("census match"));

  // Rejected is not terminal.
  queue.mark_verified(p.id, None).await.unwrap();
  let p = s.get_person(p.id).await.unwrap().unwrap();
  assert_eq!(p.review.status, ReviewStatus::Verified);
}

#[tokio::test]
async fn blank_notes_preserve_previous_notes() {
  let s = store().await;
  let p = person(&s, "Ada", "").await;
  let queue = ReviewQueue::new(&s, ReviewKind::Person);

  queue.mark_verified(p.id, Some("X")).await.unwrap();
  queue.mark_verified(p.id, Some("")).await.unwrap();
  let stored = s.get_person(p.id).await.unwrap().unwrap();
  assert_eq!(stored.review.status_notes.as_deref(), Some("X"));

  queue.mark_verified(p.id, Some(" X ")).await.unwrap();
  let stored = s.get_person(p.id).await.unwrap().unwrap();
  assert_eq!(stored.review.status_notes.as_deref(), Some(" X "));

  queue.mark_rejected(p.id, Some("duplicate of another record")).await.unwrap();
  let stored = s.get_person(p.id).await.unwrap().unwrap();
  assert_eq!(
    stored.review.status_notes.as_deref(),
    Some("duplicate of another record")
  );
}

#[tokio::test]
async fn transitions_on_missing_rows_are_not_found() {
  let s = store().await;
  for kind in ReviewKind::ALL {
    let queue = ReviewQueue::new(&s, kind);
    let missing = Uuid::new_v4();
    let err = queue.mark_verified(missing, None).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { id, .. } if id == missing));
    assert!(queue.mark_rejected(missing, Some("r")).await.is_err());
  }
}

#[tokio::test]
async fn relationship_and_assertion_transitions() {
  let s = store().await;
  let p = person(&s, "P", "").await;
  let q = person(&s, "Q", "").await;
  let rel = relate(&s, p.id, q.id, "spouse").await;
  let claim = s
    .add_assertion(NewAssertion::source_link(p.id, "register p.12"))
    .await
    .unwrap();

  ReviewQueue::new(&s, ReviewKind::Relationship)
    .mark_rejected(rel, Some("wrong couple"))
    .await
    .unwrap();
  ReviewQueue::new(&s, ReviewKind::Assertion)
    .mark_verified(claim.id, Some("checked"))
    .await
    .unwrap();

  let edges = s.relationships_for_person(p.id, None).await.unwrap();
  assert_eq!(edges[0].review.status, ReviewStatus::Rejected);
  assert_eq!(edges[0].review.status_notes.as_deref(), Some("wrong couple"));

  let claims = s
    .list_assertions(SubjectRef::person(p.id), None, Limit::clamped(10, 500))
    .await
    .unwrap();
  assert_eq!(claims[0].review.status, ReviewStatus::Verified);

  // The person itself is untouched.
  let p = s.get_person(p.id).await.unwrap().unwrap();
  assert_eq!(p.review.status, ReviewStatus::Unreviewed);
}

#[tokio::test]
async fn bulk_reject_reports_requested_count() {
  let s = store().await;
  let valid = person(&s, "Valid", "").await;
  let bystander = person(&s, "Bystander", "").await;
  let queue = ReviewQueue::new(&s, ReviewKind::Person);

  let result = queue
    .bulk_mark_rejected(vec![valid.id, Uuid::new_v4()], Some("bad transcription"))
    .await
    .unwrap();
  assert_eq!(result.requested, 2);
  assert_eq!(result.status, ReviewStatus::Rejected);

  let valid = s.get_person(valid.id).await.unwrap().unwrap();
  assert_eq!(valid.review.status, ReviewStatus::Rejected);
  assert_eq!(valid.review.status_notes.as_deref(), Some("bad transcription"));
  let bystander = s.get_person(bystander.id).await.unwrap().unwrap();
  assert_eq!(bystander.review.status, ReviewStatus::Unreviewed);
}

#[tokio::test]
async fn bulk_beyond_the_parameter_cap_updates_every_chunk() {
  let s = store().await;
  let first = person(&s, "First", "").await;
  let last = person(&s, "Last", "").await;

  let mut batch = vec![first.id];
  batch.extend((0..40_000).map(|_| Uuid::new_v4()));
  batch.push(last.id);

  let result = ReviewQueue::new(&s, ReviewKind::Person)
    .bulk_mark_verified(batch)
    .await
    .unwrap();
  assert_eq!(result.requested, 40_002);

  for p in [first.id, last.id] {
    let p = s.get_person(p).await.unwrap().unwrap();
    assert_eq!(p.review.status, ReviewStatus::Verified);
  }
}

#[tokio::test]
async fn get_persons_beyond_the_parameter_cap() {
  let s = store().await;
  let known = person(&s, "Known", "").await;
  let mut wanted: Vec<Uuid> = (0..33_000).map(|_| Uuid::new_v4()).collect();
  wanted.push(known.id);

  let found = s.get_persons(wanted).await.unwrap();
  assert_eq!(ids(&found), [known.id]);
}

#[tokio::test]
async fn bulk_verify_leaves_notes_alone() {
  let s = store().await;
  let a = person(&s, "A", "").await;
  let b = person(&s, "B", "").await;
  let queue = ReviewQueue::new(&s, ReviewKind::Person);
  queue.mark_rejected(a.id, Some("first pass")).await.unwrap();

  let result = queue.bulk_mark_verified(vec![a.id, b.id]).await.unwrap();
  assert_eq!(result.requested, 2);

  let a = s.get_person(a.id).await.unwrap().unwrap();
  assert_eq!(a.review.status, ReviewStatus::Verified);
  assert_eq!(a.review.status_notes.as_deref(), Some("first pass"));
}

#[tokio::test]
async fn bulk_with_no_ids_fails() {
  let s = store().await;
  let queue = ReviewQueue::new(&s, ReviewKind::Assertion);
  assert!(matches!(
    queue.bulk_mark_verified(Vec::new()).await,
    Err(CoreError::NoIds)
  ));
  assert!(matches!(
    queue.bulk_mark_rejected(Vec::new(), Some("r")).await,
    Err(CoreError::NoIds)
  ));
}

#[tokio::test]
async fn list_unreviewed_excludes_reviewed_and_respects_limit() {
  let s = store().await;
  let mut people = Vec::new();
  for name in ["A", "B", "C", "D"] {
    people.push(person(&s, name, "").await);
  }
  let queue = ReviewQueue::new(&s, ReviewKind::Person);
  queue.mark_verified(people[0].id, None).await.unwrap();
  queue.mark_rejected(people[2].id, None).await.unwrap();

  let pending = queue
    .list_unreviewed(Limit::clamped(50, Limit::LIST_MAX))
    .await
    .unwrap();
  let pending_ids: Vec<Uuid> = pending
    .iter()
    .map(|r| match r {
      ReviewRecord::Person(p) => p.id,
      other => panic!("unexpected record {other:?}"),
    })
    .collect();
  assert_eq!(pending_ids, [people[1].id, people[3].id]);

  let one = queue.list_unreviewed(Limit::clamped(0, Limit::LIST_MAX)).await.unwrap();
  assert_eq!(one.len(), 1);
}

#[tokio::test]
async fn list_unreviewed_per_kind() {
  let s = store().await;
  let p = person(&s, "P", "").await;
  let q = person(&s, "Q", "").await;
  relate(&s, p.id, q.id, "spouse").await;
  s.add_assertion(NewAssertion::source_link(p.id, "ref")).await.unwrap();

  let limit = Limit::clamped(50, Limit::LIST_MAX);
  let rels = ReviewQueue::new(&s, ReviewKind::Relationship)
    .list_unreviewed(limit)
    .await
    .unwrap();
  assert!(matches!(rels.as_slice(), [ReviewRecord::Relationship(_)]));

  let claims = ReviewQueue::new(&s, ReviewKind::Assertion)
    .list_unreviewed(limit)
    .await
    .unwrap();
  assert!(matches!(claims.as_slice(), [ReviewRecord::Assertion(_)]));
}
