//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microseconds, `Z`)
//! so that text ordering matches time ordering. UUIDs are stored as
//! hyphenated lowercase strings. A NULL status column reads as
//! [`ReviewStatus::Unreviewed`].

use chrono::{DateTime, SecondsFormat, Utc};
use genealogy_core::{
  assertion::{Assertion, SubjectKind},
  event::{Event, EventParticipation},
  location::Location,
  note::ResearchNote,
  person::Person,
  relationship::Relationship,
  status::{ReviewKind, ReviewState, ReviewStatus},
};
use rusqlite::Row;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Enumerations ────────────────────────────────────────────────────────────

pub fn encode_status(s: ReviewStatus) -> &'static str { s.into() }

pub fn decode_status(s: Option<&str>) -> Result<ReviewStatus> {
  match s {
    None => Ok(ReviewStatus::Unreviewed),
    Some(v) => v.parse().map_err(|_| Error::UnknownValue {
      column: "status",
      value:  v.to_owned(),
    }),
  }
}

pub fn encode_subject_kind(k: SubjectKind) -> &'static str { k.into() }

pub fn decode_subject_kind(s: &str) -> Result<SubjectKind> {
  s.parse().map_err(|_| Error::UnknownValue {
    column: "subject_kind",
    value:  s.to_owned(),
  })
}

/// The table holding rows of a reviewable kind.
pub fn review_table(kind: ReviewKind) -> &'static str {
  match kind {
    ReviewKind::Person => "persons",
    ReviewKind::Relationship => "relationships",
    ReviewKind::Assertion => "assertions",
  }
}

/// `?{first}, ?{first+1}, …` for `n` positional parameters.
pub fn placeholders(first: usize, n: usize) -> String {
  (first..first + n)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ")
}

fn review_state(status: Option<String>, notes: Option<String>) -> Result<ReviewState> {
  Ok(ReviewState {
    status:       decode_status(status.as_deref())?,
    status_notes: notes,
  })
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub id:           String,
  pub first_name:   Option<String>,
  pub middle_name:  Option<String>,
  pub last_name:    Option<String>,
  pub created_at:   String,
  pub status:       Option<String>,
  pub status_notes: Option<String>,
}

impl RawPerson {
  pub const COLUMNS: &'static str =
    "id, first_name, middle_name, last_name, created_at, status, status_notes";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      first_name:   row.get(1)?,
      middle_name:  row.get(2)?,
      last_name:    row.get(3)?,
      created_at:   row.get(4)?,
      status:       row.get(5)?,
      status_notes: row.get(6)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:          decode_uuid(&self.id)?,
      first_name:  self.first_name,
      middle_name: self.middle_name,
      last_name:   self.last_name,
      created_at:  decode_dt(&self.created_at)?,
      review:      review_state(self.status, self.status_notes)?,
    })
  }
}

/// Raw strings read directly from a `relationships` row.
pub struct RawRelationship {
  pub id:           String,
  pub person_id_a:  String,
  pub person_id_b:  String,
  pub kind:         String,
  pub created_at:   String,
  pub status:       Option<String>,
  pub status_notes: Option<String>,
}

impl RawRelationship {
  pub const COLUMNS: &'static str =
    "id, person_id_a, person_id_b, type, created_at, status, status_notes";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      person_id_a:  row.get(1)?,
      person_id_b:  row.get(2)?,
      kind:         row.get(3)?,
      created_at:   row.get(4)?,
      status:       row.get(5)?,
      status_notes: row.get(6)?,
    })
  }

  pub fn into_relationship(self) -> Result<Relationship> {
    Ok(Relationship {
      id:            decode_uuid(&self.id)?,
      person_id_a:   decode_uuid(&self.person_id_a)?,
      person_id_b:   decode_uuid(&self.person_id_b)?,
      relation_type: self.kind,
      created_at:    decode_dt(&self.created_at)?,
      review:        review_state(self.status, self.status_notes)?,
    })
  }
}

/// Raw strings read directly from an `assertions` row.
pub struct RawAssertion {
  pub id:             String,
  pub subject_kind:   String,
  pub subject_id:     String,
  pub field_name:     String,
  pub asserted_value: String,
  pub created_at:     String,
  pub status:         Option<String>,
  pub status_notes:   Option<String>,
}

impl RawAssertion {
  pub const COLUMNS: &'static str = "id, subject_kind, subject_id, field_name, \
                                     asserted_value, created_at, status, status_notes";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:             row.get(0)?,
      subject_kind:   row.get(1)?,
      subject_id:     row.get(2)?,
      field_name:     row.get(3)?,
      asserted_value: row.get(4)?,
      created_at:     row.get(5)?,
      status:         row.get(6)?,
      status_notes:   row.get(7)?,
    })
  }

  pub fn into_assertion(self) -> Result<Assertion> {
    Ok(Assertion {
      id:             decode_uuid(&self.id)?,
      subject_kind:   decode_subject_kind(&self.subject_kind)?,
      subject_id:     decode_uuid(&self.subject_id)?,
      field_name:     self.field_name,
      asserted_value: self.asserted_value,
      created_at:     decode_dt(&self.created_at)?,
      review:         review_state(self.status, self.status_notes)?,
    })
  }
}

/// Raw strings read directly from a `locations` row.
pub struct RawLocation {
  pub id:         String,
  pub name:       String,
  pub created_at: String,
}

impl RawLocation {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      created_at: row.get(2)?,
    })
  }

  pub fn into_location(self) -> Result<Location> {
    Ok(Location {
      id:         decode_uuid(&self.id)?,
      name:       self.name,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

/// An `events` row joined with the participant's role.
pub struct RawParticipation {
  pub id:         String,
  pub event_type: String,
  pub created_at: String,
  pub role:       String,
}

impl RawParticipation {
  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      event_type: row.get(1)?,
      created_at: row.get(2)?,
      role:       row.get(3)?,
    })
  }

  pub fn into_participation(self) -> Result<EventParticipation> {
    Ok(EventParticipation {
      event: Event {
        id:         decode_uuid(&self.id)?,
        event_type: self.event_type,
        created_at: decode_dt(&self.created_at)?,
      },
      role:  self.role,
    })
  }
}

/// Raw strings read directly from a `research_notes` row.
pub struct RawNote {
  pub id:         String,
  pub person_id:  String,
  pub note:       String,
  pub source_url: Option<String>,
  pub created_at: String,
}

impl RawNote {
  pub const COLUMNS: &'static str = "id, person_id, note, source_url, created_at";

  pub fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      person_id:  row.get(1)?,
      note:       row.get(2)?,
      source_url: row.get(3)?,
      created_at: row.get(4)?,
    })
  }

  pub fn into_note(self) -> Result<ResearchNote> {
    Ok(ResearchNote {
      id:         decode_uuid(&self.id)?,
      person_id:  decode_uuid(&self.person_id)?,
      note:       self.note,
      source_url: self.source_url,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn null_and_literal_unreviewed_are_equivalent() {
    assert_eq!(decode_status(None).unwrap(), ReviewStatus::Unreviewed);
    assert_eq!(
      decode_status(Some("unreviewed")).unwrap(),
      ReviewStatus::Unreviewed
    );
    assert_eq!(decode_status(Some("verified")).unwrap(), ReviewStatus::Verified);
  }

  #[test]
  fn unknown_status_is_an_error() {
    assert!(matches!(
      decode_status(Some("pending")),
      Err(Error::UnknownValue { column: "status", .. })
    ));
  }

  #[test]
  fn timestamps_are_fixed_width() {
    let a = encode_dt(DateTime::from_timestamp(1_700_000_000, 0).unwrap());
    let b = encode_dt(DateTime::from_timestamp(1_700_000_000, 123_000).unwrap());
    assert_eq!(a.len(), b.len());
    assert!(a < b);
    assert_eq!(decode_dt(&b).unwrap().timestamp_subsec_micros(), 123);
  }

  #[test]
  fn placeholder_lists() {
    assert_eq!(placeholders(3, 3), "?3, ?4, ?5");
    assert_eq!(placeholders(1, 1), "?1");
  }
}
