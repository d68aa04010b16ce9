//! Assertions: sourced claims attached to any record.
//!
//! The subject of an assertion is a tagged reference. Only the kind tag is
//! validated; the referenced row is never joined or checked for existence.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result, status::ReviewState, text::non_empty};

/// Field name under which source references for a person are stored.
pub const SOURCE_LINK_FIELD: &str = "source_link";

/// The record kinds an assertion may refer to.
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
pub enum SubjectKind {
  Person,
  Relationship,
  Assertion,
  Location,
  Event,
  ResearchNote,
}

/// A `(kind, id)` pair naming the record a claim is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubjectRef {
  pub kind: SubjectKind,
  pub id:   Uuid,
}

impl SubjectRef {
  pub fn person(id: Uuid) -> Self { Self { kind: SubjectKind::Person, id } }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assertion {
  pub id:             Uuid,
  pub subject_kind:   SubjectKind,
  pub subject_id:     Uuid,
  pub field_name:     String,
  pub asserted_value: String,
  pub created_at:     DateTime<Utc>,
  #[serde(flatten)]
  pub review:         ReviewState,
}

impl Assertion {
  pub fn subject(&self) -> SubjectRef {
    SubjectRef { kind: self.subject_kind, id: self.subject_id }
  }
}

/// Input to [`crate::store::GenealogyStore::add_assertion`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAssertion {
  pub subject:        SubjectRef,
  pub field_name:     String,
  pub asserted_value: String,
}

impl NewAssertion {
  /// Build from raw tool arguments. Kind, subject and field are required;
  /// the asserted value may be empty.
  pub fn from_parts(
    kind: &str,
    subject_id: Option<Uuid>,
    field_name: &str,
    asserted_value: &str,
  ) -> Result<Self> {
    let (Some(kind), Some(id), Some(field_name)) =
      (non_empty(Some(kind)), subject_id, non_empty(Some(field_name)))
    else {
      return Err(Error::MissingFields);
    };
    let kind = kind
      .parse::<SubjectKind>()
      .map_err(|_| Error::UnknownSubjectKind(kind.clone()))?;
    Ok(Self {
      subject: SubjectRef { kind, id },
      field_name,
      asserted_value: asserted_value.to_owned(),
    })
  }

  /// A source reference for a person, stored as an ordinary assertion.
  pub fn source_link(person_id: Uuid, source_ref: &str) -> Self {
    Self {
      subject:        SubjectRef::person(person_id),
      field_name:     SOURCE_LINK_FIELD.to_owned(),
      asserted_value: source_ref.to_owned(),
    }
  }
}
