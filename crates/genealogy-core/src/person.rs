//! People, the records family groups are built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, status::ReviewState, text::non_empty};

/// A person record. Never hard-deleted; rejected people keep their row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:          Uuid,
  pub first_name:  Option<String>,
  pub middle_name: Option<String>,
  pub last_name:   Option<String>,
  pub created_at:  DateTime<Utc>,
  #[serde(flatten)]
  pub review:      ReviewState,
}

/// Name parts accepted when creating or renaming a person. Blank parts are
/// normalised to `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
  pub first_name:  Option<String>,
  pub middle_name: Option<String>,
  pub last_name:   Option<String>,
}

impl PersonName {
  pub fn from_parts(first: &str, middle: &str, last: &str) -> Self {
    Self {
      first_name:  non_empty(Some(first)),
      middle_name: non_empty(Some(middle)),
      last_name:   non_empty(Some(last)),
    }
  }

  /// Validate for creation: a first or last name must be present.
  pub fn for_create(self) -> Result<Self> {
    if self.first_name.is_none() && self.last_name.is_none() {
      return Err(Error::MissingName);
    }
    Ok(self)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn middle_name_alone_is_not_enough() {
    let name = PersonName::from_parts("", "Quincy", "");
    assert!(matches!(name.for_create(), Err(Error::MissingName)));
  }

  #[test]
  fn last_name_alone_is_enough() {
    let name = PersonName::from_parts("  ", "", "Lovelace")
      .for_create()
      .unwrap();
    assert_eq!(name.first_name, None);
    assert_eq!(name.last_name.as_deref(), Some("Lovelace"));
  }
}
