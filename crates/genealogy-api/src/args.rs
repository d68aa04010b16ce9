//! Tool argument objects.
//!
//! Arguments arrive as one flat JSON object of strings and integers. Most
//! tools deserialise it into a typed struct; the review tools, whose key
//! names depend on the entity kind, read it key by key.

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::error::ToolError;

/// A tool's argument object.
#[derive(Debug, Clone, Default)]
pub struct Args(Map<String, Value>);

impl Args {
  /// Accept an object; `null` counts as an empty object.
  pub fn new(value: Value) -> Result<Self, ToolError> {
    match value {
      Value::Object(map) => Ok(Self(map)),
      Value::Null => Ok(Self::default()),
      other => Err(ToolError::InvalidArguments(format!(
        "expected an argument object, got {other}"
      ))),
    }
  }

  /// Deserialise into a typed argument struct.
  pub fn parse<T: DeserializeOwned>(self) -> Result<T, ToolError> {
    serde_json::from_value(Value::Object(self.0))
      .map_err(|e| ToolError::InvalidArguments(e.to_string()))
  }

  /// A required string argument.
  pub fn text(&self, key: &str) -> Result<&str, ToolError> {
    self
      .optional_text(key)?
      .ok_or_else(|| ToolError::InvalidArguments(format!("missing field `{key}`")))
  }

  /// A string argument that may be absent or null.
  pub fn optional_text(&self, key: &str) -> Result<Option<&str>, ToolError> {
    match self.0.get(key) {
      None | Some(Value::Null) => Ok(None),
      Some(Value::String(s)) => Ok(Some(s.as_str())),
      Some(other) => Err(ToolError::InvalidArguments(format!(
        "field `{key}` must be a string, got {other}"
      ))),
    }
  }

  /// An integer argument with a default.
  pub fn int_or(&self, key: &str, default: i64) -> Result<i64, ToolError> {
    match self.0.get(key) {
      None | Some(Value::Null) => Ok(default),
      Some(v) => v.as_i64().ok_or_else(|| {
        ToolError::InvalidArguments(format!("field `{key}` must be an integer, got {v}"))
      }),
    }
  }
}

/// `{query, limit?}`: shared by the text-search tools.
#[derive(Debug, Deserialize)]
pub struct SearchArgs {
  pub query: String,
  pub limit: Option<i64>,
}

/// `{person_id, limit?}`: shared by the per-person listings.
#[derive(Debug, Deserialize)]
pub struct PersonListArgs {
  pub person_id: String,
  pub limit:     Option<i64>,
}
