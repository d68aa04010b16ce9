//! Identifier arguments.
//!
//! Tools receive identifiers as flat strings and identifier sets as a single
//! comma-separated string. Everything past this module works with [`Uuid`]
//! and `Vec<Uuid>`.

use uuid::Uuid;

use crate::error::ToolError;

/// Parse a required identifier.
pub fn parse_id(value: &str) -> Result<Uuid, ToolError> {
  let token = value.trim();
  Uuid::parse_str(token).map_err(|_| ToolError::InvalidId(token.to_owned()))
}

/// Parse an identifier that may be left blank.
pub fn parse_optional_id(value: &str) -> Result<Option<Uuid>, ToolError> {
  if value.trim().is_empty() {
    Ok(None)
  } else {
    parse_id(value).map(Some)
  }
}

/// Split a comma-separated list into trimmed, non-empty tokens.
pub fn split_id_list(csv: &str) -> Vec<&str> {
  csv.split(',').map(str::trim).filter(|t| !t.is_empty()).collect()
}

/// Parse a comma-separated identifier list. Order and duplicates are kept;
/// an empty result is left for the caller to reject.
pub fn parse_id_list(csv: &str) -> Result<Vec<Uuid>, ToolError> {
  split_id_list(csv).into_iter().map(parse_id).collect()
}
