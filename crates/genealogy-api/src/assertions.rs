//! Assertion tools, and person source links stored as assertions.
//!
//! | Tool | Arguments |
//! |------|-----------|
//! | `add_assertion` | `subject_table`, `subject_id`, `field_name`, `asserted_value?` |
//! | `list_assertions` | `subject_table`, `subject_id`, `limit?` (default 200, max 500) |
//! | `link_source_to_person` | `person_id`, `source_ref` |
//! | `list_sources_for_person` | `person_id`, `limit?` (default 200, max 500) |

use genealogy_core::{
  Error as CoreError,
  assertion::{NewAssertion, SOURCE_LINK_FIELD, SubjectKind, SubjectRef},
  limit::Limit,
  store::GenealogyStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  args::PersonListArgs,
  error::ToolError,
  ids::{parse_id, parse_optional_id},
};

pub const DEFAULT_LIST_LIMIT: i64 = 200;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddArgs {
  pub subject_table:  String,
  pub subject_id:     String,
  pub field_name:     String,
  pub asserted_value: String,
}

#[derive(Debug, Deserialize)]
pub struct ListArgs {
  pub subject_table: String,
  pub subject_id:    String,
  pub limit:         Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SourceArgs {
  pub person_id:  String,
  #[serde(default)]
  pub source_ref: String,
}

/// `add_assertion`
pub async fn add<S: GenealogyStore>(store: &S, args: AddArgs) -> Result<Value, ToolError> {
  let input = NewAssertion::from_parts(
    &args.subject_table,
    parse_optional_id(&args.subject_id)?,
    &args.field_name,
    &args.asserted_value,
  )?;
  let assertion = store.add_assertion(input).await.map_err(ToolError::store)?;
  Ok(json!({ "assertion_id": assertion.id }))
}

/// `list_assertions`
pub async fn list<S: GenealogyStore>(store: &S, args: ListArgs) -> Result<Value, ToolError> {
  let kind = args.subject_table.trim();
  let kind = kind
    .parse::<SubjectKind>()
    .map_err(|_| CoreError::UnknownSubjectKind(kind.to_owned()))?;
  let subject = SubjectRef { kind, id: parse_id(&args.subject_id)? };
  let limit = Limit::clamped(args.limit.unwrap_or(DEFAULT_LIST_LIMIT), Limit::LIST_MAX);
  let assertions = store
    .list_assertions(subject, None, limit)
    .await
    .map_err(ToolError::store)?;
  Ok(json!({ "count": assertions.len(), "assertions": assertions }))
}

/// `link_source_to_person`
pub async fn link_source<S: GenealogyStore>(
  store: &S,
  args: SourceArgs,
) -> Result<Value, ToolError> {
  let person_id = parse_id(&args.person_id)?;
  let input = NewAssertion::source_link(person_id, &args.source_ref);
  let assertion = store.add_assertion(input).await.map_err(ToolError::store)?;
  Ok(json!({ "assertion_id": assertion.id }))
}

/// `list_sources_for_person`
pub async fn list_sources<S: GenealogyStore>(
  store: &S,
  args: PersonListArgs,
) -> Result<Value, ToolError> {
  let subject = SubjectRef::person(parse_id(&args.person_id)?);
  let limit = Limit::clamped(args.limit.unwrap_or(DEFAULT_LIST_LIMIT), Limit::LIST_MAX);
  let sources: Vec<Value> = store
    .list_assertions(subject, Some(SOURCE_LINK_FIELD.to_owned()), limit)
    .await
    .map_err(ToolError::store)?
    .into_iter()
    .map(|a| json!({ "source_ref": a.asserted_value }))
    .collect();
  Ok(json!({ "count": sources.len(), "sources": sources }))
}
