//! Relationship tools, including family-group resolution.
//!
//! | Tool | Arguments |
//! |------|-----------|
//! | `create_relationship` | `person_id_a`, `person_id_b`, `relation_type` |
//! | `list_relationships` | `person_id`, `limit?` (default 200, max 500) |
//! | `get_family_group` | `person_id` |

use genealogy_core::{
  family::resolve_family_group, limit::Limit, relationship::NewRelationship,
  store::GenealogyStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  args::PersonListArgs, error::ToolError, ids::parse_id, persons::PersonIdArgs,
};

pub const DEFAULT_LIST_LIMIT: i64 = 200;

#[derive(Debug, Deserialize)]
pub struct CreateArgs {
  pub person_id_a:   String,
  pub person_id_b:   String,
  #[serde(default)]
  pub relation_type: String,
}

/// `create_relationship`: endpoints are not checked for existence.
pub async fn create<S: GenealogyStore>(store: &S, args: CreateArgs) -> Result<Value, ToolError> {
  let input = NewRelationship::new(
    parse_id(&args.person_id_a)?,
    parse_id(&args.person_id_b)?,
    &args.relation_type,
  )?;
  let rel = store.create_relationship(input).await.map_err(ToolError::store)?;
  Ok(json!({ "relationship_id": rel.id }))
}

/// `list_relationships`
pub async fn list<S: GenealogyStore>(store: &S, args: PersonListArgs) -> Result<Value, ToolError> {
  let person_id = parse_id(&args.person_id)?;
  let limit = Limit::clamped(args.limit.unwrap_or(DEFAULT_LIST_LIMIT), Limit::LIST_MAX);
  let rels = store
    .relationships_for_person(person_id, Some(limit))
    .await
    .map_err(ToolError::store)?;
  Ok(json!({ "count": rels.len(), "relationships": rels }))
}

/// `get_family_group`
pub async fn family_group<S: GenealogyStore>(
  store: &S,
  args: PersonIdArgs,
) -> Result<Value, ToolError> {
  let person_id = parse_id(&args.person_id)?;
  let group = resolve_family_group(store, person_id).await?;
  Ok(json!(group))
}
