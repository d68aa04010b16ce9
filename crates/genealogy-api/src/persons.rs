//! Person tools.
//!
//! | Tool | Arguments |
//! |------|-----------|
//! | `create_person` | `first_name?`, `middle_name?`, `last_name?` |
//! | `get_person` | `person_id` |
//! | `search_persons` | `query`, `limit?` (default 20, max 200) |
//! | `update_person` | `person_id`, `first_name?`, `middle_name?`, `last_name?` |

use genealogy_core::{
  Error as CoreError, limit::Limit, person::PersonName, store::GenealogyStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{args::SearchArgs, error::ToolError, ids::parse_id};

pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NameArgs {
  pub first_name:  String,
  pub middle_name: String,
  pub last_name:   String,
}

impl NameArgs {
  fn into_name(self) -> PersonName {
    PersonName::from_parts(&self.first_name, &self.middle_name, &self.last_name)
  }
}

#[derive(Debug, Deserialize)]
pub struct PersonIdArgs {
  pub person_id: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateArgs {
  pub person_id: String,
  #[serde(flatten)]
  pub name:      NameArgs,
}

/// `create_person`: at least a first or last name is required.
pub async fn create<S: GenealogyStore>(store: &S, args: NameArgs) -> Result<Value, ToolError> {
  let name = args.into_name().for_create()?;
  let person = store.create_person(name).await.map_err(ToolError::store)?;
  Ok(json!({ "person_id": person.id }))
}

/// `get_person`
pub async fn get<S: GenealogyStore>(store: &S, args: PersonIdArgs) -> Result<Value, ToolError> {
  let id = parse_id(&args.person_id)?;
  let person = store
    .get_person(id)
    .await
    .map_err(ToolError::store)?
    .ok_or_else(|| CoreError::person_not_found(id))?;
  Ok(json!(person))
}

/// `search_persons`
pub async fn search<S: GenealogyStore>(store: &S, args: SearchArgs) -> Result<Value, ToolError> {
  let limit = Limit::clamped(args.limit.unwrap_or(DEFAULT_SEARCH_LIMIT), Limit::SEARCH_MAX);
  let persons = store
    .search_persons(args.query, limit)
    .await
    .map_err(ToolError::store)?;
  Ok(json!({ "count": persons.len(), "persons": persons }))
}

/// `update_person`: blank name parts keep their stored value.
pub async fn update<S: GenealogyStore>(store: &S, args: UpdateArgs) -> Result<Value, ToolError> {
  let id = parse_id(&args.person_id)?;
  let name = args.name.into_name();
  if !store.update_person(id, name).await.map_err(ToolError::store)? {
    return Err(CoreError::person_not_found(id).into());
  }
  Ok(json!({ "person_id": id }))
}
