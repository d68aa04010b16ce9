//! Location and event tools.
//!
//! | Tool | Arguments |
//! |------|-----------|
//! | `create_location` | `name` |
//! | `search_locations` | `query`, `limit?` (default 20, max 200) |
//! | `create_event` | `event_type` |
//! | `link_person_event` | `person_id`, `event_id`, `role?` (default `subject`) |
//! | `get_events_for_person` | `person_id`, `limit?` (default 100, max 500) |

use genealogy_core::{
  Error as CoreError,
  event::{DEFAULT_ROLE, PersonEvent},
  limit::Limit,
  store::GenealogyStore,
  text::non_empty,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  args::{PersonListArgs, SearchArgs},
  error::ToolError,
  ids::parse_id,
};

pub const DEFAULT_LOCATION_LIMIT: i64 = 20;
pub const DEFAULT_EVENT_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct LocationArgs {
  #[serde(default)]
  pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct EventArgs {
  #[serde(default)]
  pub event_type: String,
}

#[derive(Debug, Deserialize)]
pub struct LinkArgs {
  pub person_id: String,
  pub event_id:  String,
  #[serde(default)]
  pub role:      String,
}

/// `create_location`
pub async fn create_location<S: GenealogyStore>(
  store: &S,
  args: LocationArgs,
) -> Result<Value, ToolError> {
  let name = non_empty(Some(args.name.as_str())).ok_or(CoreError::MissingName)?;
  let location = store.create_location(name).await.map_err(ToolError::store)?;
  Ok(json!({ "location_id": location.id }))
}

/// `search_locations`
pub async fn search_locations<S: GenealogyStore>(
  store: &S,
  args: SearchArgs,
) -> Result<Value, ToolError> {
  let limit = Limit::clamped(args.limit.unwrap_or(DEFAULT_LOCATION_LIMIT), Limit::SEARCH_MAX);
  let locations = store
    .search_locations(args.query, limit)
    .await
    .map_err(ToolError::store)?;
  Ok(json!({ "count": locations.len(), "locations": locations }))
}

/// `create_event`
pub async fn create_event<S: GenealogyStore>(
  store: &S,
  args: EventArgs,
) -> Result<Value, ToolError> {
  let event_type = non_empty(Some(args.event_type.as_str())).ok_or(CoreError::MissingType)?;
  let event = store.create_event(event_type).await.map_err(ToolError::store)?;
  Ok(json!({ "event_id": event.id }))
}

/// `link_person_event`: relinking replaces the role.
pub async fn link_person_event<S: GenealogyStore>(
  store: &S,
  args: LinkArgs,
) -> Result<Value, ToolError> {
  let link = PersonEvent {
    person_id: parse_id(&args.person_id)?,
    event_id:  parse_id(&args.event_id)?,
    role:      non_empty(Some(args.role.as_str())).unwrap_or_else(|| DEFAULT_ROLE.to_owned()),
  };
  let link = store.link_person_event(link).await.map_err(ToolError::store)?;
  Ok(json!(link))
}

/// `get_events_for_person`
pub async fn events_for_person<S: GenealogyStore>(
  store: &S,
  args: PersonListArgs,
) -> Result<Value, ToolError> {
  let person_id = parse_id(&args.person_id)?;
  let limit = Limit::clamped(args.limit.unwrap_or(DEFAULT_EVENT_LIMIT), Limit::LIST_MAX);
  let events = store
    .events_for_person(person_id, limit)
    .await
    .map_err(ToolError::store)?;
  Ok(json!({ "count": events.len(), "events": events }))
}
