//! Research note tools.
//!
//! | Tool | Arguments |
//! |------|-----------|
//! | `save_research_note` | `person_id`, `note`, `source_url?` |
//! | `list_research_notes` | `person_id`, `limit?` (default 100, max 500) |
//! | `search_research_notes` | `query`, `limit?` (default 100, max 500) |

use genealogy_core::{limit::Limit, note::NewResearchNote, store::GenealogyStore};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  args::{PersonListArgs, SearchArgs},
  error::ToolError,
  ids::parse_id,
};

pub const DEFAULT_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct SaveArgs {
  pub person_id:  String,
  #[serde(default)]
  pub note:       String,
  #[serde(default)]
  pub source_url: String,
}

/// `save_research_note`
pub async fn save<S: GenealogyStore>(store: &S, args: SaveArgs) -> Result<Value, ToolError> {
  let input = NewResearchNote::new(parse_id(&args.person_id)?, &args.note, &args.source_url)?;
  let note = store.save_research_note(input).await.map_err(ToolError::store)?;
  Ok(json!({ "note_id": note.id }))
}

/// `list_research_notes`
pub async fn list<S: GenealogyStore>(store: &S, args: PersonListArgs) -> Result<Value, ToolError> {
  let person_id = parse_id(&args.person_id)?;
  let limit = Limit::clamped(args.limit.unwrap_or(DEFAULT_LIMIT), Limit::LIST_MAX);
  let notes = store
    .list_research_notes(person_id, limit)
    .await
    .map_err(ToolError::store)?;
  Ok(json!({ "count": notes.len(), "notes": notes }))
}

/// `search_research_notes`
pub async fn search<S: GenealogyStore>(store: &S, args: SearchArgs) -> Result<Value, ToolError> {
  let limit = Limit::clamped(args.limit.unwrap_or(DEFAULT_LIMIT), Limit::LIST_MAX);
  let notes = store
    .search_research_notes(args.query, limit)
    .await
    .map_err(ToolError::store)?;
  Ok(json!({ "count": notes.len(), "notes": notes }))
}
