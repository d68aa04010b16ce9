//! Tool dispatch by name.

use genealogy_core::store::GenealogyStore;
use serde_json::Value;

use crate::{
  args::Args, assertions, error::ToolError, notes, persons, records, relationships,
  review::ReviewTool,
};

/// Tools that are not part of the review family.
pub const RECORD_TOOLS: [&str; 19] = [
  "create_person",
  "get_person",
  "search_persons",
  "update_person",
  "create_location",
  "search_locations",
  "create_event",
  "link_person_event",
  "get_events_for_person",
  "create_relationship",
  "list_relationships",
  "get_family_group",
  "add_assertion",
  "list_assertions",
  "link_source_to_person",
  "list_sources_for_person",
  "save_research_note",
  "list_research_notes",
  "search_research_notes",
];

/// Every tool name, record tools first.
pub fn tool_names() -> Vec<String> {
  RECORD_TOOLS
    .iter()
    .map(|s| (*s).to_owned())
    .chain(ReviewTool::all().map(|t| t.name()))
    .collect()
}

/// Run tool `name` with `args` against `store`.
pub async fn call<S: GenealogyStore>(
  store: &S,
  name: &str,
  args: Args,
) -> Result<Value, ToolError> {
  tracing::debug!(tool = name, "tool call");
  match name {
    "create_person" => persons::create(store, args.parse()?).await,
    "get_person" => persons::get(store, args.parse()?).await,
    "search_persons" => persons::search(store, args.parse()?).await,
    "update_person" => persons::update(store, args.parse()?).await,
    "create_location" => records::create_location(store, args.parse()?).await,
    "search_locations" => records::search_locations(store, args.parse()?).await,
    "create_event" => records::create_event(store, args.parse()?).await,
    "link_person_event" => records::link_person_event(store, args.parse()?).await,
    "get_events_for_person" => records::events_for_person(store, args.parse()?).await,
    "create_relationship" => relationships::create(store, args.parse()?).await,
    "list_relationships" => relationships::list(store, args.parse()?).await,
    "get_family_group" => relationships::family_group(store, args.parse()?).await,
    "add_assertion" => assertions::add(store, args.parse()?).await,
    "list_assertions" => assertions::list(store, args.parse()?).await,
    "link_source_to_person" => assertions::link_source(store, args.parse()?).await,
    "list_sources_for_person" => assertions::list_sources(store, args.parse()?).await,
    "save_research_note" => notes::save(store, args.parse()?).await,
    "list_research_notes" => notes::list(store, args.parse()?).await,
    "search_research_notes" => notes::search(store, args.parse()?).await,
    other => match ReviewTool::parse(other) {
      Some(tool) => tool.call(store, args).await,
      None => Err(ToolError::UnknownTool(other.to_owned())),
    },
  }
}
