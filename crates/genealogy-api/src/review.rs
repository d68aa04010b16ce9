//! Review tools.
//!
//! The same five tools exist for each [`ReviewKind`]; only the name and the
//! argument keys change:
//!
//! | Tool | Arguments |
//! |------|-----------|
//! | `mark_{kind}_verified` | `{kind}_id`, `notes?` |
//! | `mark_{kind}_rejected` | `{kind}_id`, `reason?` |
//! | `list_unreviewed_{kinds}` | `limit?` (default 50, max 500) |
//! | `bulk_mark_{kinds}_verified` | `{kind}_ids_csv` |
//! | `bulk_mark_{kinds}_rejected` | `{kind}_ids_csv`, `reason?` |

use genealogy_core::{
  limit::Limit,
  review::{DEFAULT_PENDING_LIMIT, ReviewQueue},
  status::ReviewKind,
  store::GenealogyStore,
};
use serde_json::{Map, Value, json};

use crate::{
  args::Args,
  error::ToolError,
  ids::{parse_id, parse_id_list},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewAction {
  MarkVerified,
  MarkRejected,
  ListUnreviewed,
  BulkVerified,
  BulkRejected,
}

impl ReviewAction {
  const ALL: [Self; 5] = [
    Self::MarkVerified,
    Self::MarkRejected,
    Self::ListUnreviewed,
    Self::BulkVerified,
    Self::BulkRejected,
  ];
}

/// A review tool: one action applied to one entity kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReviewTool {
  pub kind:   ReviewKind,
  pub action: ReviewAction,
}

fn plural(kind: ReviewKind) -> &'static str {
  match kind {
    ReviewKind::Person => "persons",
    ReviewKind::Relationship => "relationships",
    ReviewKind::Assertion => "assertions",
  }
}

impl ReviewTool {
  /// Every review tool, grouped by kind.
  pub fn all() -> impl Iterator<Item = Self> {
    ReviewKind::ALL.into_iter().flat_map(|kind| {
      ReviewAction::ALL
        .into_iter()
        .map(move |action| Self { kind, action })
    })
  }

  pub fn name(&self) -> String {
    let (kind, kinds) = (<&str>::from(self.kind), plural(self.kind));
    match self.action {
      ReviewAction::MarkVerified => format!("mark_{kind}_verified"),
      ReviewAction::MarkRejected => format!("mark_{kind}_rejected"),
      ReviewAction::ListUnreviewed => format!("list_unreviewed_{kinds}"),
      ReviewAction::BulkVerified => format!("bulk_mark_{kinds}_verified"),
      ReviewAction::BulkRejected => format!("bulk_mark_{kinds}_rejected"),
    }
  }

  /// Recognise a review tool by name.
  pub fn parse(name: &str) -> Option<Self> { Self::all().find(|t| t.name() == name) }

  /// Run the tool against `store`.
  pub async fn call<S: GenealogyStore>(self, store: &S, args: Args) -> Result<Value, ToolError> {
    let queue = ReviewQueue::new(store, self.kind);
    let kind: &'static str = self.kind.into();
    let id_key = format!("{kind}_id");
    let ids_key = format!("{kind}_ids_csv");

    let result = match self.action {
      ReviewAction::MarkVerified => {
        let id = parse_id(args.text(&id_key)?)?;
        let t = queue.mark_verified(id, args.optional_text("notes")?).await?;
        let mut payload = Map::new();
        payload.insert(id_key, json!(t.id));
        payload.insert("status".to_owned(), json!(t.status));
        Value::Object(payload)
      }
      ReviewAction::MarkRejected => {
        let id = parse_id(args.text(&id_key)?)?;
        let t = queue.mark_rejected(id, args.optional_text("reason")?).await?;
        let mut payload = Map::new();
        payload.insert(id_key, json!(t.id));
        payload.insert("status".to_owned(), json!(t.status));
        Value::Object(payload)
      }
      ReviewAction::ListUnreviewed => {
        let limit = Limit::clamped(
          args.int_or("limit", DEFAULT_PENDING_LIMIT)?,
          Limit::LIST_MAX,
        );
        let records = queue.list_unreviewed(limit).await?;
        let mut payload = Map::new();
        payload.insert("count".to_owned(), json!(records.len()));
        payload.insert(plural(self.kind).to_owned(), json!(records));
        Value::Object(payload)
      }
      ReviewAction::BulkVerified => {
        let ids = parse_id_list(args.optional_text(&ids_key)?.unwrap_or_default())?;
        let t = queue.bulk_mark_verified(ids).await?;
        json!({ "count": t.requested, "status": t.status })
      }
      ReviewAction::BulkRejected => {
        let ids = parse_id_list(args.optional_text(&ids_key)?.unwrap_or_default())?;
        let t = queue
          .bulk_mark_rejected(ids, args.optional_text("reason")?)
          .await?;
        json!({ "count": t.requested, "status": t.status })
      }
    };
    Ok(result)
  }
}
