//! Family-group resolution.
//!
//! Edges carry a free-text type and two positional endpoints. Relative to a
//! queried person `P`, each edge falls into at most one role bucket:
//!
//! | Type (case-insensitive)       | Reading          | `P` at `a`      | `P` at `b`      |
//! |-------------------------------|------------------|-----------------|-----------------|
//! | `spouse`, `partner`           | `a` ↔ `b`        | `b` is spouse   | `a` is spouse   |
//! | `parent`, `father`, `mother`  | `a` parent of `b`| `b` is child    | `a` is parent   |
//! | `child`, `son`, `daughter`    | `a` child of `b` | `b` is parent   | `a` is child    |
//!
//! Any other type is ignored. For parent- and child-like edges the `b`
//! column is checked first for parent-like and the `a` column first for
//! child-like, so a self-referential edge lands in `parents` in both cases.
//! Resolution is a single level of traversal; it never recurses.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result, person::Person, relationship::Relationship,
  store::GenealogyStore,
};

const SPOUSE_TYPES: [&str; 2] = ["spouse", "partner"];
const PARENT_TYPES: [&str; 3] = ["parent", "father", "mother"];
const CHILD_TYPES: [&str; 3] = ["child", "son", "daughter"];

/// How an edge type reads, independent of who is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeReading {
  /// Symmetric: either endpoint is the other's spouse.
  SpouseLike,
  /// Endpoint `a` is the parent of endpoint `b`.
  ParentLike,
  /// Endpoint `a` is the child of endpoint `b`.
  ChildLike,
}

impl EdgeReading {
  /// Classify an edge type. Returns `None` for types outside the taxonomy.
  pub fn of(relation_type: &str) -> Option<Self> {
    let t = relation_type.to_lowercase();
    if SPOUSE_TYPES.contains(&t.as_str()) {
      Some(Self::SpouseLike)
    } else if PARENT_TYPES.contains(&t.as_str()) {
      Some(Self::ParentLike)
    } else if CHILD_TYPES.contains(&t.as_str()) {
      Some(Self::ChildLike)
    } else {
      None
    }
  }
}

/// A family-group list an edge can contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoleBucket {
  Parents,
  Children,
  Spouses,
}

/// Place `edge` relative to `person_id`: which bucket, and which person goes
/// in it.
pub fn classify(edge: &Relationship, person_id: Uuid) -> Option<(RoleBucket, Uuid)> {
  let (a, b) = (edge.person_id_a, edge.person_id_b);
  match EdgeReading::of(&edge.relation_type)? {
    EdgeReading::SpouseLike => {
      Some((RoleBucket::Spouses, edge.other_endpoint(person_id)))
    }
    EdgeReading::ParentLike if b == person_id => Some((RoleBucket::Parents, a)),
    EdgeReading::ParentLike if a == person_id => Some((RoleBucket::Children, b)),
    EdgeReading::ChildLike if a == person_id => Some((RoleBucket::Parents, b)),
    EdgeReading::ChildLike if b == person_id => Some((RoleBucket::Children, a)),
    EdgeReading::ParentLike | EdgeReading::ChildLike => None,
  }
}

/// Deduplicated, sorted identifiers per role bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyIds {
  pub parents:  BTreeSet<Uuid>,
  pub children: BTreeSet<Uuid>,
  pub spouses:  BTreeSet<Uuid>,
}

impl FamilyIds {
  pub fn collect<'a>(
    person_id: Uuid,
    edges: impl IntoIterator<Item = &'a Relationship>,
  ) -> Self {
    let mut ids = Self::default();
    for (bucket, other) in edges.into_iter().filter_map(|e| classify(e, person_id)) {
      match bucket {
        RoleBucket::Parents => ids.parents.insert(other),
        RoleBucket::Children => ids.children.insert(other),
        RoleBucket::Spouses => ids.spouses.insert(other),
      };
    }
    ids
  }

  fn union(&self) -> Vec<Uuid> {
    let all: BTreeSet<Uuid> = self
      .parents
      .iter()
      .chain(&self.children)
      .chain(&self.spouses)
      .copied()
      .collect();
    all.into_iter().collect()
  }
}

/// A person together with their immediate family.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyGroup {
  pub person:   Person,
  pub parents:  Vec<Person>,
  pub children: Vec<Person>,
  pub spouses:  Vec<Person>,
}

/// Resolve the family group of `person_id`.
///
/// Fails with [`Error::NotFound`] if the person does not exist. Relatives
/// referenced by an edge but missing from storage are dropped from the
/// lists.
pub async fn resolve_family_group<S>(store: &S, person_id: Uuid) -> Result<FamilyGroup>
where
  S: GenealogyStore,
{
  let person = store
    .get_person(person_id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::person_not_found(person_id))?;

  let edges = store
    .relationships_for_person(person_id, None)
    .await
    .map_err(Error::store)?;
  let ids = FamilyIds::collect(person_id, &edges);

  let wanted = ids.union();
  let found: HashMap<Uuid, Person> = if wanted.is_empty() {
    HashMap::new()
  } else {
    store
      .get_persons(wanted)
      .await
      .map_err(Error::store)?
      .into_iter()
      .map(|p| (p.id, p))
      .collect()
  };

  let hydrate = |bucket: &BTreeSet<Uuid>| -> Vec<Person> {
    bucket.iter().filter_map(|id| found.get(id).cloned()).collect()
  };
  let parents = hydrate(&ids.parents);
  let children = hydrate(&ids.children);
  let spouses = hydrate(&ids.spouses);

  tracing::debug!(
    %person_id,
    edges = edges.len(),
    parents = parents.len(),
    children = children.len(),
    spouses = spouses.len(),
    "resolved family group"
  );

  Ok(FamilyGroup { person, parents, children, spouses })
}
