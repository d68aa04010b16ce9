//! [`SqliteStore`], the SQLite implementation of [`GenealogyStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use genealogy_core::{
  assertion::{Assertion, NewAssertion, SubjectRef},
  event::{Event, EventParticipation, PersonEvent},
  limit::Limit,
  location::Location,
  note::{NewResearchNote, ResearchNote},
  person::{Person, PersonName},
  relationship::{NewRelationship, Relationship},
  review::ReviewRecord,
  status::{ReviewKind, ReviewState, ReviewStatus},
  store::GenealogyStore,
};

use crate::{
  Error, Result,
  encode::{
    RawAssertion, RawLocation, RawNote, RawParticipation, RawPerson,
    RawRelationship, encode_dt, encode_status, encode_subject_kind, encode_uuid,
    placeholders, review_table,
  },
  schema::{CASEFOLD, SCHEMA, register_functions},
};

/// Identifiers bound per statement, kept under SQLite's 32766 parameter cap.
const MAX_BOUND_IDS: usize = 32_000;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A genealogy store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        register_functions(conn)?;
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT … FROM persons` with positional `params` and decode.
  async fn query_persons(&self, sql: String, params: Vec<Value>) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  /// Research notes matching `filter`, newest first; `?2` is the limit.
  async fn query_notes(
    &self,
    filter: String,
    params: Vec<Value>,
  ) -> Result<Vec<ResearchNote>> {
    let sql = format!(
      "SELECT {} FROM research_notes
       WHERE {filter}
       ORDER BY created_at DESC, rowid DESC
       LIMIT ?2",
      RawNote::COLUMNS
    );

    let raws: Vec<RawNote> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawNote::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawNote::into_note).collect()
  }
}

fn text(s: impl Into<String>) -> Value { Value::Text(s.into()) }

fn opt_text(s: Option<String>) -> Value { s.map_or(Value::Null, Value::Text) }

fn int(limit: Limit) -> Value { Value::Integer(i64::from(limit.get())) }

/// A `LIKE` pattern matched against `casefold(column)`.
fn folded_pattern(needle: &str) -> String { format!("%{}%", needle.to_lowercase()) }

// ─── GenealogyStore impl ─────────────────────────────────────────────────────

impl GenealogyStore for SqliteStore {
  type Error = Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn create_person(&self, name: PersonName) -> Result<Person> {
    let person = Person {
      id:          Uuid::new_v4(),
      first_name:  name.first_name,
      middle_name: name.middle_name,
      last_name:   name.last_name,
      created_at:  Utc::now(),
      review:      ReviewState::default(),
    };

    let params = vec![
      text(encode_uuid(person.id)),
      opt_text(person.first_name.clone()),
      opt_text(person.middle_name.clone()),
      opt_text(person.last_name.clone()),
      text(encode_dt(person.created_at)),
    ];

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (id, first_name, middle_name, last_name, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params_from_iter(params),
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(person_id = %person.id, "created person");
    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {} FROM persons WHERE id = ?1", RawPerson::COLUMNS),
              rusqlite::params![id_str],
              RawPerson::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn get_persons(&self, ids: Vec<Uuid>) -> Result<Vec<Person>> {
    let ids: Vec<String> = ids.into_iter().map(encode_uuid).collect();

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut rows = Vec::new();
        for chunk in ids.chunks(MAX_BOUND_IDS) {
          let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM persons WHERE id IN ({})",
            RawPerson::COLUMNS,
            placeholders(1, chunk.len())
          ))?;
          let found = stmt
            .query_map(rusqlite::params_from_iter(chunk), RawPerson::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          rows.extend(found);
        }
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn search_persons(&self, needle: String, limit: Limit) -> Result<Vec<Person>> {
    let sql = format!(
      "SELECT {} FROM persons
       WHERE {CASEFOLD}(first_name)  LIKE ?1
          OR {CASEFOLD}(middle_name) LIKE ?1
          OR {CASEFOLD}(last_name)   LIKE ?1
       ORDER BY last_name IS NULL, last_name, first_name IS NULL, first_name
       LIMIT ?2",
      RawPerson::COLUMNS
    );
    self
      .query_persons(sql, vec![text(folded_pattern(&needle)), int(limit)])
      .await
  }

  async fn update_person(&self, id: Uuid, name: PersonName) -> Result<bool> {
    let params = vec![
      opt_text(name.first_name),
      opt_text(name.middle_name),
      opt_text(name.last_name),
      text(encode_uuid(id)),
    ];

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE persons
           SET first_name  = COALESCE(?1, first_name),
               middle_name = COALESCE(?2, middle_name),
               last_name   = COALESCE(?3, last_name)
           WHERE id = ?4",
          rusqlite::params_from_iter(params),
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  // ── Locations and events ──────────────────────────────────────────────────

  async fn create_location(&self, name: String) -> Result<Location> {
    let location = Location { id: Uuid::new_v4(), name, created_at: Utc::now() };

    let id_str = encode_uuid(location.id);
    let name = location.name.clone();
    let at_str = encode_dt(location.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO locations (id, name, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, name, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(location)
  }

  async fn search_locations(&self, needle: String, limit: Limit) -> Result<Vec<Location>> {
    let pattern = folded_pattern(&needle);
    let limit_val = i64::from(limit.get());

    let raws: Vec<RawLocation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT id, name, created_at FROM locations
           WHERE {CASEFOLD}(name) LIKE ?1
           ORDER BY name
           LIMIT ?2"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![pattern, limit_val], RawLocation::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawLocation::into_location).collect()
  }

  async fn create_event(&self, event_type: String) -> Result<Event> {
    let event = Event { id: Uuid::new_v4(), event_type, created_at: Utc::now() };

    let id_str = encode_uuid(event.id);
    let type_str = event.event_type.clone();
    let at_str = encode_dt(event.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO events (id, type, created_at) VALUES (?1, ?2, ?3)",
          rusqlite::params![id_str, type_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    Ok(event)
  }

  async fn link_person_event(&self, link: PersonEvent) -> Result<PersonEvent> {
    let person_str = encode_uuid(link.person_id);
    let event_str = encode_uuid(link.event_id);
    let role = link.role.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO person_events (person_id, event_id, role)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (person_id, event_id) DO UPDATE SET role = excluded.role",
          rusqlite::params![person_str, event_str, role],
        )?;
        Ok(())
      })
      .await?;

    Ok(link)
  }

  async fn events_for_person(
    &self,
    person_id: Uuid,
    limit: Limit,
  ) -> Result<Vec<EventParticipation>> {
    let person_str = encode_uuid(person_id);
    let limit_val = i64::from(limit.get());

    let raws: Vec<RawParticipation> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT e.id, e.type, e.created_at, pe.role
           FROM person_events pe
           JOIN events e ON e.id = pe.event_id
           WHERE pe.person_id = ?1
           ORDER BY e.type
           LIMIT ?2",
        )?;
        let rows = stmt
          .query_map(
            rusqlite::params![person_str, limit_val],
            RawParticipation::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawParticipation::into_participation).collect()
  }

  // ── Relationships ─────────────────────────────────────────────────────────

  async fn create_relationship(&self, input: NewRelationship) -> Result<Relationship> {
    let rel = Relationship {
      id:            Uuid::new_v4(),
      person_id_a:   input.person_id_a,
      person_id_b:   input.person_id_b,
      relation_type: input.relation_type,
      created_at:    Utc::now(),
      review:        ReviewState::default(),
    };

    let id_str = encode_uuid(rel.id);
    let a_str = encode_uuid(rel.person_id_a);
    let b_str = encode_uuid(rel.person_id_b);
    let type_str = rel.relation_type.clone();
    let at_str = encode_dt(rel.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO relationships (id, person_id_a, person_id_b, type, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, a_str, b_str, type_str, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(relationship_id = %rel.id, kind = %rel.relation_type, "created relationship");
    Ok(rel)
  }

  async fn relationships_for_person(
    &self,
    person_id: Uuid,
    limit: Option<Limit>,
  ) -> Result<Vec<Relationship>> {
    let person_str = encode_uuid(person_id);
    // SQLite treats a negative LIMIT as "no limit".
    let limit_val = limit.map_or(-1, |l| i64::from(l.get()));

    let raws: Vec<RawRelationship> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM relationships
           WHERE person_id_a = ?1 OR person_id_b = ?1
           ORDER BY type
           LIMIT ?2",
          RawRelationship::COLUMNS
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![person_str, limit_val],
            RawRelationship::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRelationship::into_relationship).collect()
  }

  // ── Assertions ────────────────────────────────────────────────────────────

  async fn add_assertion(&self, input: NewAssertion) -> Result<Assertion> {
    let assertion = Assertion {
      id:             Uuid::new_v4(),
      subject_kind:   input.subject.kind,
      subject_id:     input.subject.id,
      field_name:     input.field_name,
      asserted_value: input.asserted_value,
      created_at:     Utc::now(),
      review:         ReviewState::default(),
    };

    let params = vec![
      text(encode_uuid(assertion.id)),
      text(encode_subject_kind(assertion.subject_kind)),
      text(encode_uuid(assertion.subject_id)),
      text(assertion.field_name.clone()),
      text(assertion.asserted_value.clone()),
      text(encode_dt(assertion.created_at)),
    ];

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO assertions
             (id, subject_kind, subject_id, field_name, asserted_value, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params_from_iter(params),
        )?;
        Ok(())
      })
      .await?;

    tracing::info!(
      assertion_id = %assertion.id,
      subject_kind = %assertion.subject_kind,
      subject_id = %assertion.subject_id,
      field = %assertion.field_name,
      "added assertion"
    );
    Ok(assertion)
  }

  async fn list_assertions(
    &self,
    subject: SubjectRef,
    field_name: Option<String>,
    limit: Limit,
  ) -> Result<Vec<Assertion>> {
    let params = vec![
      text(encode_subject_kind(subject.kind)),
      text(encode_uuid(subject.id)),
      opt_text(field_name),
      int(limit),
    ];

    let raws: Vec<RawAssertion> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {} FROM assertions
           WHERE subject_kind = ?1 AND subject_id = ?2
             AND (?3 IS NULL OR field_name = ?3)
           ORDER BY id
           LIMIT ?4",
          RawAssertion::COLUMNS
        ))?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawAssertion::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAssertion::into_assertion).collect()
  }

  // ── Research notes ────────────────────────────────────────────────────────

  async fn save_research_note(&self, input: NewResearchNote) -> Result<ResearchNote> {
    let note = ResearchNote {
      id:         Uuid::new_v4(),
      person_id:  input.person_id,
      note:       input.note,
      source_url: input.source_url,
      created_at: Utc::now(),
    };

    let params = vec![
      text(encode_uuid(note.id)),
      text(encode_uuid(note.person_id)),
      text(note.note.clone()),
      opt_text(note.source_url.clone()),
      text(encode_dt(note.created_at)),
    ];

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO research_notes (id, person_id, note, source_url, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params_from_iter(params),
        )?;
        Ok(())
      })
      .await?;

    Ok(note)
  }

  async fn list_research_notes(
    &self,
    person_id: Uuid,
    limit: Limit,
  ) -> Result<Vec<ResearchNote>> {
    self
      .query_notes(
        "person_id = ?1".to_owned(),
        vec![text(encode_uuid(person_id)), int(limit)],
      )
      .await
  }

  async fn search_research_notes(
    &self,
    needle: String,
    limit: Limit,
  ) -> Result<Vec<ResearchNote>> {
    self
      .query_notes(
        format!("{CASEFOLD}(note) LIKE ?1"),
        vec![text(folded_pattern(&needle)), int(limit)],
      )
      .await
  }

  // ── Review status ─────────────────────────────────────────────────────────

  async fn set_review_status(
    &self,
    kind: ReviewKind,
    ids: Vec<Uuid>,
    status: ReviewStatus,
    note: Option<String>,
  ) -> Result<usize> {
    let table = review_table(kind);
    let status = encode_status(status);
    let ids: Vec<String> = ids.into_iter().map(encode_uuid).collect();

    let changed = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let mut changed = 0;
        for chunk in ids.chunks(MAX_BOUND_IDS) {
          let sql = format!(
            "UPDATE {table}
             SET status       = ?1,
                 status_notes = COALESCE(?2, status_notes)
             WHERE id IN ({})",
            placeholders(3, chunk.len()),
          );
          let mut params = Vec::with_capacity(chunk.len() + 2);
          params.push(text(status));
          params.push(opt_text(note.clone()));
          params.extend(chunk.iter().cloned().map(Value::Text));
          changed += tx.execute(&sql, rusqlite::params_from_iter(params))?;
        }
        tx.commit()?;
        Ok(changed)
      })
      .await?;

    Ok(changed)
  }

  async fn list_pending_review(
    &self,
    kind: ReviewKind,
    limit: Limit,
  ) -> Result<Vec<ReviewRecord>> {
    let limit_val = i64::from(limit.get());
    let pending = "status IS NULL OR status = 'unreviewed'";

    match kind {
      ReviewKind::Person => {
        let sql = format!(
          "SELECT {} FROM persons WHERE {pending} ORDER BY rowid LIMIT ?1",
          RawPerson::COLUMNS
        );
        let people = self.query_persons(sql, vec![Value::Integer(limit_val)]).await?;
        Ok(people.into_iter().map(ReviewRecord::Person).collect())
      }
      ReviewKind::Relationship => {
        let raws: Vec<RawRelationship> = self
          .conn
          .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
              "SELECT {} FROM relationships WHERE {pending} ORDER BY rowid LIMIT ?1",
              RawRelationship::COLUMNS
            ))?;
            let rows = stmt
              .query_map(rusqlite::params![limit_val], RawRelationship::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
          })
          .await?;
        raws
          .into_iter()
          .map(|r| r.into_relationship().map(ReviewRecord::Relationship))
          .collect()
      }
      ReviewKind::Assertion => {
        let raws: Vec<RawAssertion> = self
          .conn
          .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
              "SELECT {} FROM assertions WHERE {pending} ORDER BY rowid LIMIT ?1",
              RawAssertion::COLUMNS
            ))?;
            let rows = stmt
              .query_map(rusqlite::params![limit_val], RawAssertion::from_row)?
              .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
          })
          .await?;
        raws
          .into_iter()
          .map(|r| r.into_assertion().map(ReviewRecord::Assertion))
          .collect()
      }
    }
  }
}
