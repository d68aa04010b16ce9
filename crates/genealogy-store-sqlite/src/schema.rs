//! SQL schema for the genealogy SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout version; there is no migration machinery.

use rusqlite::{Connection, functions::FunctionFlags};

/// SQL name of the Unicode lowercasing function used by text searches.
/// SQLite's own `LIKE` only ignores case for ASCII letters.
pub const CASEFOLD: &str = "casefold";

/// Register the scalar functions the queries rely on. Must run on every
/// new connection, before any search.
pub fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
  conn.create_scalar_function(
    CASEFOLD,
    1,
    FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
    |ctx| {
      let value: Option<String> = ctx.get(0)?;
      Ok(value.map(|v| v.to_lowercase()))
    },
  )
}

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// No foreign keys: relationship endpoints may dangle and assertion subjects
/// are untyped references, both by contract.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS persons (
    id           TEXT PRIMARY KEY,
    first_name   TEXT,
    middle_name  TEXT,
    last_name    TEXT,
    created_at   TEXT NOT NULL,
    status       TEXT,            -- NULL | 'unreviewed' | 'verified' | 'rejected'
    status_notes TEXT
);

CREATE TABLE IF NOT EXISTS locations (
    id         TEXT PRIMARY KEY,
    name       TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS events (
    id         TEXT PRIMARY KEY,
    type       TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS person_events (
    person_id TEXT NOT NULL,
    event_id  TEXT NOT NULL,
    role      TEXT NOT NULL,
    PRIMARY KEY (person_id, event_id)
);

-- Direction is carried by `type` plus endpoint position, never by a column.
CREATE TABLE IF NOT EXISTS relationships (
    id           TEXT PRIMARY KEY,
    person_id_a  TEXT NOT NULL,
    person_id_b  TEXT NOT NULL,
    type         TEXT NOT NULL,
    created_at   TEXT NOT NULL,
    status       TEXT,
    status_notes TEXT
);

CREATE TABLE IF NOT EXISTS assertions (
    id             TEXT PRIMARY KEY,
    subject_kind   TEXT NOT NULL,   -- SubjectKind, snake_case
    subject_id     TEXT NOT NULL,
    field_name     TEXT NOT NULL,
    asserted_value TEXT NOT NULL,
    created_at     TEXT NOT NULL,
    status         TEXT,
    status_notes   TEXT
);

CREATE TABLE IF NOT EXISTS research_notes (
    id         TEXT PRIMARY KEY,
    person_id  TEXT NOT NULL,
    note       TEXT NOT NULL,
    source_url TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS relationships_a_idx     ON relationships(person_id_a);
CREATE INDEX IF NOT EXISTS relationships_b_idx     ON relationships(person_id_b);
CREATE INDEX IF NOT EXISTS assertions_subject_idx  ON assertions(subject_kind, subject_id);
CREATE INDEX IF NOT EXISTS person_events_event_idx ON person_events(event_id);
CREATE INDEX IF NOT EXISTS research_notes_person_idx ON research_notes(person_id);

PRAGMA user_version = 1;
";
