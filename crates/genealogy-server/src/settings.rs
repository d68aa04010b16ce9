//! Server configuration.
//!
//! Read from an optional TOML file, then overridden by `GENEALOGY_*`
//! environment variables (`GENEALOGY_PORT=9000`). Every key has a default,
//! so the server starts with no configuration at all.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::Deserialize;

/// Runtime server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_owned(),
      port:       8000,
      store_path: PathBuf::from("genealogy.sqlite3"),
    }
  }
}

impl ServerConfig {
  /// Layer `file` (if it exists) under the environment.
  pub fn load(file: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("GENEALOGY"))
      .build()
      .with_context(|| format!("failed to read config file {file:?}"))?;

    let mut cfg: Self = settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    Ok(cfg)
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use std::io::Write as _;

  use super::*;

  #[test]
  fn missing_file_gives_defaults() {
    let cfg = ServerConfig::load(Path::new("/nonexistent/genealogy.toml")).unwrap();
    assert_eq!(cfg.port, ServerConfig::default().port);
    assert_eq!(cfg.address(), format!("{}:{}", cfg.host, cfg.port));
  }

  #[test]
  fn file_values_override_defaults() {
    let path = std::env::temp_dir().join(format!("genealogy-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "port = 9123\nstore_path = \"/tmp/tree.sqlite3\"").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(cfg.port, 9123);
    assert_eq!(cfg.store_path, PathBuf::from("/tmp/tree.sqlite3"));
    assert_eq!(cfg.host, "127.0.0.1");
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/tree.sqlite3")),
      PathBuf::from(home).join("tree.sqlite3")
    );
    assert_eq!(expand_tilde(Path::new("/abs/x")), PathBuf::from("/abs/x"));
  }
}
