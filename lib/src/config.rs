//! # Configuration
//!
//! The result store location comes from the environment: `MULLIGAN_DB` wins over
//! `DATABASE_URL`, and a `sqlite://` prefix on either is stripped.
use std::env;
use std::path::PathBuf;

pub const DEFAULT_DB_PATH: &str = "mulligan_simulator.db";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
  pub database_path: PathBuf,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      database_path: PathBuf::from(DEFAULT_DB_PATH),
    }
  }
}

impl Config {
  pub fn from_env() -> Self {
    Self::from_lookup(|key| env::var(key).ok())
  }

  /// Builds a config from an arbitrary variable lookup
  pub fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
    let path = ["MULLIGAN_DB", "DATABASE_URL"]
      .iter()
      .filter_map(|key| lookup(*key))
      .map(|value| value.trim().to_string())
      .find(|value| !value.is_empty());
    match path {
      Some(value) => {
        let path = value.strip_prefix("sqlite://").unwrap_or(&value);
        Self {
          database_path: PathBuf::from(path),
        }
      }
      None => Self::default(),
    }
  }
}

#[cfg(test)]
mod tests {
  use crate::config::*;
  use std::collections::HashMap;

  fn config(vars: &[(&str, &str)]) -> Config {
    let vars: HashMap<String, String> = vars
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    Config::from_lookup(|key| vars.get(key).cloned())
  }

  #[test]
  fn default_path() {
    assert_eq!(config(&[]).database_path, PathBuf::from(DEFAULT_DB_PATH));
    assert_eq!(config(&[("MULLIGAN_DB", "  ")]).database_path, PathBuf::from(DEFAULT_DB_PATH));
  }

  #[test]
  fn mulligan_db_wins() {
    let c = config(&[("MULLIGAN_DB", "/tmp/a.db"), ("DATABASE_URL", "sqlite:///tmp/b.db")]);
    assert_eq!(c.database_path, PathBuf::from("/tmp/a.db"));
  }

  #[test]
  fn database_url_prefix_is_stripped() {
    let c = config(&[("DATABASE_URL", "sqlite://runs.db")]);
    assert_eq!(c.database_path, PathBuf::from("runs.db"));
    let c = config(&[("DATABASE_URL", "sqlite:///var/lib/runs.db")]);
    assert_eq!(c.database_path, PathBuf::from("/var/lib/runs.db"));
  }
}
