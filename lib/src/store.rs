//! # SQLite result store
//!
//! Persists simulation runs, their hand results and a snapshot of the deck list.
//! Tables are created lazily, so every entry point works against a fresh database.
use crate::deck::DeckCard;
use crate::error::Result;
use crate::hand::PlayOrDraw;
use crate::result::{Decision, HandResult};
use crate::stats::Tally;
use chrono::Utc;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};

pub type RunId = String;

/// Tables owned by the store, in creation order
pub const TABLES: [&str; 3] = ["simulation_runs", "hand_results", "deck_cards"];

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS simulation_runs (
    id TEXT PRIMARY KEY,
    created_at TEXT NOT NULL,
    deck_source TEXT,
    deck_name TEXT,
    total_hands INTEGER,
    user_name TEXT,
    notes TEXT
);

CREATE TABLE IF NOT EXISTS hand_results (
    id TEXT PRIMARY KEY,
    simulation_run_id TEXT NOT NULL,
    hand_number INTEGER NOT NULL,
    seed INTEGER NOT NULL,
    cards_in_hand INTEGER NOT NULL,
    cards TEXT NOT NULL,
    play_or_draw TEXT NOT NULL,
    mulligan_number INTEGER NOT NULL,
    user_decision TEXT NOT NULL,
    cards_to_put_bottom TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (simulation_run_id) REFERENCES simulation_runs(id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS deck_cards (
    id TEXT PRIMARY KEY,
    simulation_run_id TEXT NOT NULL,
    card_name TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    card_type TEXT,
    mana_cost TEXT,
    created_at TEXT NOT NULL,
    FOREIGN KEY (simulation_run_id) REFERENCES simulation_runs(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_hand_results_run ON hand_results(simulation_run_id, hand_number);
CREATE INDEX IF NOT EXISTS idx_deck_cards_run ON deck_cards(simulation_run_id);
CREATE INDEX IF NOT EXISTS idx_simulation_runs_created ON simulation_runs(created_at);
"#;

/// NewRun is everything needed to persist a finished session
#[derive(Debug, Clone)]
pub struct NewRun {
  pub deck_source: String,
  pub deck_name: String,
  pub total_hands: usize,
  pub results: Vec<HandResult>,
  pub deck_cards: Vec<DeckCard>,
  pub user_name: Option<String>,
  pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
  pub id: RunId,
  pub created_at: String,
  pub deck_source: String,
  pub deck_name: String,
  pub total_hands: usize,
  pub user_name: Option<String>,
  pub notes: Option<String>,
}

/// RunDetail is a stored run with its hands in hand order.
/// Stored hands carry the row creation time in `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunDetail {
  pub summary: RunSummary,
  pub hands: Vec<HandResult>,
  pub deck_cards: Vec<DeckCard>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SchemaStatus {
  pub existing: Vec<String>,
  pub missing: Vec<String>,
}

impl SchemaStatus {
  pub fn is_ready(&self) -> bool {
    self.missing.is_empty()
  }
}

pub struct Store {
  conn: Connection,
  path: Option<PathBuf>,
}

impl Store {
  /// Opens (or creates) the database file at `path`
  pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    debug!("Opening result store @ {:?}", path);
    let conn = Connection::open(path)?;
    Self::with_connection(conn, Some(path.to_path_buf()))
  }

  /// Opens a private in-memory database
  pub fn in_memory() -> Result<Self> {
    Self::with_connection(Connection::open_in_memory()?, None)
  }

  fn with_connection(conn: Connection, path: Option<PathBuf>) -> Result<Self> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(Self { conn, path })
  }

  pub fn path(&self) -> Option<&Path> {
    self.path.as_deref()
  }

  /// Runs a trivial query to verify the connection works
  pub fn ping(&self) -> Result<()> {
    self.conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
    Ok(())
  }

  /// Creates any missing tables
  pub fn ensure_schema(&self) -> Result<()> {
    self.conn.execute_batch(SCHEMA)?;
    Ok(())
  }

  pub fn schema_status(&self) -> Result<SchemaStatus> {
    let mut stmt = self
      .conn
      .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")?;
    let existing: Vec<String> = stmt
      .query_map([], |row| row.get(0))?
      .collect::<rusqlite::Result<_>>()?;
    let missing = TABLES
      .iter()
      .filter(|t| !existing.iter().any(|e| e == *t))
      .map(|t| t.to_string())
      .collect();
    Ok(SchemaStatus { existing, missing })
  }

  /// Creates the schema, dropping existing tables first when `force` is set
  pub fn init(&self, force: bool) -> Result<()> {
    if force {
      info!("Dropping existing tables");
      self.drop_schema()?;
    }
    self.ensure_schema()
  }

  pub fn drop_schema(&self) -> Result<()> {
    self.conn.execute_batch(
      "DROP TABLE IF EXISTS hand_results;
       DROP TABLE IF EXISTS deck_cards;
       DROP TABLE IF EXISTS simulation_runs;",
    )?;
    Ok(())
  }

  /// Saves a run with its deck cards and hands in a single transaction.
  /// Nothing is written if any row fails.
  pub fn save_run(&mut self, run: &NewRun) -> Result<RunId> {
    self.ensure_schema()?;
    let id = uuid::Uuid::new_v4().to_string();
    let now = db_now();
    let tx = self.conn.transaction()?;
    tx.execute(
      "INSERT INTO simulation_runs (id, created_at, deck_source, deck_name, total_hands, user_name, notes)
       VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
      params![
        id,
        now,
        run.deck_source,
        run.deck_name,
        run.total_hands as i64,
        run.user_name,
        run.notes,
      ],
    )?;
    {
      let mut insert_card = tx.prepare(
        "INSERT INTO deck_cards (id, simulation_run_id, card_name, quantity, card_type, mana_cost, created_at)
         VALUES (?1, ?2, ?3, ?4, NULL, NULL, ?5)",
      )?;
      for card in &run.deck_cards {
        insert_card.execute(params![
          uuid::Uuid::new_v4().to_string(),
          id,
          card.name,
          card.count as i64,
          now,
        ])?;
      }
      let mut insert_hand = tx.prepare(
        "INSERT INTO hand_results (id, simulation_run_id, hand_number, seed, cards_in_hand, cards,
                                   play_or_draw, mulligan_number, user_decision, cards_to_put_bottom, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
      )?;
      for hand in &run.results {
        let cards = serde_json::to_string(&hand.cards)?;
        let bottom = match &hand.cards_to_keep {
          Some(bottom) => Some(serde_json::to_string(bottom)?),
          None => None,
        };
        insert_hand.execute(params![
          uuid::Uuid::new_v4().to_string(),
          id,
          hand.hand_number as i64,
          hand.seed,
          hand.cards_in_hand as i64,
          cards,
          hand.play_or_draw.as_str(),
          hand.mulligan_number,
          hand.user_decision.as_str(),
          bottom,
          now,
        ])?;
      }
    }
    tx.commit()?;
    info!(
      "Saved run {} with {} hands and {} deck cards",
      id,
      run.results.len(),
      run.deck_cards.len()
    );
    Ok(id)
  }

  /// Returns up to `limit` runs, newest first
  pub fn list_runs(&self, limit: usize) -> Result<Vec<RunSummary>> {
    self.ensure_schema()?;
    let mut stmt = self.conn.prepare(
      "SELECT id, created_at, deck_source, deck_name, total_hands, user_name, notes
       FROM simulation_runs ORDER BY created_at DESC, rowid DESC LIMIT ?1",
    )?;
    let runs = stmt
      .query_map(params![limit as i64], run_summary_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(runs)
  }

  pub fn get_run(&self, id: &str) -> Result<Option<RunDetail>> {
    self.ensure_schema()?;
    let summary = self
      .conn
      .query_row(
        "SELECT id, created_at, deck_source, deck_name, total_hands, user_name, notes
         FROM simulation_runs WHERE id = ?1",
        params![id],
        run_summary_from_row,
      )
      .optional()?;
    let summary = match summary {
      Some(summary) => summary,
      None => return Ok(None),
    };
    let hands = self.hands_for_run(id)?;
    let mut stmt = self.conn.prepare(
      "SELECT card_name, quantity FROM deck_cards WHERE simulation_run_id = ?1 ORDER BY card_name",
    )?;
    let deck_cards = stmt
      .query_map(params![id], |row| {
        Ok(DeckCard {
          name: row.get(0)?,
          count: row.get::<_, i64>(1)? as usize,
        })
      })?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(Some(RunDetail {
      summary,
      hands,
      deck_cards,
    }))
  }

  /// Tallies the stored hands of a run. Returns `None` when the run has no hands
  pub fn get_stats(&self, id: &str) -> Result<Option<Tally>> {
    let hands = self.hands_for_run(id)?;
    if hands.is_empty() {
      return Ok(None);
    }
    Ok(Some(Tally::from_results(&hands)))
  }

  /// Deletes a run along with its hands and deck cards. Returns false if no such run exists
  pub fn delete_run(&self, id: &str) -> Result<bool> {
    self.ensure_schema()?;
    let deleted = self
      .conn
      .execute("DELETE FROM simulation_runs WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
  }

  #[cfg(test)]
  pub(crate) fn connection(&self) -> &Connection {
    &self.conn
  }

  fn hands_for_run(&self, id: &str) -> Result<Vec<HandResult>> {
    self.ensure_schema()?;
    let mut stmt = self.conn.prepare(
      "SELECT hand_number, seed, cards_in_hand, cards, play_or_draw, mulligan_number,
              user_decision, cards_to_put_bottom, created_at
       FROM hand_results WHERE simulation_run_id = ?1 ORDER BY hand_number",
    )?;
    let hands = stmt
      .query_map(params![id], hand_from_row)?
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(hands)
  }
}

fn db_now() -> String {
  Utc::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

fn run_summary_from_row(row: &Row) -> rusqlite::Result<RunSummary> {
  Ok(RunSummary {
    id: row.get(0)?,
    created_at: row.get(1)?,
    deck_source: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
    deck_name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
    total_hands: row.get::<_, Option<i64>>(4)?.unwrap_or(0) as usize,
    user_name: row.get(5)?,
    notes: row.get(6)?,
  })
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
  rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

fn json_column(row: &Row, idx: usize) -> rusqlite::Result<Vec<String>> {
  let text: String = row.get(idx)?;
  serde_json::from_str(&text).map_err(|e| conversion_error(idx, e.to_string()))
}

fn hand_from_row(row: &Row) -> rusqlite::Result<HandResult> {
  let play_or_draw: String = row.get(4)?;
  let play_or_draw = PlayOrDraw::from_str(&play_or_draw)
    .ok_or_else(|| conversion_error(4, format!("bad play_or_draw '{}'", play_or_draw)))?;
  let decision: String = row.get(6)?;
  let user_decision = Decision::from_str(&decision)
    .ok_or_else(|| conversion_error(6, format!("bad user_decision '{}'", decision)))?;
  let cards_to_keep = match row.get::<_, Option<String>>(7)? {
    Some(_) => Some(json_column(row, 7)?),
    None => None,
  };
  Ok(HandResult {
    hand_number: row.get::<_, i64>(0)? as usize,
    seed: row.get(1)?,
    cards_in_hand: row.get::<_, i64>(2)? as usize,
    cards: json_column(row, 3)?,
    play_or_draw,
    mulligan_number: row.get(5)?,
    user_decision,
    cards_to_keep,
    timestamp: row.get(8)?,
  })
}
