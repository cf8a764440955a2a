//! # Errors
use crate::deck::DeckcodeError;

/// Error is the crate-wide failure type
#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Decklist is empty")]
  EmptyDecklist,
  #[error("Deck has {0} cards, need at least {1} to draw a hand")]
  DeckTooSmall(usize, usize),
  #[error("Bad decklist: {0}")]
  Deckcode(String),
  #[error("Expected {expected} card(s) to put on the bottom, got {actual}")]
  BottomCount { expected: usize, actual: usize },
  #[error("Input closed while waiting for a decision")]
  InputClosed,
  #[error("Simulation run {0} not found")]
  RunNotFound(String),
  #[error("IO error: {0}")]
  Io(#[from] std::io::Error),
  #[error("JSON error: {0}")]
  Json(#[from] serde_json::Error),
  #[error("Database error: {0}")]
  Sqlite(#[from] rusqlite::Error),
  #[error("HTTP error: {0}")]
  Http(#[from] reqwest::Error),
}

impl From<DeckcodeError> for Error {
  fn from(error: DeckcodeError) -> Self {
    Self::Deckcode(error.0)
  }
}

pub type Result<T> = std::result::Result<T, Error>;
