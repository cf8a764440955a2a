//! # Hand results and the JSON export
use crate::error::Result;
use crate::hand::{Hand, PlayOrDraw};
use chrono::Local;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// The operator's call on a simulated hand
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
  Keep,
  Mulligan,
}

impl Decision {
  pub fn as_str(self) -> &'static str {
    match self {
      Decision::Keep => "keep",
      Decision::Mulligan => "mulligan",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "keep" => Some(Decision::Keep),
      "mulligan" => Some(Decision::Mulligan),
      _ => None,
    }
  }
}

impl fmt::Display for Decision {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// HandResult records a single simulated hand and what the operator did with it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
  pub hand_number: usize,
  pub seed: u32,
  pub cards_in_hand: usize,
  /// All 7 drawn cards, whatever the final hand size
  pub cards: Vec<String>,
  pub play_or_draw: PlayOrDraw,
  pub mulligan_number: u8,
  pub user_decision: Decision,
  /// The cards put on the bottom. Only set when keeping fewer than 7 cards
  pub cards_to_keep: Option<Vec<String>>,
  pub timestamp: String,
}

impl HandResult {
  pub fn new(
    hand_number: usize,
    hand: Hand,
    user_decision: Decision,
    bottomed: Option<Vec<String>>,
  ) -> Self {
    Self {
      hand_number,
      seed: hand.seed,
      cards_in_hand: hand.tier.cards_in_hand(),
      mulligan_number: hand.tier.mulligan_number(),
      cards: hand.cards,
      play_or_draw: hand.play_or_draw,
      user_decision,
      cards_to_keep: bottomed,
      timestamp: now_iso8601(),
    }
  }
}

/// Report is the JSON document written by `--save`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
  pub timestamp: String,
  pub total_hands: usize,
  pub results: Vec<HandResult>,
}

impl Report {
  pub fn new(results: &[HandResult]) -> Self {
    Self {
      timestamp: now_iso8601(),
      total_hands: results.len(),
      results: results.to_vec(),
    }
  }

  pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let path = path.as_ref();
    info!("Writing {} hand results to {:?}", self.total_hands, path);
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, self)?;
    writer.flush()?;
    Ok(())
  }

  pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
  }
}

pub(crate) fn now_iso8601() -> String {
  Local::now().naive_local().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

#[cfg(test)]
mod tests {
  use crate::result::*;

  fn sample_hand_result() -> HandResult {
    HandResult {
      hand_number: 1,
      seed: 12345,
      cards_in_hand: 6,
      cards: vec![
        "Lightning Bolt",
        "Mountain",
        "Goblin Guide",
        "Mountain",
        "Lightning Bolt",
        "Mountain",
        "Jötun Grunt",
      ]
      .into_iter()
      .map(String::from)
      .collect(),
      play_or_draw: PlayOrDraw::Draw,
      mulligan_number: 2,
      user_decision: Decision::Keep,
      cards_to_keep: Some(vec!["Jötun Grunt".to_string()]),
      timestamp: "2024-01-01T12:00:00".to_string(),
    }
  }

  #[test]
  fn json_field_names() {
    let value = serde_json::to_value(sample_hand_result()).unwrap();
    assert_eq!(value["hand_number"], 1);
    assert_eq!(value["seed"], 12345);
    assert_eq!(value["cards_in_hand"], 6);
    assert_eq!(value["cards"].as_array().unwrap().len(), 7);
    assert_eq!(value["play_or_draw"], "draw");
    assert_eq!(value["mulligan_number"], 2);
    assert_eq!(value["user_decision"], "keep");
    assert_eq!(value["cards_to_keep"][0], "Jötun Grunt");
    assert_eq!(value["timestamp"], "2024-01-01T12:00:00");
  }

  #[test]
  fn absent_bottom_is_null() {
    let mut result = sample_hand_result();
    result.user_decision = Decision::Mulligan;
    result.cards_to_keep = None;
    let value = serde_json::to_value(result).unwrap();
    assert!(value["cards_to_keep"].is_null());
    assert_eq!(value["user_decision"], "mulligan");
  }

  #[test]
  fn save_and_load_report() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("results.json");
    let mut second = sample_hand_result();
    second.hand_number = 2;
    second.cards_to_keep = None;
    let report = Report::new(&[sample_hand_result(), second]);
    report.save(&path).unwrap();

    let loaded = Report::load(&path).unwrap();
    assert_eq!(loaded.total_hands, 2);
    assert_eq!(loaded.results.len(), 2);
    assert_eq!(loaded, report);

    let raw: serde_json::Value =
      serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(raw["total_hands"], 2);
    assert!(raw["timestamp"].is_string());
  }
}
