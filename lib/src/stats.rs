//! # Session tallies
use crate::hand::PlayOrDraw;
use crate::result::{Decision, HandResult};
use std::collections::BTreeMap;
use std::fmt;

/// Tally aggregates keep/mulligan and play/draw counts over a list of hands
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tally {
  pub total_hands: usize,
  pub keep_count: usize,
  pub mulligan_count: usize,
  pub keep_rate: f64,
  /// Hand count by mulligan number
  pub mulligan_distribution: BTreeMap<u8, usize>,
  pub play_count: usize,
  pub draw_count: usize,
  pub play_rate: f64,
}

impl Tally {
  pub fn new() -> Self {
    Self::default()
  }

  /// Accumulates a single hand
  pub fn add(&mut self, mulligan_number: u8, decision: Decision, play_or_draw: PlayOrDraw) {
    self.total_hands += 1;
    match decision {
      Decision::Keep => self.keep_count += 1,
      Decision::Mulligan => self.mulligan_count += 1,
    }
    *self
      .mulligan_distribution
      .entry(mulligan_number)
      .or_insert(0) += 1;
    match play_or_draw {
      PlayOrDraw::Play => self.play_count += 1,
      PlayOrDraw::Draw => self.draw_count += 1,
    }
    self.keep_rate = rate(self.keep_count, self.total_hands);
    self.play_rate = rate(self.play_count, self.total_hands);
  }

  pub fn from_results(results: &[HandResult]) -> Self {
    let mut tally = Self::new();
    for r in results {
      tally.add(r.mulligan_number, r.user_decision, r.play_or_draw);
    }
    tally
  }

  pub fn mulligan_rate(&self) -> f64 {
    rate(self.mulligan_count, self.total_hands)
  }

  pub fn draw_rate(&self) -> f64 {
    rate(self.draw_count, self.total_hands)
  }

  pub fn is_empty(&self) -> bool {
    self.total_hands == 0
  }
}

fn rate(count: usize, total: usize) -> f64 {
  if total == 0 {
    0.0
  } else {
    count as f64 / total as f64
  }
}

fn percent(r: f64) -> String {
  format!("{:.1}%", r * 100.0)
}

impl fmt::Display for Tally {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "Total hands: {}", self.total_hands)?;
    writeln!(
      f,
      "Kept: {} ({})",
      self.keep_count,
      percent(self.keep_rate)
    )?;
    writeln!(
      f,
      "Mulliganed: {} ({})",
      self.mulligan_count,
      percent(self.mulligan_rate())
    )?;
    writeln!(f)?;
    writeln!(f, "Mulligan distribution:")?;
    for (mulligan_number, count) in &self.mulligan_distribution {
      writeln!(
        f,
        "  Mulligan #{}: {} hands ({})",
        mulligan_number,
        count,
        percent(rate(*count, self.total_hands))
      )?;
    }
    writeln!(f)?;
    writeln!(f, "Play/Draw distribution:")?;
    writeln!(f, "  Play: {} ({})", self.play_count, percent(self.play_rate))?;
    write!(f, "  Draw: {} ({})", self.draw_count, percent(self.draw_rate()))
  }
}
