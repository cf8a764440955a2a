//! # Operator decisions
//!
//! The simulator asks an `Operator` what to do with every hand. `Console` is the
//! interactive implementation: it renders hands to a writer and reads answers
//! line by line, re-prompting until the answer is valid.
use crate::error::{Error, Result};
use crate::hand::Hand;
use crate::result::{Decision, HandResult};
use std::io::{self, BufRead, Write};
use std::num::IntErrorKind;

/// The source of keep/mulligan decisions for simulated hands
pub trait Operator {
  /// Presents a freshly drawn hand
  fn show_hand(&mut self, hand_number: usize, hand: &Hand) -> Result<()>;

  /// Returns whether to keep or mulligan `hand`
  fn decide(&mut self, hand: &Hand) -> Result<Decision>;

  /// Returns the 0-based positions of the cards to put on the bottom.
  /// Only asked when keeping a hand below 7 cards; must return exactly
  /// `hand.tier.bottom_count()` positions
  fn choose_bottom(&mut self, hand: &Hand) -> Result<Vec<usize>>;

  /// Called once the hand has been recorded
  fn recorded(&mut self, _result: &HandResult) -> Result<()> {
    Ok(())
  }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BottomError {
  #[error("'{0}' is not a card number")]
  NotANumber(String),
  #[error("expected {expected} card(s), got {actual}")]
  WrongCount { expected: usize, actual: usize },
}

/// Parses a keep/mulligan answer. Accepts `keep`, `k`, `mulligan` and `m` in any case
pub fn parse_decision(input: &str) -> Option<Decision> {
  match input.trim().to_lowercase().as_str() {
    "keep" | "k" => Some(Decision::Keep),
    "mulligan" | "m" => Some(Decision::Mulligan),
    _ => None,
  }
}

/// Parses a whitespace separated list of 1-based card positions into 0-based positions
///
/// Positions outside `1..=hand_len` are dropped before the count is checked against
/// `required`. An empty answer is only valid when nothing needs to go to the bottom.
pub fn parse_bottom(
  input: &str,
  hand_len: usize,
  required: usize,
) -> std::result::Result<Vec<usize>, BottomError> {
  let mut positions = Vec::with_capacity(required);
  let mut dropped = 0;
  for token in input.split_whitespace() {
    let n = match token.parse::<i64>() {
      Ok(n) => n,
      // Too many digits for an i64 is still a number, just never a valid position
      Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
        dropped += 1;
        continue;
      }
      Err(_) => return Err(BottomError::NotANumber(token.to_string())),
    };
    if n >= 1 && n <= hand_len as i64 {
      positions.push(n as usize - 1);
    } else {
      dropped += 1;
    }
  }
  if dropped > 0 {
    warn!(
      "Ignoring {} card position(s) outside 1..={} in '{}'",
      dropped,
      hand_len,
      input.trim()
    );
  }
  if positions.len() != required {
    return Err(BottomError::WrongCount {
      expected: required,
      actual: positions.len(),
    });
  }
  Ok(positions)
}

/// Console is an interactive operator reading answers from `input`
pub struct Console<R, W> {
  input: R,
  output: W,
}

impl Console<io::BufReader<io::Stdin>, io::Stdout> {
  /// Returns a console bound to the process stdin and stdout
  pub fn stdio() -> Self {
    Self::new(io::BufReader::new(io::stdin()), io::stdout())
  }
}

impl<R: BufRead, W: Write> Console<R, W> {
  pub fn new(input: R, output: W) -> Self {
    Self { input, output }
  }

  pub fn into_inner(self) -> (R, W) {
    (self.input, self.output)
  }

  fn ask(&mut self, prompt: &str) -> Result<String> {
    write!(self.output, "{}", prompt)?;
    self.output.flush()?;
    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Err(Error::InputClosed);
    }
    Ok(line)
  }
}

impl<R: BufRead, W: Write> Operator for Console<R, W> {
  fn show_hand(&mut self, hand_number: usize, hand: &Hand) -> Result<()> {
    let out = &mut self.output;
    writeln!(out)?;
    writeln!(out, "Hand #{}", hand_number)?;
    writeln!(out, "{}", "-".repeat(30))?;
    writeln!(out, "Seed: {}", hand.seed)?;
    writeln!(out, "On the: {}", hand.play_or_draw.as_str().to_uppercase())?;
    writeln!(
      out,
      "Mulligan: #{} (keep {} cards)",
      hand.tier.mulligan_number(),
      hand.cards_in_hand()
    )?;
    writeln!(
      out,
      "Your hand ({} cards, {} lands):",
      hand.len(),
      hand.land_count()
    )?;
    for (i, card) in hand.cards.iter().enumerate() {
      writeln!(out, "  {}. {}", i + 1, card)?;
    }
    Ok(())
  }

  fn decide(&mut self, _hand: &Hand) -> Result<Decision> {
    loop {
      let answer = self.ask("\nDecision (keep/mulligan): ")?;
      if let Some(decision) = parse_decision(&answer) {
        return Ok(decision);
      }
      writeln!(self.output, "Please enter 'keep' or 'mulligan'")?;
    }
  }

  fn choose_bottom(&mut self, hand: &Hand) -> Result<Vec<usize>> {
    let required = hand.tier.bottom_count();
    writeln!(
      self.output,
      "\nYou're keeping this hand, but need to put {} card(s) on the bottom (keep {})",
      required,
      hand.cards_in_hand()
    )?;
    writeln!(
      self.output,
      "   Which cards do you want to put on the bottom? (enter numbers separated by spaces)"
    )?;
    writeln!(
      self.output,
      "   Example: 1 3 (to put cards 1 and 3 on the bottom)"
    )?;
    loop {
      let answer = self.ask("Cards to put on bottom: ")?;
      match parse_bottom(&answer, hand.len(), required) {
        Ok(positions) => {
          let names: Vec<&str> = positions.iter().map(|i| hand.cards[*i].as_str()).collect();
          writeln!(self.output, "Putting on bottom: {}", names.join(", "))?;
          return Ok(positions);
        }
        Err(BottomError::NotANumber(_)) => {
          writeln!(
            self.output,
            "Invalid input. Please enter numbers separated by spaces."
          )?;
        }
        Err(BottomError::WrongCount { expected, .. }) => {
          writeln!(
            self.output,
            "You need to put exactly {} card(s) on the bottom",
            expected
          )?;
        }
      }
    }
  }

  fn recorded(&mut self, result: &HandResult) -> Result<()> {
    writeln!(
      self.output,
      "Recorded: {}",
      result.user_decision.as_str().to_uppercase()
    )?;
    Ok(())
  }
}
