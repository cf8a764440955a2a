//! # Interactive mulligan sessions
//!
//! A `Session` owns a deck and the hand results recorded so far. Every hand is
//! generated from its own seed, shown to an `Operator`, and recorded once the
//! operator has decided what to do with it.
use crate::deck::Deck;
use crate::error::{Error, Result};
use crate::hand::Hand;
use crate::mulligan::{Mulligan, STARTING_HAND_SIZE};
use crate::operator::Operator;
use crate::result::{Decision, HandResult, Report};
use crate::stats::Tally;
use crate::store::{NewRun, RunId, Store};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::path::Path;

/// Hand seeds are drawn uniformly from 1..=MAX_SEED
pub const MAX_SEED: u32 = 1_000_000;

pub struct Session {
  pub deck: Deck,
  pub deck_source: String,
  pub deck_name: String,
  seeder: StdRng,
  results: Vec<HandResult>,
}

impl Session {
  /// Returns a new session, or `Error::EmptyDecklist` if the deck has no cards
  pub fn new(deck: Deck, deck_source: &str, deck_name: &str) -> Result<Self> {
    if deck.is_empty() {
      return Err(Error::EmptyDecklist);
    }
    Ok(Self {
      deck,
      deck_source: deck_source.to_string(),
      deck_name: deck_name.to_string(),
      seeder: StdRng::from_entropy(),
      results: Vec::new(),
    })
  }

  pub fn from_text(list: &str, deck_name: &str) -> Result<Self> {
    let deck = Deck::from_list(list)?;
    Self::new(deck, "text_input", deck_name)
  }

  pub fn from_file<P: AsRef<Path>>(path: P, deck_name: &str) -> Result<Self> {
    let path = path.as_ref();
    let deck = Deck::from_file(path)?;
    Self::new(deck, &path.display().to_string(), deck_name)
  }

  pub fn from_url(url: &str, deck_name: &str) -> Result<Self> {
    let deck = Deck::from_url(url)?;
    Self::new(deck, url, deck_name)
  }

  /// Makes the sequence of hand seeds reproducible
  pub fn with_seed(mut self, seed: u64) -> Self {
    self.seeder = StdRng::seed_from_u64(seed);
    self
  }

  /// Simulates `num_hands` hands, asking `operator` for a decision on each
  ///
  /// Hands are strictly sequential: hand N+1 is not drawn before the operator
  /// has finished with hand N. Returns the results recorded by this call.
  pub fn run<M: Mulligan, O: Operator>(
    &mut self,
    num_hands: usize,
    mulligan: &M,
    operator: &mut O,
  ) -> Result<&[HandResult]> {
    if self.deck.len() < STARTING_HAND_SIZE {
      return Err(Error::DeckTooSmall(self.deck.len(), STARTING_HAND_SIZE));
    }
    info!(
      "Simulating {} hands from a {} card deck",
      num_hands,
      self.deck.len()
    );
    let tokens = self.deck.flatten();
    let first = self.results.len();
    for _ in 0..num_hands {
      let hand_number = self.results.len() + 1;
      let seed: u32 = self.seeder.gen_range(1, MAX_SEED + 1);
      let hand = Hand::from_seed(mulligan, &tokens, seed);
      operator.show_hand(hand_number, &hand)?;
      let decision = operator.decide(&hand)?;
      let bottomed = if decision == Decision::Keep && hand.cards_in_hand() < STARTING_HAND_SIZE {
        let expected = hand.tier.bottom_count();
        let positions = operator.choose_bottom(&hand)?;
        let names: Vec<String> = positions
          .iter()
          .filter_map(|i| hand.cards.get(*i).cloned())
          .collect();
        if positions.len() != expected || names.len() != expected {
          return Err(Error::BottomCount {
            expected,
            actual: names.len(),
          });
        }
        Some(names)
      } else {
        None
      };
      let result = HandResult::new(hand_number, hand, decision, bottomed);
      debug!(
        "Hand #{} seed {} mulligan #{} {}",
        result.hand_number, result.seed, result.mulligan_number, result.user_decision
      );
      operator.recorded(&result)?;
      self.results.push(result);
    }
    Ok(&self.results[first..])
  }

  pub fn results(&self) -> &[HandResult] {
    &self.results
  }

  /// Tallies the hands recorded in memory
  pub fn tally(&self) -> Tally {
    Tally::from_results(&self.results)
  }

  pub fn report(&self) -> Report {
    Report::new(&self.results)
  }

  pub fn new_run(&self, user_name: Option<&str>, notes: Option<&str>) -> NewRun {
    NewRun {
      deck_source: self.deck_source.clone(),
      deck_name: self.deck_name.clone(),
      total_hands: self.results.len(),
      results: self.results.clone(),
      deck_cards: self.deck.cards.clone(),
      user_name: user_name.map(String::from),
      notes: notes.map(String::from),
    }
  }

  /// Persists the session as a single simulation run
  pub fn save(&self, store: &mut Store, user_name: Option<&str>, notes: Option<&str>) -> Result<RunId> {
    store.save_run(&self.new_run(user_name, notes))
  }

  /// Saves the recorded hands to `store`, then writes the JSON export to `export_path`.
  /// Each target is attempted regardless of how the other one went.
  pub fn finish(
    &self,
    store: Option<&mut Store>,
    export_path: Option<&Path>,
    user_name: Option<&str>,
    notes: Option<&str>,
  ) -> Finished {
    let run = match store {
      Some(_) if self.results.is_empty() => {
        info!("No hands recorded, nothing to store");
        None
      }
      Some(store) => Some(self.save(store, user_name, notes)),
      None => None,
    };
    if let Some(Err(e)) = &run {
      warn!("Could not save run: {}", e);
    }
    let export = export_path.map(|path| self.report().save(path));
    if let Some(Err(e)) = &export {
      warn!("Could not write results to {:?}: {}", export_path, e);
    }
    Finished { run, export }
  }
}

/// Finished holds the outcome of each persistence target of `Session::finish`.
/// A target that was not requested is `None`.
#[derive(Debug)]
pub struct Finished {
  pub run: Option<Result<RunId>>,
  pub export: Option<Result<()>>,
}
