//! # Simulated opening hands
use crate::mulligan::{Mulligan, MulliganTier, STARTING_HAND_SIZE};
use rand::prelude::*;
use rand::rngs::StdRng;
use std::fmt;

/// Words that mark a card name as a land for display purposes
const LAND_KEYWORDS: [&str; 7] = [
  "land", "plains", "island", "swamp", "mountain", "forest", "wastes",
];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayOrDraw {
  Play,
  Draw,
}

impl PlayOrDraw {
  pub fn as_str(self) -> &'static str {
    match self {
      PlayOrDraw::Play => "play",
      PlayOrDraw::Draw => "draw",
    }
  }

  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "play" => Some(PlayOrDraw::Play),
      "draw" => Some(PlayOrDraw::Draw),
      _ => None,
    }
  }
}

impl fmt::Display for PlayOrDraw {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Hand represents the 7 cards drawn for a single simulated opening hand,
/// along with the mulligan tier and play order rolled for it
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
  pub seed: u32,
  pub tier: MulliganTier,
  pub cards: Vec<String>,
  pub play_or_draw: PlayOrDraw,
}

impl Hand {
  /// Returns the hand determined by `seed`
  ///
  /// The draws happen in a fixed order on a generator seeded with `seed`:
  /// the mulligan roll, the 7 card sample (without replacement), then the play/draw roll.
  /// The same deck, policy and seed always produce the same hand.
  pub fn from_seed<M: Mulligan>(mulligan: &M, deck: &[&str], seed: u32) -> Self {
    let mut rng = StdRng::seed_from_u64(u64::from(seed));
    let tier = mulligan.roll(&mut rng);
    let deck_len = deck.len();
    let hand_size = std::cmp::min(deck_len, STARTING_HAND_SIZE);
    // Shuffle an index range rather than the deck so repeated names stay distinct tokens
    let mut index_range: Vec<_> = (0..deck_len).collect();
    let cards: Vec<String> = index_range
      .partial_shuffle(&mut rng, hand_size)
      .0
      .iter()
      .map(|i| deck[*i].to_string())
      .collect();
    let play_or_draw = if rng.gen::<f64>() < 0.5 {
      PlayOrDraw::Play
    } else {
      PlayOrDraw::Draw
    };
    Self {
      seed,
      tier,
      cards,
      play_or_draw,
    }
  }

  pub fn len(&self) -> usize {
    self.cards.len()
  }

  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }

  pub fn cards_in_hand(&self) -> usize {
    self.tier.cards_in_hand()
  }

  /// Returns the number of cards whose name looks like a land
  pub fn land_count(&self) -> usize {
    self
      .cards
      .iter()
      .filter(|name| {
        let lower = name.to_lowercase();
        LAND_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
      })
      .count()
  }
}
