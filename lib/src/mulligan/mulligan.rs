use rand::prelude::*;

/// Number of cards drawn for every opening hand, regardless of the mulligan tier
pub const STARTING_HAND_SIZE: usize = 7;

/// MulliganTier is the depth of the mulligan process for a hand
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MulliganTier {
  /// No mulligan, keep 7
  First,
  /// One mulligan, keep 6
  Second,
  /// Two mulligans, keep 5
  Third,
}

impl MulliganTier {
  /// 1-based mulligan number as recorded in hand results
  pub fn mulligan_number(self) -> u8 {
    match self {
      MulliganTier::First => 1,
      MulliganTier::Second => 2,
      MulliganTier::Third => 3,
    }
  }

  /// The number of cards kept after the mulligan process
  pub fn cards_in_hand(self) -> usize {
    STARTING_HAND_SIZE + 1 - self.mulligan_number() as usize
  }

  /// The number of cards put on the bottom when keeping at this tier
  pub fn bottom_count(self) -> usize {
    STARTING_HAND_SIZE - self.cards_in_hand()
  }

  pub fn from_mulligan_number(n: u8) -> Option<Self> {
    match n {
      1 => Some(MulliganTier::First),
      2 => Some(MulliganTier::Second),
      3 => Some(MulliganTier::Third),
      _ => None,
    }
  }
}

/// The base trait for any mulligan policy
pub trait Mulligan {
  /// Returns the mulligan tier for a new hand
  ///
  /// # Arguments
  ///
  /// * `rng` - The hand's random number generator. Implementations must draw exactly one
  /// uniform value from it so the draws that follow stay aligned with the hand seed
  fn roll(&self, rng: &mut impl Rng) -> MulliganTier;
}
