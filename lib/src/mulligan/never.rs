use crate::mulligan::{Mulligan, MulliganTier};
use rand::prelude::*;

/// Never represents the mulligan policy wherein the
/// player always keeps their initially drawn starting hand
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct Never;

impl Never {
  pub fn new() -> Self {
    Never
  }
}

impl Mulligan for Never {
  fn roll(&self, rng: &mut impl Rng) -> MulliganTier {
    // Consume the roll anyway so the card draw matches Tiered for the same seed
    let _: f64 = rng.gen();
    MulliganTier::First
  }
}
