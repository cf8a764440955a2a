use crate::mulligan::{Mulligan, MulliganTier};
use rand::prelude::*;

/// Tiered picks the mulligan depth from a fixed distribution:
/// 60% keep 7, 30% keep 6 and 10% keep 5
#[derive(Debug, Default, Copy, Clone, Serialize, Deserialize)]
pub struct Tiered;

impl Tiered {
  pub fn new() -> Self {
    Tiered
  }

  /// Maps a uniform roll in [0, 1) onto a tier
  pub fn tier_for_roll(roll: f64) -> MulliganTier {
    if roll < 0.6 {
      MulliganTier::First
    } else if roll < 0.9 {
      MulliganTier::Second
    } else {
      MulliganTier::Third
    }
  }
}

impl Mulligan for Tiered {
  fn roll(&self, rng: &mut impl Rng) -> MulliganTier {
    Self::tier_for_roll(rng.gen::<f64>())
  }
}

#[cfg(test)]
mod tests {
  use crate::mulligan::*;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn roll_boundaries() {
    assert_eq!(Tiered::tier_for_roll(0.0), MulliganTier::First);
    assert_eq!(Tiered::tier_for_roll(0.5999), MulliganTier::First);
    assert_eq!(Tiered::tier_for_roll(0.6), MulliganTier::Second);
    assert_eq!(Tiered::tier_for_roll(0.8999), MulliganTier::Second);
    assert_eq!(Tiered::tier_for_roll(0.9), MulliganTier::Third);
    assert_eq!(Tiered::tier_for_roll(0.9999), MulliganTier::Third);
  }

  #[test]
  fn tier_frequencies_converge() {
    let mut rng = StdRng::seed_from_u64(7);
    let runs = 30000;
    let mut counts = [0usize; 3];
    for _ in 0..runs {
      let tier = Tiered.roll(&mut rng);
      counts[tier.mulligan_number() as usize - 1] += 1;
    }
    let p: Vec<f64> = counts.iter().map(|c| *c as f64 / runs as f64).collect();
    assert!(f64::abs(p[0] - 0.6) < 0.02);
    assert!(f64::abs(p[1] - 0.3) < 0.02);
    assert!(f64::abs(p[2] - 0.1) < 0.02);
  }

  #[test]
  fn never_keeps_seven() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..100 {
      assert_eq!(Never.roll(&mut rng), MulliganTier::First);
    }
  }
}
