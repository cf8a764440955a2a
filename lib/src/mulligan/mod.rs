//! # Mulligan policies
//!
//! The `mulligan` module defines a `Mulligan` trait that decides how deep into
//! the mulligan process a simulated hand is, along with the policies used by
//! the simulator.

mod mulligan;
mod never;
mod tiered;

pub use mulligan::{Mulligan, MulliganTier, STARTING_HAND_SIZE};
pub use never::Never;
pub use tiered::Tiered;
