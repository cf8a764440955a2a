//! # Magic: The Gathering Mulligan Simulator
//!
//! mulligan deals reproducible opening hands from a deck list, asks an operator to keep or
//! mulligan each one, and records the decisions. Every hand is generated from its own seed,
//! so any recorded hand can be dealt again from the deck and the seed alone.
//! Results can be exported as JSON or saved to a SQLite result store.

#[macro_use]
extern crate serde_derive;
extern crate serde;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

#[macro_use]
pub mod deck;
pub mod config;
pub mod error;
pub mod hand;
pub mod mulligan;
pub mod operator;
pub mod result;
pub mod session;
pub mod stats;
pub mod store;

pub use crate::config::Config;
pub use crate::deck::{Deck, DeckCard};
pub use crate::error::{Error, Result};
pub use crate::hand::{Hand, PlayOrDraw};
pub use crate::mulligan::{Mulligan, MulliganTier, Never, Tiered};
pub use crate::operator::{Console, Operator};
pub use crate::result::{Decision, HandResult, Report};
pub use crate::session::{Finished, Session};
pub use crate::stats::Tally;
pub use crate::store::{NewRun, RunDetail, RunId, RunSummary, SchemaStatus, Store};
