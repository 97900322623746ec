//! fuzzypass - fuzzy-logic password strength scoring
//!
//! three heuristics (length, character-class complexity and similarity to
//! known weak passwords) are fuzzified, combined by a mamdani rule base and
//! defuzzified into a single 0..100 strength value.

pub mod config;
pub mod corpus;
pub mod error;
pub mod fuzzy;
pub mod inference;
pub mod metric;
pub mod output;
pub mod scorer;

pub use corpus::Corpus;
pub use error::EngineError;
pub use scorer::{Assessment, Scorer};
