//! Bundled board engines.

pub mod duel;
