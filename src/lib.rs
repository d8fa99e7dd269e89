//! Core library for the Scalpe trading journal: a durable trade log,
//! India-market metadata and price formatting, subscription pricing, and an
//! AI chart-analysis pipeline with an encrypted API key and a capped history.
//!
//! Everything persists through a single local key-value store; consumers
//! (a desktop shell, a CLI, tests) drive the library directly.

pub mod api;
pub mod db;
pub mod journal;
pub mod market;
pub mod models;
pub mod presenter;
pub mod pricing;

pub use db::Database;
pub use journal::{JournalError, TradeJournal};
pub use models::{Market, Trade, TradeInput};
