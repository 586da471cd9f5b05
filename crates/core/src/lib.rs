//! Domain core for the Q&A backend.
//!
//! Holds the typed records, the [`store::QaStore`] abstraction, and the
//! read/write paths built on top of it: answer-set resolution, batch
//! aggregation, scoped search, and the karma ledger. Nothing in this crate
//! talks to a database directly.

pub mod aggregate;
pub mod error;
pub mod karma;
pub mod memory;
pub mod models;
pub mod resolver;
pub mod search;
pub mod store;
pub mod types;
pub mod validation;
