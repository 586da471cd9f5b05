//! Row structs read from PostgreSQL.
//!
//! Each `*Row` derives `FromRow` and converts into its `qanda_core` record.
//! Conversions that can fail (a vote outside ±1) reject the row as
//! `StoreError::MalformedRow`.

pub mod answer;
pub mod karma;
pub mod question;
pub mod user;
