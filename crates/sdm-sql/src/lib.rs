//! sdm-sql - SQL statement splitting for sdm
//!
//! Splits migration scripts into individually executable statements without
//! being fooled by semicolons inside string literals, quoted identifiers, or
//! parenthesized bodies. No SQL grammar is involved.

pub mod splitter;

pub use splitter::{is_blank, split_statements};
