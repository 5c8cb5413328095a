//! sdm-core - Core library for sdm
//!
//! This crate provides configuration parsing, the explicit script encoding
//! used for stored migration payloads, and the validated history table name
//! shared across all sdm components.

pub mod config;
pub mod encoding;
pub mod error;
pub mod table_name;

pub use config::{Config, DatabaseConfig};
pub use encoding::ScriptEncoding;
pub use error::{CoreError, CoreResult};
pub use table_name::TableName;
