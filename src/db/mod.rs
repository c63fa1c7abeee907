//! Database module
//!
//! Handles the SQLite report history and its migrations.

pub mod connection;
pub mod migrations;

pub use connection::{Database, DbError, DbResult};
