//! Database module for local persisted state.
//!
//! Uses `rusqlite` (bundled `SQLite`) as a small key-value store
//! holding whole JSON documents such as the recent-search list.

mod connection;
/// Key-value document storage.
pub mod kv;
mod migrations;

#[allow(clippy::module_name_repetitions)]
pub use connection::{open_db, open_in_memory};
pub use kv::KvStore;
