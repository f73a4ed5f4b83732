//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value snapshot access contract.
//! - Isolate SQLite query details from manager orchestration.

pub mod snapshot_repo;
