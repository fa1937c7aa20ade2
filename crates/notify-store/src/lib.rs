//! # Notify Store
//!
//! The persistence subsystem for the notify exchange.
//!
//! ## Crate Structure (Hexagonal Architecture)
//!
//! - `ports` - The [`NotificationStore`] and [`TimeSource`] traits
//! - `adapters` - In-memory (testing/reference) and RocksDB (production)
//!   implementations
//!
//! The store assigns every record its modification timestamp on persist;
//! callers never stamp envelopes themselves.

pub mod adapters;
pub mod errors;
pub mod ports;

pub use adapters::memory::InMemoryStore;
pub use adapters::rocks::{RocksDbConfig, RocksDbStore};
pub use errors::StoreError;
pub use ports::{NotificationStore, SystemTimeSource, TimeSource, DEFAULT_LIST_LIMIT};
