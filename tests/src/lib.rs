//! # Notify Test Suite
//!
//! Unified test crate for cross-crate flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── inbox_http.rs   # HTTP inbox against a RocksDB-backed manager
//!     └── exchange.rs     # Outbound patterns, loopback peer delivery
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p notify-tests
//! ```

#![allow(dead_code)]

pub mod integration;
