//! Cross-crate integration flows.

pub mod exchange;
pub mod inbox_http;
