//! Cross-crate helpers: tracing setup and small shared response types.

pub mod types;
pub mod utils;
