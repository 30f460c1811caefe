//! Error types and scalar definitions.

pub mod error;
pub mod types;
