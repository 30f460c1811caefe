//! Numerical utilities and stability checks.

pub mod stability;

// Re-export numerical utilities
pub use stability::*;
