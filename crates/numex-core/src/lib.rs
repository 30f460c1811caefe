//! Core types for the numex numerical exercises.
//!
//! This crate provides the pieces shared by the dense linear solver and the
//! epidemic model: the scalar abstraction over `f32`/`f64`, nalgebra type
//! aliases, error types, configuration and numerical stability helpers.
//!
//! # Modules
//!
//! - [`core`]: Error types and scalar/type definitions
//! - [`config`]: Solver and integrator configuration
//! - [`numerical`]: Finite checks and relative error helpers

pub mod config;
pub mod core;
pub mod numerical;

// Re-export commonly used modules at the crate root
pub use crate::core::{error, types};
pub use crate::core::error::{LinalgError, LinalgResult, ModelError, ModelResult};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use numex_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{
        default_solver_config, IntegratorConfig, PivotStrategy, SolverConfig,
        SolverConfigBuilder,
    };
    pub use crate::core::error::{LinalgError, LinalgResult, ModelError, ModelResult};
    pub use crate::core::types::{
        constants, DMatrix, DVector, SMatrix, SSquareMatrix, SVector, Scalar,
    };
}
