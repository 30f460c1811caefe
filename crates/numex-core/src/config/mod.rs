//! Configuration for the solvers and integrators.

pub mod solver;

// Re-export key items
pub use solver::{
    default_solver_config, IntegratorConfig, PivotStrategy, SolverConfig, SolverConfigBuilder,
};
