//! # Numex
//!
//! Small numerical building blocks written out by hand on top of nalgebra's
//! storage types:
//!
//! - a dense LU solver with partial pivoting whose factorization is computed
//!   lazily and reused across right-hand sides;
//! - a multi-city SIS epidemic model integrated with classical RK4.
//!
//! ## Quick Start
//!
//! ```
//! use numex::prelude::*;
//!
//! // Solve A x = b, reusing the factorization for a second right-hand side
//! let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 2.0]);
//! let mut solver = LuSolver::new(a.clone())?;
//!
//! let b = DVector::from_vec(vec![1.0, 2.0, 3.0]);
//! let x = solver.solve(&b)?;
//! assert!(relative_residual(&a, &x, &b)? < 1e-12);
//!
//! let y = solver.solve(&DVector::from_vec(vec![0.0, 1.0, 0.0]))?;
//! assert!(relative_residual(&a, &y, &DVector::from_vec(vec![0.0, 1.0, 0.0]))? < 1e-12);
//! # Ok::<(), numex::LinalgError>(())
//! ```

pub use numex_core;
pub use numex_epidemic;
pub use numex_linalg;

pub use numex_core::{LinalgError, LinalgResult, ModelError, ModelResult};

// Re-export nalgebra for convenience
pub use nalgebra;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use numex_core::prelude::*;

    pub use numex_linalg::{lu_factorize, lu_solve, relative_residual, LuFactors, LuSolver, Permutation};

    pub use numex_epidemic::{
        EpidemicParameters, MultiCityDataFixed, MultiCityModel, MultiCityVariables, OdeState,
        Rk4Integrator, Trajectory,
    };
}
