//! Numex epidemic - a multi-city SIS model and a fixed-step RK4 integrator.
//!
//! Residents of `N` cities travel between them, get infected wherever they
//! are and return home. The state tracks, for every pair of cities, how many
//! susceptible and infectious residents of one city are currently in the
//! other.
//!
//! # Example
//!
//! ```
//! use nalgebra::Vector2;
//! use numex_epidemic::{MultiCityDataFixed, MultiCityModel, MultiCityVariables, Rk4Integrator};
//!
//! let model = MultiCityModel::new(MultiCityDataFixed::from_article());
//! let y0 = MultiCityVariables::at_home(&Vector2::new(999.0, 1000.0), &Vector2::new(1.0, 0.0));
//!
//! let trajectory = Rk4Integrator::with_steps(200)
//!     .integrate(|t, y| model.forcing(t, y), 0.0, 20.0, y0)
//!     .unwrap();
//! let (_, last) = trajectory.last().unwrap();
//! assert!(last.i()[(1, 1)] > 0.0);
//! ```

pub mod integrator;
pub mod model;
pub mod parameters;
pub mod variables;

pub use integrator::{OdeState, Rk4Integrator, Trajectory};
pub use model::{ForcingTerm, MultiCityModel};
pub use parameters::{EpidemicParameters, MultiCityDataFixed};
pub use variables::MultiCityVariables;
