//! Fixed-step classical Runge-Kutta integration.
//!
//! The integrator works on any state that can be cloned, added and scaled,
//! so the same code advances a plain vector or the two-block multi-city
//! state. The right-hand side is any `Fn(t, &y) -> dy/dt`.

use numex_core::config::IntegratorConfig;
use numex_core::error::{ModelError, ModelResult};
use numex_core::numerical::is_finite_matrix;
use numex_core::types::{DVector, SVector, Scalar};
use std::ops::{Add, Mul};

/// State that can be advanced by an explicit integrator.
pub trait OdeState<T: Scalar>: Clone + Add<Output = Self> + Mul<T, Output = Self> {
    /// Whether every component is finite.
    fn is_finite(&self) -> bool;
}

impl<T: Scalar> OdeState<T> for DVector<T> {
    fn is_finite(&self) -> bool {
        is_finite_matrix(self)
    }
}

impl<T: Scalar, const D: usize> OdeState<T> for SVector<T, D> {
    fn is_finite(&self) -> bool {
        is_finite_matrix(self)
    }
}

/// States recorded during an integration run.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory<T, S> {
    times: Vec<T>,
    states: Vec<S>,
}

impl<T: Scalar, S> Trajectory<T, S> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            times: Vec::with_capacity(capacity),
            states: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, t: T, state: S) {
        self.times.push(t);
        self.states.push(state);
    }

    /// Number of recorded states.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Recorded times.
    pub fn times(&self) -> &[T] {
        &self.times
    }

    /// Recorded states.
    pub fn states(&self) -> &[S] {
        &self.states
    }

    /// The last recorded time and state.
    pub fn last(&self) -> Option<(T, &S)> {
        self.times.last().copied().zip(self.states.last())
    }

    /// Iterate over `(time, state)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (T, &S)> + '_ {
        self.times.iter().copied().zip(self.states.iter())
    }
}

/// Classical fourth-order Runge-Kutta with a fixed step.
#[derive(Debug, Clone, Default)]
pub struct Rk4Integrator {
    config: IntegratorConfig,
}

impl Rk4Integrator {
    /// Create an integrator with the given configuration.
    pub fn new(config: IntegratorConfig) -> Self {
        Self { config }
    }

    /// Create an integrator that splits the interval into `num_steps` steps.
    pub fn with_steps(num_steps: usize) -> Self {
        Self::new(IntegratorConfig::with_steps(num_steps))
    }

    /// The configuration.
    pub fn config(&self) -> &IntegratorConfig {
        &self.config
    }

    /// Advance `y` from `t` to `t + h`.
    pub fn step<T, S, F>(&self, rhs: &F, t: T, y: &S, h: T) -> S
    where
        T: Scalar,
        S: OdeState<T>,
        F: Fn(T, &S) -> S,
    {
        let two = <T as Scalar>::from_f64(2.0);
        let half = h / two;

        let k1 = rhs(t, y);
        let k2 = rhs(t + half, &(y.clone() + k1.clone() * half));
        let k3 = rhs(t + half, &(y.clone() + k2.clone() * half));
        let k4 = rhs(t + h, &(y.clone() + k3.clone() * h));

        let slope = k1 + k2 * two + k3 * two + k4;
        y.clone() + slope * (h / <T as Scalar>::from_f64(6.0))
    }

    /// Integrate from `t0` to `t_end` starting at `y0`.
    ///
    /// The initial state is always recorded, then every
    /// `record_every`-th state, and the final state.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if the configuration is invalid or the interval
    ///   is empty, reversed or not finite.
    /// - `NonFinite` as soon as a state stops being finite.
    pub fn integrate<T, S, F>(&self, rhs: F, t0: T, t_end: T, y0: S) -> ModelResult<Trajectory<T, S>>
    where
        T: Scalar,
        S: OdeState<T>,
        F: Fn(T, &S) -> S,
    {
        self.config.validate()?;
        if !(t_end > t0) || !num_traits::Float::is_finite(t_end - t0) {
            return Err(ModelError::invalid_parameter(
                "t_end",
                format!("must be finite and greater than t0 ({} <= {})", t_end, t0),
            ));
        }
        if !y0.is_finite() {
            return Err(ModelError::non_finite(Scalar::to_f64(t0)));
        }

        let steps = self.config.num_steps;
        let stride = self.config.record_every;
        let h = (t_end - t0) / <T as Scalar>::from_usize(steps);
        log::debug!(
            "RK4 integration on [{}, {}] with {} steps of {:e}",
            t0,
            t_end,
            steps,
            h
        );

        let mut trajectory = Trajectory::with_capacity(steps / stride + 2);
        trajectory.push(t0, y0.clone());

        let mut y = y0;
        for k in 0..steps {
            let t = t0 + <T as Scalar>::from_usize(k) * h;
            y = self.step(&rhs, t, &y, h);

            let reached = k + 1;
            let t_next = if reached == steps {
                t_end
            } else {
                t0 + <T as Scalar>::from_usize(reached) * h
            };
            if !y.is_finite() {
                log::warn!("RK4 state became non-finite at t = {}", t_next);
                return Err(ModelError::non_finite(Scalar::to_f64(t_next)));
            }
            if reached % stride == 0 || reached == steps {
                trajectory.push(t_next, y.clone());
            }
        }

        log::debug!("RK4 integration recorded {} states", trajectory.len());
        Ok(trajectory)
    }
}
