//! Runtime configuration for the dense LU solver and the ODE integrator.
//!
//! Configurations are plain structs with sensible defaults. A process-wide
//! default solver configuration is created lazily on first use, and custom
//! configurations are assembled with [`SolverConfigBuilder`].

use crate::core::error::{ModelError, ModelResult};
use num_traits::Float;
use once_cell::sync::Lazy;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Rule used to choose the pivot row at each elimination step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PivotStrategy {
    /// Pick the candidate with the largest absolute value in the pivot column.
    ///
    /// This is standard partial pivoting.
    #[default]
    LargestMagnitude,
    /// Pick the candidate with the largest signed value in the pivot column.
    ///
    /// A large negative entry is never preferred over a small positive one,
    /// so this rule can select a less stable pivot. It is kept to reproduce
    /// the classroom solver bit for bit.
    LargestSigned,
}

impl PivotStrategy {
    /// Returns true if `candidate` should replace `current` as the pivot.
    pub fn prefers<T: Float>(&self, candidate: T, current: T) -> bool {
        match self {
            Self::LargestMagnitude => candidate.abs() > current.abs(),
            Self::LargestSigned => candidate > current,
        }
    }
}

/// Configuration for LU factorizations.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolverConfig {
    /// Pivot selection rule.
    pub pivot_strategy: PivotStrategy,
    /// Pivots with `|pivot| <= pivot_tolerance` are rejected as singular.
    ///
    /// The default of zero rejects exact zero pivots only.
    pub pivot_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            pivot_strategy: PivotStrategy::default(),
            pivot_tolerance: 0.0,
        }
    }
}

impl SolverConfig {
    /// Configuration reproducing the classroom solver: signed pivot choice,
    /// exact-zero pivot rejection.
    pub fn classroom() -> Self {
        Self {
            pivot_strategy: PivotStrategy::LargestSigned,
            pivot_tolerance: 0.0,
        }
    }

    /// Returns true if a pivot of this value must be rejected.
    ///
    /// NaN pivots are always rejected.
    pub fn is_singular_pivot<T: Float>(&self, pivot: T) -> bool {
        let tolerance: T = num_traits::cast(self.pivot_tolerance).unwrap_or_else(T::zero);
        !(pivot.abs() > tolerance)
    }
}

/// Global default solver configuration.
pub static SOLVER_CONFIG: Lazy<SolverConfig> = Lazy::new(SolverConfig::default);

/// Get the default solver configuration.
pub fn default_solver_config() -> &'static SolverConfig {
    &SOLVER_CONFIG
}

/// Builder for creating a custom solver configuration.
pub struct SolverConfigBuilder {
    config: SolverConfig,
}

impl SolverConfigBuilder {
    /// Create a new builder starting from the global default.
    pub fn new() -> Self {
        Self {
            config: default_solver_config().clone(),
        }
    }

    /// Set the pivot selection rule.
    pub fn pivot_strategy(mut self, strategy: PivotStrategy) -> Self {
        self.config.pivot_strategy = strategy;
        self
    }

    /// Set the singular pivot threshold. Negative values are clamped to zero.
    pub fn pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.config.pivot_tolerance = tolerance.max(0.0);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> SolverConfig {
        self.config
    }
}

impl Default for SolverConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for fixed-step time integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IntegratorConfig {
    /// Number of equal steps the integration interval is split into.
    pub num_steps: usize,
    /// Record every `record_every`-th state in the trajectory (the final state is always kept).
    pub record_every: usize,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            num_steps: 1000,
            record_every: 1,
        }
    }
}

impl IntegratorConfig {
    /// Create a configuration with the given number of steps, recording every state.
    pub fn with_steps(num_steps: usize) -> Self {
        Self {
            num_steps,
            ..Self::default()
        }
    }

    /// Set the recording stride.
    pub fn with_record_every(mut self, record_every: usize) -> Self {
        self.record_every = record_every;
        self
    }

    /// Check that the configuration describes a runnable integration.
    pub fn validate(&self) -> ModelResult<()> {
        if self.num_steps == 0 {
            return Err(ModelError::invalid_parameter(
                "num_steps",
                "must be at least 1",
            ));
        }
        if self.record_every == 0 {
            return Err(ModelError::invalid_parameter(
                "record_every",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SolverConfig::default();
        assert_eq!(config.pivot_strategy, PivotStrategy::LargestMagnitude);
        assert_eq!(config.pivot_tolerance, 0.0);
        assert_eq!(default_solver_config(), &config);
    }

    #[test]
    fn test_pivot_preference() {
        let magnitude = PivotStrategy::LargestMagnitude;
        assert!(magnitude.prefers(-3.0, 1.0));
        assert!(!magnitude.prefers(1.0, -3.0));

        let signed = PivotStrategy::LargestSigned;
        assert!(!signed.prefers(-3.0, 1.0));
        assert!(signed.prefers(1.0, -3.0));
    }

    #[test]
    fn test_singular_pivot_check() {
        let config = SolverConfig::default();
        assert!(config.is_singular_pivot(0.0));
        assert!(config.is_singular_pivot(-0.0));
        assert!(config.is_singular_pivot(f64::NAN));
        assert!(!config.is_singular_pivot(1e-300));

        let strict = SolverConfigBuilder::new().pivot_tolerance(1e-8).build();
        assert!(strict.is_singular_pivot(-1e-9));
        assert!(!strict.is_singular_pivot(1e-7));
    }

    #[test]
    fn test_builder() {
        let config = SolverConfigBuilder::new()
            .pivot_strategy(PivotStrategy::LargestSigned)
            .pivot_tolerance(-1.0)
            .build();
        assert_eq!(config, SolverConfig::classroom());
    }

    #[test]
    fn test_integrator_config_validation() {
        assert!(IntegratorConfig::default().validate().is_ok());
        assert!(IntegratorConfig::with_steps(0).validate().is_err());
        let err = IntegratorConfig::with_steps(10)
            .with_record_every(0)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("record_every"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serialization() {
        let config = SolverConfig::classroom();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("LargestSigned"));
        let back: SolverConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
