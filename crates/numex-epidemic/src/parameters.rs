//! Parameters of the multi-city model.
//!
//! The model of Arino and van den Driessche couples `N` cities through
//! travel. Every parameter is queried with the current time so that
//! seasonal or policy-driven data can implement the same interface as the
//! constant data used here.
//!
//! | symbol | accessor | shape | meaning |
//! |--------|----------|-------|---------|
//! | `r`    | [`return_rates`](EpidemicParameters::return_rates) | `N×N` | rate at which residents of `i` return home from `j` |
//! | `g`    | [`outbound_rates`](EpidemicParameters::outbound_rates) | `N` | per capita rate of leaving home |
//! | `β_k`  | [`transmission`](EpidemicParameters::transmission) | `N×N` | contact transmission in city `k` |
//! | `γ`    | [`recovery_rate`](EpidemicParameters::recovery_rate) | scalar | recovery rate |
//! | `d`    | [`death_rate`](EpidemicParameters::death_rate) | scalar | birth and death rate |
//! | `m`    | [`mobility`](EpidemicParameters::mobility) | `N×N` | `(j, i)`: share of travellers from `i` heading to `j` |
//! | `κ`    | [`contact_scaling`](EpidemicParameters::contact_scaling) | `N` | contact scaling per city |

use nalgebra::{Matrix2, Vector2};
use numex_core::error::{ModelError, ModelResult};
use numex_core::numerical::is_finite_matrix;
use numex_core::types::{SSquareMatrix, SVector, Scalar};
use num_traits::Float;
use std::fmt;

/// Time-dependent parameter interface of the multi-city model.
pub trait EpidemicParameters<T: Scalar, const N: usize> {
    /// Return rates `r`: entry `(i, j)` is the rate at which residents of
    /// city `i` present in city `j` go back home.
    fn return_rates(&self, t: T) -> SSquareMatrix<T, N>;

    /// Per capita rate `g` at which residents leave their home city.
    fn outbound_rates(&self, t: T) -> SVector<T, N>;

    /// Transmission coefficients `β` in `city`: entry `(i, k)` couples
    /// susceptible residents of `i` with infectious residents of `k`.
    fn transmission(&self, t: T, city: usize) -> SSquareMatrix<T, N>;

    /// Recovery rate `γ`.
    fn recovery_rate(&self, t: T) -> T;

    /// Death rate `d`, balanced by births at home.
    fn death_rate(&self, t: T) -> T;

    /// Mobility fractions `m`: entry `(j, i)` is the share of travellers
    /// leaving city `i` that head to city `j`.
    fn mobility(&self, t: T) -> SSquareMatrix<T, N>;

    /// Contact scaling `κ` per city.
    fn contact_scaling(&self, t: T) -> SVector<T, N>;
}

/// Constant parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiCityDataFixed<T: Scalar, const N: usize> {
    /// Return rates `r`, entry `(i, j)` for residents of `i` present in `j`.
    pub return_rates: SSquareMatrix<T, N>,
    /// Outbound rates `g`.
    pub outbound_rates: SVector<T, N>,
    /// Transmission `β_k` for every city `k`.
    pub transmission: [SSquareMatrix<T, N>; N],
    /// Contact scaling `κ`.
    pub contact_scaling: SVector<T, N>,
    /// Mobility fractions `m`, entry `(j, i)` for travellers from `i` to `j`.
    pub mobility: SSquareMatrix<T, N>,
    /// Recovery rate `γ`.
    pub recovery_rate: T,
    /// Birth and death rate `d`.
    pub death_rate: T,
}

impl<T: Scalar, const N: usize> Default for MultiCityDataFixed<T, N> {
    fn default() -> Self {
        Self {
            return_rates: SSquareMatrix::zeros(),
            outbound_rates: SVector::zeros(),
            transmission: [SSquareMatrix::zeros(); N],
            contact_scaling: SVector::zeros(),
            mobility: SSquareMatrix::zeros(),
            recovery_rate: T::zero(),
            death_rate: T::zero(),
        }
    }
}

impl<T: Scalar, const N: usize> MultiCityDataFixed<T, N> {
    /// Check that every rate is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending parameter.
    pub fn validate(&self) -> ModelResult<()> {
        fn check<T, R, C, S>(name: &str, values: &nalgebra::Matrix<T, R, C, S>) -> ModelResult<()>
        where
            T: Scalar,
            R: nalgebra::Dim,
            C: nalgebra::Dim,
            S: nalgebra::RawStorage<T, R, C>,
        {
            if !is_finite_matrix(values) || values.iter().any(|v| *v < T::zero()) {
                return Err(ModelError::invalid_parameter(
                    name,
                    "entries must be finite and non-negative",
                ));
            }
            Ok(())
        }

        check("return_rates", &self.return_rates)?;
        check("outbound_rates", &self.outbound_rates)?;
        for beta in &self.transmission {
            check("transmission", beta)?;
        }
        check("contact_scaling", &self.contact_scaling)?;
        check("mobility", &self.mobility)?;

        for (name, value) in [
            ("recovery_rate", self.recovery_rate),
            ("death_rate", self.death_rate),
        ] {
            if !<T as Float>::is_finite(value) || value < T::zero() {
                return Err(ModelError::invalid_parameter(
                    name,
                    "must be finite and non-negative",
                ));
            }
        }
        Ok(())
    }
}

impl MultiCityDataFixed<f64, 2> {
    /// Two-city values from the multi-city epidemic article.
    pub fn from_article() -> Self {
        Self {
            recovery_rate: 1.0 / 25.0,
            contact_scaling: Vector2::new(1.0, 1.0),
            death_rate: 1.0 / (75.0 * 365.0),
            return_rates: Matrix2::new(0.0, 0.05, 0.05, 0.0),
            transmission: [Matrix2::repeat(0.016), Matrix2::repeat(0.048)],
            outbound_rates: Vector2::new(0.25, 0.15),
            mobility: Matrix2::new(0.0, 0.5, 0.5, 0.0),
        }
    }
}

impl<T: Scalar, const N: usize> EpidemicParameters<T, N> for MultiCityDataFixed<T, N> {
    fn return_rates(&self, _t: T) -> SSquareMatrix<T, N> {
        self.return_rates
    }

    fn outbound_rates(&self, _t: T) -> SVector<T, N> {
        self.outbound_rates
    }

    fn transmission(&self, _t: T, city: usize) -> SSquareMatrix<T, N> {
        self.transmission[city]
    }

    fn recovery_rate(&self, _t: T) -> T {
        self.recovery_rate
    }

    fn death_rate(&self, _t: T) -> T {
        self.death_rate
    }

    fn mobility(&self, _t: T) -> SSquareMatrix<T, N> {
        self.mobility
    }

    fn contact_scaling(&self, _t: T) -> SVector<T, N> {
        self.contact_scaling
    }
}

impl<T: Scalar, const N: usize> fmt::Display for MultiCityDataFixed<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "cities: {}", N)?;
        writeln!(f, "gamma: {}", self.recovery_rate)?;
        writeln!(f, "d: {}", self.death_rate)?;
        writeln!(f, "g: {}", join(self.outbound_rates.iter()))?;
        writeln!(f, "kappa: {}", join(self.contact_scaling.iter()))?;
        write_rows(f, "r", &self.return_rates)?;
        write_rows(f, "m", &self.mobility)?;
        for (city, beta) in self.transmission.iter().enumerate() {
            write_rows(f, &format!("beta[{}]", city + 1), beta)?;
        }
        Ok(())
    }
}

fn join<'a, T: Scalar>(values: impl Iterator<Item = &'a T>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn write_rows<T: Scalar, const N: usize>(
    f: &mut fmt::Formatter<'_>,
    name: &str,
    matrix: &SSquareMatrix<T, N>,
) -> fmt::Result {
    writeln!(f, "{}:", name)?;
    for row in matrix.row_iter() {
        writeln!(f, "  {}", join(row.iter()))?;
    }
    Ok(())
}
