//! Right-hand side of the multi-city SIS model.
//!
//! For a resident of city `i` present in city `j` the model combines
//!
//! - births into `S_ii` at rate `d·N_i`, where `N_i` is the resident
//!   population of `i`, and deaths at rate `d` in every compartment;
//! - recovery of `I_ij` into `S_ij` at rate `γ`;
//! - departures from home to city `j` at rate `g_i·m_ji`, so that residents
//!   of `i` leave at `g_i·Σ_{j≠i} m_ji` in total, and returns home at rate `r_ij`;
//! - infection in city `j` at rate
//!   `κ_j · S_ij · Σ_k β_j(i, k) · I_kj / P_j`, where `P_j` is the
//!   population currently present in `j`.

use crate::parameters::EpidemicParameters;
use crate::variables::MultiCityVariables;
use numex_core::types::{SSquareMatrix, Scalar};
use std::marker::PhantomData;

/// Boxed right-hand side, ready to hand to an integrator.
pub type ForcingTerm<T, const N: usize> =
    Box<dyn Fn(T, &MultiCityVariables<T, N>) -> MultiCityVariables<T, N> + Send + Sync>;

/// The multi-city model for a given parameter set.
#[derive(Debug, Clone)]
pub struct MultiCityModel<P, T, const N: usize> {
    parameters: P,
    _scalar: PhantomData<fn() -> T>,
}

impl<P, T, const N: usize> MultiCityModel<P, T, N>
where
    P: EpidemicParameters<T, N>,
    T: Scalar,
{
    /// Create the model.
    pub fn new(parameters: P) -> Self {
        Self {
            parameters,
            _scalar: PhantomData,
        }
    }

    /// The parameters.
    pub fn parameters(&self) -> &P {
        &self.parameters
    }

    /// Time derivative of the state `y` at time `t`.
    pub fn forcing(&self, t: T, y: &MultiCityVariables<T, N>) -> MultiCityVariables<T, N> {
        let p = &self.parameters;
        let (s, i) = (y.s(), y.i());

        let gamma = p.recovery_rate(t);
        let death = p.death_rate(t);
        let kappa = p.contact_scaling(t);
        let outbound = p.outbound_rates(t);
        let mobility = p.mobility(t);
        let returns = p.return_rates(t);

        let mut ds = SSquareMatrix::<T, N>::zeros();
        let mut di = SSquareMatrix::<T, N>::zeros();

        for city in 0..N {
            let present = y.present_population(city);
            if present <= T::zero() {
                continue;
            }
            let beta = p.transmission(t, city);
            for home in 0..N {
                let pressure = (0..N).fold(T::zero(), |acc, k| acc + beta[(home, k)] * i[(k, city)]);
                let incidence = kappa[city] * s[(home, city)] * pressure / present;
                ds[(home, city)] -= incidence;
                di[(home, city)] += incidence;
            }
        }

        ds += i * gamma - s * death;
        di -= i * (gamma + death);

        for home in 0..N {
            ds[(home, home)] += y.resident_population(home) * death;

            let leaving = outbound[home];
            for away in (0..N).filter(|&away| away != home) {
                // Travel only moves residents: what leaves home arrives in `away`
                let share = leaving * mobility[(away, home)];
                ds[(home, away)] += share * s[(home, home)];
                di[(home, away)] += share * i[(home, home)];
                ds[(home, home)] -= share * s[(home, home)];
                di[(home, home)] -= share * i[(home, home)];

                let rate = returns[(home, away)];
                ds[(home, away)] -= rate * s[(home, away)];
                di[(home, away)] -= rate * i[(home, away)];
                ds[(home, home)] += rate * s[(home, away)];
                di[(home, home)] += rate * i[(home, away)];
            }
        }

        MultiCityVariables::new(ds, di)
    }
}

impl<P, T, const N: usize> MultiCityModel<P, T, N>
where
    P: EpidemicParameters<T, N> + Send + Sync + 'static,
    T: Scalar,
{
    /// Consume the model into a boxed right-hand side.
    pub fn forcing_term(self) -> ForcingTerm<T, N> {
        Box::new(move |t: T, y: &MultiCityVariables<T, N>| self.forcing(t, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::MultiCityDataFixed;
    use approx::assert_relative_eq;
    use nalgebra::{Matrix2, Vector2};

    fn state() -> MultiCityVariables<f64, 2> {
        MultiCityVariables::new(
            Matrix2::new(900.0, 40.0, 25.0, 600.0),
            Matrix2::new(10.0, 2.0, 1.0, 5.0),
        )
    }

    #[test]
    fn test_population_conserved_with_full_mobility() {
        let mut data = MultiCityDataFixed::from_article();
        data.mobility = Matrix2::new(0.0, 1.0, 1.0, 0.0);
        let model = MultiCityModel::new(data);

        let dy = model.forcing(3.0, &state());
        assert_relative_eq!(dy.total_population(), 0.0, epsilon = 1e-10);
        for city in 0..2 {
            assert_relative_eq!(dy.resident_population(city), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_disease_free_state_stays_disease_free() {
        let model = MultiCityModel::new(MultiCityDataFixed::from_article());
        let y = MultiCityVariables::at_home(&Vector2::new(1000.0, 500.0), &Vector2::zeros());

        let dy = model.forcing(0.0, &y);
        assert_eq!(*dy.i(), Matrix2::zeros());
        // Residents start travelling: g_1 * m_21 * S_11
        assert_relative_eq!(dy.s()[(0, 1)], 0.25 * 0.5 * 1000.0);
        assert_relative_eq!(dy.s()[(1, 0)], 0.15 * 0.5 * 500.0);
        // and leave home at the same rate
        assert_relative_eq!(dy.s()[(0, 0)], -0.25 * 0.5 * 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_article_data_conserves_residents() {
        let model = MultiCityModel::new(MultiCityDataFixed::from_article());
        let dy = model.forcing(0.0, &state());
        assert_relative_eq!(dy.total_population(), 0.0, epsilon = 1e-10);
        for city in 0..2 {
            assert_relative_eq!(dy.resident_population(city), 0.0, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_incidence_in_single_city() {
        let mut data = MultiCityDataFixed::<f64, 1>::default();
        data.transmission[0][(0, 0)] = 0.5;
        data.contact_scaling[0] = 2.0;
        data.recovery_rate = 0.1;
        let model = MultiCityModel::new(data);

        let y = MultiCityVariables::new(
            nalgebra::Matrix1::new(90.0),
            nalgebra::Matrix1::new(10.0),
        );
        let dy = model.forcing(0.0, &y);

        // 2 * 90 * 0.5 * 10 / 100 = 9, recovery 0.1 * 10 = 1
        assert_relative_eq!(dy.s()[(0, 0)], -8.0, epsilon = 1e-12);
        assert_relative_eq!(dy.i()[(0, 0)], 8.0, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_city_has_no_incidence() {
        let model = MultiCityModel::new(MultiCityDataFixed::from_article());
        let dy = model.forcing(0.0, &MultiCityVariables::zeros());
        assert_eq!(dy, MultiCityVariables::zeros());
    }

    #[test]
    fn test_forcing_term_matches_model() {
        let model = MultiCityModel::new(MultiCityDataFixed::from_article());
        let expected = model.forcing(1.5, &state());
        let rhs = model.forcing_term();
        assert_eq!(rhs(1.5, &state()), expected);
    }
}
