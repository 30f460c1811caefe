//! Example: the two-city epidemic model of Arino and van den Driessche.
//!
//! Starts with a handful of infectious residents in the first city and
//! follows the spread to the second one through travel.

use numex::nalgebra::Vector2;
use numex::prelude::*;

fn main() -> ModelResult<()> {
    env_logger::init();
    println!("=== Multi-city SIS model ===\n");

    let data = MultiCityDataFixed::from_article();
    data.validate()?;
    println!("{}", data);

    let model = MultiCityModel::new(data);
    let y0 = MultiCityVariables::at_home(&Vector2::new(9_990.0, 5_000.0), &Vector2::new(10.0, 0.0));

    let integrator = Rk4Integrator::new(IntegratorConfig::with_steps(3_650).with_record_every(365));
    let trajectory = integrator.integrate(|t, y| model.forcing(t, y), 0.0, 365.0, y0)?;

    println!("{:>8} {:>12} {:>12} {:>12}", "day", "I home 1", "I home 2", "travelling");
    for (t, y) in trajectory.iter() {
        let travelling = y.i()[(0, 1)] + y.i()[(1, 0)];
        println!(
            "{:>8.1} {:>12.4} {:>12.4} {:>12.4}",
            t,
            y.i()[(0, 0)],
            y.i()[(1, 1)],
            travelling
        );
    }

    if let Some((_, last)) = trajectory.last() {
        println!(
            "\nResidents after one year: {:.1} and {:.1}",
            last.resident_population(0),
            last.resident_population(1)
        );
    }

    Ok(())
}
