use crate::dimensionless::{DimensionlessCurve, trapezoid};
use crate::error::{HydroError, Result};
use crate::units::{UnitSystem, round3};
use serde::Serialize;
use tracing::debug;

/// Dimensioned unit hydrograph in hours and cfs (`si`) or m³/s (`m`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitHydrograph {
    pub time: Vec<f64>,
    pub discharge: Vec<f64>,
    /// Time to peak used for scaling, in hours.
    pub time_to_peak: f64,
    pub peak_discharge: f64,
}

impl UnitHydrograph {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Runoff volume under the hydrograph (discharge x hours).
    pub fn volume(&self) -> f64 {
        trapezoid(&self.time, &self.discharge)
    }
}

/// Scale a dimensionless curve to a basin.
///
/// `area` is in square miles for `si` and square kilometers for `m`; `tc` in hours.
pub fn scale(
    curve: &DimensionlessCurve,
    area: f64,
    tc: f64,
    units: UnitSystem,
) -> Result<UnitHydrograph> {
    if !(area > 0.0) {
        return Err(HydroError::invalid("area", area, "must be positive"));
    }
    if !(tc > 0.0) {
        return Err(HydroError::invalid("tc", tc, "must be positive"));
    }

    // Unit duration and time to peak
    let dt = round3(0.133 * tc);
    let tp = dt / 2.0 + 0.6 * tc;
    let qp = units.peak_rate_constant() * area / tp;
    debug!(tp, qp, units = %units, "scaling unit hydrograph");

    let time = curve.time_ratio.iter().map(|r| round3(r * tp)).collect();
    let discharge = curve
        .discharge_ratio
        .iter()
        .map(|r| round3(r * qp))
        .collect();

    Ok(UnitHydrograph {
        time,
        discharge,
        time_to_peak: tp,
        peak_discharge: qp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensionless::{PeakRateFactor, generate};
    use approx::assert_relative_eq;

    fn curve() -> DimensionlessCurve {
        generate(0.1, 5.0, PeakRateFactor::Prf484).unwrap()
    }

    #[test]
    fn peak_and_time_scaling() {
        let uh = scale(&curve(), 1.0, 2.0, UnitSystem::Si).unwrap();
        assert_relative_eq!(uh.time_to_peak, 1.333, epsilon = 1e-12);
        assert_relative_eq!(uh.peak_discharge, 484.0 / 1.333, epsilon = 1e-9);
        assert_eq!(uh.time[1], 0.133);
        assert_eq!(uh.discharge[10], 363.091);
        assert_eq!(uh.len(), 51);
    }

    #[test]
    fn one_inch_of_runoff_over_one_square_mile() {
        let uh = scale(&curve(), 1.0, 2.0, UnitSystem::Si).unwrap();
        // 645.33 cfs-hours per inch per square mile
        assert_relative_eq!(uh.volume() / 645.33, 1.0, max_relative = 5e-3);
    }

    #[test]
    fn normalized_area_is_unit_over_peak_constant() {
        let uh = scale(&curve(), 3.0, 1.5, UnitSystem::Metric).unwrap();
        let normalized = uh.volume() / (uh.peak_discharge * uh.time_to_peak);
        assert_relative_eq!(normalized, curve().area(), max_relative = 1e-2);
    }

    #[test]
    fn single_peak_and_non_negative() {
        let uh = scale(&curve(), 5.0, 1.0, UnitSystem::Metric).unwrap();
        assert!(uh.discharge.iter().all(|&q| q >= 0.0));
        assert!(uh.time.windows(2).all(|w| w[1] > w[0]));
        let imax = uh
            .discharge
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!(uh.discharge[..=imax].windows(2).all(|w| w[0] <= w[1]));
        assert!(uh.discharge[imax..].windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn rejects_zero_area() {
        assert!(scale(&curve(), 0.0, 1.0, UnitSystem::Si).is_err());
    }
}
