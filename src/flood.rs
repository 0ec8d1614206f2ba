//! Flood hydrographs by convolving rainfall excess with a unit hydrograph.

use crate::error::{HydroError, Result};
use crate::runoff::{accumulated_runoff, incremental_runoff};
use crate::timeseries::TimeSeries;
use crate::unit_hydrograph::UnitHydrograph;
use crate::units::{UnitSystem, round3};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Storm and cover description for a flood run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StormEvent {
    pub curve_number: f64,
    /// Storm duration in hours.
    pub duration: f64,
    /// Rainfall sampling interval in hours.
    pub timestep: f64,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FloodHydrograph {
    /// Composite discharge, one sample per timestep.
    pub discharge: TimeSeries,
    /// Rainfall excess per storm interval (inches or mm).
    pub incremental_runoff: Vec<f64>,
}

impl FloodHydrograph {
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.discharge.iter().max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Discrete convolution of an excess sequence with unit hydrograph ordinates.
///
/// Interval `h` contributes `input[h] * ordinates[k]` at output index `h + k`.
/// The output holds `input.len() + ordinates.len()` samples; the last one
/// is always zero and closes the recession.
pub fn convolve(input: &[f64], ordinates: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; input.len() + ordinates.len()];
    for (h, &excess) in input.iter().enumerate() {
        if excess == 0.0 {
            continue;
        }
        for (k, &q) in ordinates.iter().enumerate() {
            out[h + k] += excess * q;
        }
    }
    out
}

/// Route a rainfall record through the SCS runoff equation and a unit hydrograph.
///
/// `rainfall` carries incremental depths per `storm.timestep`; only the first
/// `round(duration / timestep)` samples take part in the storm.
pub fn flood_hydrograph(
    rainfall: &TimeSeries,
    unit: &UnitHydrograph,
    storm: &StormEvent,
) -> Result<FloodHydrograph> {
    if !(storm.timestep > 0.0) {
        return Err(HydroError::invalid("timestep", storm.timestep, "must be positive"));
    }
    if !(storm.curve_number > 0.0 && storm.curve_number <= 100.0) {
        return Err(HydroError::invalid(
            "curve_number",
            storm.curve_number,
            "must lie in (0, 100]",
        ));
    }
    if rainfall.len() >= 2 {
        let step = rainfall.step()?;
        if (step - storm.timestep).abs() > 1e-6 * storm.timestep {
            return Err(HydroError::invalid(
                "rainfall step",
                step,
                "must equal the storm timestep",
            ));
        }
    }
    let storm_steps = (storm.duration / storm.timestep).round();
    if !(storm_steps >= 1.0) || storm_steps as usize > rainfall.len() {
        return Err(HydroError::ShapeMismatch {
            what: "rainfall samples covering the storm",
            expected: storm_steps.max(1.0) as usize,
            actual: rainfall.len(),
        });
    }
    let storm_steps = storm_steps as usize;

    let cumulative = rainfall.cumulative();
    let accumulated = accumulated_runoff(
        &cumulative.values()[..storm_steps],
        storm.curve_number,
        storm.units,
    );
    let excess: Vec<f64> = incremental_runoff(&accumulated)
        .into_iter()
        .map(round3)
        .collect();

    let composite: Vec<f64> = convolve(&excess, &unit.discharge)
        .into_iter()
        .map(round3)
        .collect();
    let times = (1..=composite.len())
        .map(|i| i as f64 * storm.timestep)
        .collect();
    debug!(
        storm_steps,
        ordinates = unit.len(),
        samples = composite.len(),
        "convolved flood hydrograph"
    );

    Ok(FloodHydrograph {
        discharge: TimeSeries::new(times, composite)?,
        incremental_runoff: excess,
    })
}
