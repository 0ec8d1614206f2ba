/*!
NRCS (formerly SCS) curve number runoff depth.

Depths are in inches for the `si` unit system and millimeters for `m`.
*/
use crate::units::UnitSystem;

/**
Runoff depth from a rainfall depth with the curve number method.

`Q = (P - Ia)^2 / (P - Ia + S)` with `Ia = 0.2 S`, and zero while `P <= Ia`.
*/
pub fn runoff_depth(precip: f64, cn: f64, units: UnitSystem) -> f64 {
    if precip <= 0.0 {
        return 0.0;
    }

    // Maximum potential retention
    let s = units.max_retention(cn);
    let ia = 0.2 * s;

    if precip <= ia {
        return 0.0;
    }

    (precip - ia).powi(2) / (precip - ia + s)
}

/// Accumulated runoff for each entry of a cumulative rainfall record.
pub fn accumulated_runoff(cumulative_precip: &[f64], cn: f64, units: UnitSystem) -> Vec<f64> {
    cumulative_precip
        .iter()
        .map(|&p| runoff_depth(p, cn, units))
        .collect()
}

/// Per-step runoff from an accumulated record; the step before the first is zero.
pub fn incremental_runoff(accumulated: &[f64]) -> Vec<f64> {
    let mut prev = 0.0;
    accumulated
        .iter()
        .map(|&q| {
            let inc = (q - prev).abs();
            prev = q;
            inc
        })
        .collect()
}
