// Areal precipitation over a basin from several rain gauges
use crate::error::{HydroError, Result};

fn common_length<G: AsRef<[f64]>>(gauges: &[G]) -> Result<usize> {
    let first = gauges
        .first()
        .ok_or_else(|| HydroError::invalid("gauges", 0, "at least one gauge is required"))?;
    let n = first.as_ref().len();
    for g in gauges {
        if g.as_ref().len() != n {
            return Err(HydroError::ShapeMismatch {
                what: "gauge record",
                expected: n,
                actual: g.as_ref().len(),
            });
        }
    }
    Ok(n)
}

/// Step-by-step arithmetic mean over equal-length gauge records.
pub fn arithmetic_mean<G: AsRef<[f64]>>(gauges: &[G]) -> Result<Vec<f64>> {
    let n = common_length(gauges)?;
    let count = gauges.len() as f64;
    Ok((0..n)
        .map(|j| gauges.iter().map(|g| g.as_ref()[j]).sum::<f64>() / count)
        .collect())
}

/// Thiessen polygon average: one gauge per sub-basin, weighted by sub-basin area.
pub fn thiessen<G: AsRef<[f64]>>(gauges: &[G], areas: &[f64]) -> Result<Vec<f64>> {
    let n = common_length(gauges)?;
    if areas.len() != gauges.len() {
        return Err(HydroError::ShapeMismatch {
            what: "sub-basin areas",
            expected: gauges.len(),
            actual: areas.len(),
        });
    }
    if areas.iter().any(|&a| a < 0.0) {
        return Err(HydroError::invalid("areas", "negative", "areas cannot be negative"));
    }
    let total: f64 = areas.iter().sum();
    if !(total > 0.0) {
        return Err(HydroError::invalid("areas", total, "total area must be positive"));
    }
    Ok((0..n)
        .map(|j| {
            gauges
                .iter()
                .zip(areas)
                .map(|(g, a)| g.as_ref()[j] * a)
                .sum::<f64>()
                / total
        })
        .collect())
}
