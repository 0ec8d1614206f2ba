use crate::error::{HydroError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered `(time, value)` record with strictly increasing times.
///
/// Times are in hours from an arbitrary origin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

#[derive(Deserialize)]
struct RawSeries {
    times: Vec<f64>,
    values: Vec<f64>,
}

impl<'de> Deserialize<'de> for TimeSeries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = RawSeries::deserialize(deserializer)?;
        TimeSeries::new(raw.times, raw.values).map_err(serde::de::Error::custom)
    }
}

impl TimeSeries {
    pub fn new(times: Vec<f64>, values: Vec<f64>) -> Result<Self> {
        if times.len() != values.len() {
            return Err(HydroError::ShapeMismatch {
                what: "time series values",
                expected: times.len(),
                actual: values.len(),
            });
        }
        if let Some(i) = times.windows(2).position(|w| !(w[1] > w[0])) {
            return Err(HydroError::invalid(
                "times",
                times[i + 1],
                "must be strictly increasing",
            ));
        }
        Ok(TimeSeries { times, values })
    }

    /// Fixed-step series starting at time zero.
    pub fn from_step(step: f64, values: Vec<f64>) -> Result<Self> {
        if !(step > 0.0) {
            return Err(HydroError::invalid("step", step, "must be positive"));
        }
        let times = (0..values.len()).map(|i| i as f64 * step).collect();
        TimeSeries::new(times, values)
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.times.iter().copied().zip(self.values.iter().copied())
    }

    /// Running sum of the values on the same time base.
    pub fn cumulative(&self) -> TimeSeries {
        let mut acc = 0.0;
        let values = self
            .values
            .iter()
            .map(|v| {
                acc += v;
                acc
            })
            .collect();
        TimeSeries {
            times: self.times.clone(),
            values,
        }
    }

    /// Sampling interval of a fixed-step series.
    pub fn step(&self) -> Result<f64> {
        if self.len() < 2 {
            return Err(HydroError::invalid(
                "series length",
                self.len(),
                "at least two samples define a step",
            ));
        }
        let step = self.times[1] - self.times[0];
        let uniform = self
            .times
            .windows(2)
            .all(|w| ((w[1] - w[0]) - step).abs() <= 1e-6 * step);
        if !uniform {
            return Err(HydroError::invalid(
                "times",
                "irregular",
                "a fixed time step is required",
            ));
        }
        Ok(step)
    }

    /// Sum a fixed-step series into blocks of `interval` hours.
    ///
    /// Each block is stamped with the time of its first sample; a trailing
    /// partial block is kept.
    pub fn aggregate(&self, interval: f64) -> Result<TimeSeries> {
        let step = self.step()?;
        let count = (interval / step).round();
        if !(count >= 1.0) {
            return Err(HydroError::invalid(
                "interval",
                interval,
                "must span at least one sample",
            ));
        }
        let count = count as usize;
        let times = self.times.iter().step_by(count).copied().collect();
        let values = self
            .values
            .chunks(count)
            .map(|block| block.iter().sum())
            .collect();
        Ok(TimeSeries { times, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn rejects_unordered_times() {
        let err = TimeSeries::new(vec![0.0, 1.0, 1.0], vec![1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, HydroError::InvalidParameter { name: "times", .. }));
    }

    #[test]
    fn rejects_length_mismatch() {
        assert!(matches!(
            TimeSeries::new(vec![0.0, 1.0], vec![1.0]),
            Err(HydroError::ShapeMismatch { expected: 2, actual: 1, .. })
        ));
    }

    #[test]
    fn cumulative_keeps_time_base() {
        let s = TimeSeries::from_step(0.5, vec![1.0, 0.0, 2.5]).unwrap();
        let c = s.cumulative();
        assert_eq!(c.times(), s.times());
        assert_eq!(c.values(), &[1.0, 1.0, 3.5]);
    }

    #[test]
    fn aggregates_into_blocks() {
        let s = TimeSeries::from_step(0.25, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        let hourly = s.aggregate(0.5).unwrap();
        assert_eq!(hourly.times(), &[0.0, 0.5, 1.0]);
        assert_eq!(hourly.values(), &[3.0, 7.0, 5.0]);
        assert_relative_eq!(
            hourly.values().iter().sum::<f64>(),
            s.values().iter().sum::<f64>()
        );
    }

    #[test]
    fn aggregate_needs_fixed_step() {
        let s = TimeSeries::new(vec![0.0, 1.0, 3.0], vec![1.0, 1.0, 1.0]).unwrap();
        assert!(s.aggregate(2.0).is_err());
    }

    #[test]
    fn deserializes_with_validation() {
        let ok: TimeSeries = toml::from_str("times = [0.0, 1.0]\nvalues = [0.2, 0.4]").unwrap();
        assert_eq!(ok.len(), 2);
        let bad: std::result::Result<TimeSeries, _> =
            toml::from_str("times = [1.0, 0.0]\nvalues = [0.2, 0.4]");
        assert!(bad.is_err());
    }
}
