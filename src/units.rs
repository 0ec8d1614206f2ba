use crate::error::HydroError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unit system for basin inputs and hydrograph outputs.
///
/// `Si` is the US customary set used by the NRCS tables: lengths in feet,
/// depths in inches, areas in square miles and discharge in cfs.
/// `Metric` uses meters, millimeters, square kilometers and m³/s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UnitSystem {
    Si,
    Metric,
}

impl UnitSystem {
    /// Maximum potential retention S for a curve number (inches or mm).
    pub fn max_retention(self, cn: f64) -> f64 {
        match self {
            UnitSystem::Si => 1000.0 / cn - 10.0,
            UnitSystem::Metric => 25400.0 / cn - 254.0,
        }
    }

    // Kirpich coefficient for length in feet or meters
    pub(crate) fn kirpich_coefficient(self) -> f64 {
        match self {
            UnitSystem::Si => 0.0078,
            UnitSystem::Metric => 0.0195,
        }
    }

    /// Peak discharge constant of the NRCS unit hydrograph (484 or 0.208).
    pub fn peak_rate_constant(self) -> f64 {
        match self {
            UnitSystem::Si => 484.0,
            UnitSystem::Metric => 0.208,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            UnitSystem::Si => "si",
            UnitSystem::Metric => "m",
        }
    }
}

impl FromStr for UnitSystem {
    type Err = HydroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "si" => Ok(UnitSystem::Si),
            "m" | "metric" => Ok(UnitSystem::Metric),
            _ => Err(HydroError::InvalidUnitSystem(s.to_string())),
        }
    }
}

impl TryFrom<String> for UnitSystem {
    type Error = HydroError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UnitSystem> for String {
    fn from(units: UnitSystem) -> Self {
        units.as_str().to_string()
    }
}

impl fmt::Display for UnitSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Round to three decimals, the resolution every published ordinate carries.
pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn parses_recognised_tags() {
        assert_eq!("si".parse::<UnitSystem>().unwrap(), UnitSystem::Si);
        assert_eq!("m".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
        assert_eq!("Metric".parse::<UnitSystem>().unwrap(), UnitSystem::Metric);
    }

    #[test]
    fn rejects_unknown_tag() {
        let err = "imperial".parse::<UnitSystem>().unwrap_err();
        assert!(matches!(err, HydroError::InvalidUnitSystem(ref s) if s == "imperial"));
    }

    #[test]
    fn retention_for_both_systems() {
        assert_relative_eq!(UnitSystem::Si.max_retention(82.0), 2.195122, epsilon = 1e-6);
        assert_relative_eq!(UnitSystem::Metric.max_retention(100.0), 0.0, epsilon = 1e-12);
        assert_relative_eq!(
            UnitSystem::Metric.max_retention(82.0),
            UnitSystem::Si.max_retention(82.0) * 25.4,
            epsilon = 1e-9
        );
    }

    #[test]
    fn round3_keeps_three_decimals() {
        assert_eq!(round3(1.23456), 1.235);
        assert_eq!(round3(-0.0004), -0.0);
    }
}
