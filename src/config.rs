//! TOML scenario files.
//!
//! A scenario may hold any combination of a `[flood]`, `[bucket]` and
//! `[groundwater]` section; each one is an independent run.

use crate::boundary_cond::BoundaryParams;
use crate::bucket::{BucketInputs, BucketModel, BucketOutput, FieldCapacities};
use crate::dimensionless::{self, DimensionlessCurve, PeakRateFactor};
use crate::error::{HydroError, Result};
use crate::flood::{self, FloodHydrograph, StormEvent};
use crate::groundwater::{AquiferParams, GroundwaterSolution, GroundwaterSolver};
use crate::time_params::{self, BasinParameters, EstimationMethod, TimeParameters};
use crate::timeseries::TimeSeries;
use crate::unit_hydrograph::{self, UnitHydrograph};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

fn default_ratio_step() -> f64 {
    0.1
}

fn default_ratio_duration() -> f64 {
    5.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodScenario {
    pub method: EstimationMethod,
    pub peak_rate_factor: PeakRateFactor,
    /// Drainage area in square miles (`si`) or square kilometers (`m`).
    pub area: f64,
    /// Increment of `t/tp` for the dimensionless curve.
    #[serde(default = "default_ratio_step")]
    pub ratio_step: f64,
    /// Extent of the dimensionless curve in multiples of `tp`.
    #[serde(default = "default_ratio_duration")]
    pub ratio_duration: f64,
    pub basin: BasinParameters,
    pub storm: StormEvent,
    pub rainfall: TimeSeries,
}

/// Every intermediate product of a flood run.
#[derive(Debug, Clone, PartialEq)]
pub struct FloodReport {
    pub time_parameters: TimeParameters,
    pub dimensionless: DimensionlessCurve,
    pub unit_hydrograph: UnitHydrograph,
    pub flood: FloodHydrograph,
}

impl FloodScenario {
    /// Basin and storm describe the same catchment, so they must agree on
    /// units and, when the basin carries one, on the curve number.
    fn check_consistency(&self) -> Result<()> {
        if self.storm.units != self.basin.units {
            return Err(HydroError::invalid(
                "storm.units",
                self.storm.units,
                &format!("must match basin units ({})", self.basin.units),
            ));
        }
        if let Some(cn) = self.basin.curve_number {
            if (cn - self.storm.curve_number).abs() > 1e-9 {
                return Err(HydroError::invalid(
                    "storm.curve_number",
                    self.storm.curve_number,
                    &format!("must match basin curve number ({cn})"),
                ));
            }
        }
        Ok(())
    }

    pub fn run(&self) -> Result<FloodReport> {
        self.check_consistency()?;
        let time_parameters = time_params::estimate(self.method, &self.basin)?;
        let dimensionless =
            dimensionless::generate(self.ratio_step, self.ratio_duration, self.peak_rate_factor)?;
        let unit_hydrograph = unit_hydrograph::scale(
            &dimensionless,
            self.area,
            time_parameters.time_of_concentration,
            self.basin.units,
        )?;
        let flood = flood::flood_hydrograph(&self.rainfall, &unit_hydrograph, &self.storm)?;
        if let Some((time, discharge)) = flood.peak() {
            info!(time, discharge, "flood hydrograph peak");
        }
        Ok(FloodReport {
            time_parameters,
            dimensionless,
            unit_hydrograph,
            flood,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketScenario {
    #[serde(flatten)]
    pub inputs: BucketInputs,
    #[serde(default)]
    pub field_capacity: FieldCapacities,
}

impl BucketScenario {
    pub fn run(&self) -> Result<BucketOutput> {
        BucketModel::new(self.field_capacity).run(&self.inputs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundwaterScenario {
    #[serde(flatten)]
    pub aquifer: AquiferParams,
    pub boundary: BoundaryParams,
}

impl GroundwaterScenario {
    pub fn run(&self) -> Result<GroundwaterSolution> {
        GroundwaterSolver::new(self.aquifer, self.boundary)?.solve()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub flood: Option<FloodScenario>,
    pub bucket: Option<BucketScenario>,
    pub groundwater: Option<GroundwaterScenario>,
}

impl Scenario {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let toml_str = fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str)
    }
}
