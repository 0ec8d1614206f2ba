//! Watershed hydrologic response: time-of-concentration estimates, NRCS unit
//! hydrographs, flood hydrograph convolution, a lumped bucket rainfall-runoff
//! model and a steady 1-D groundwater solver.

pub mod boundary_cond;
pub mod bucket;
pub mod config;
pub mod dimensionless;
pub mod error;
pub mod flood;
pub mod groundwater;
pub mod linear_solver;
pub mod matrix;
pub mod precipitation;
pub mod runoff;
pub mod time_params;
pub mod timeseries;
pub mod unit_hydrograph;
pub mod units;

pub use boundary_cond::{BoundaryParams, RightBoundary};
pub use bucket::{BucketInputs, BucketModel, BucketOutput, FieldCapacities, LandUseFractions};
pub use config::{FloodReport, FloodScenario, Scenario};
pub use dimensionless::{DimensionlessCurve, PeakRateFactor};
pub use error::{HydroError, Result};
pub use flood::{FloodHydrograph, StormEvent};
pub use groundwater::{AquiferParams, GroundwaterSolution, GroundwaterSolver};
pub use linear_solver::LinearSystem;
pub use time_params::{BasinParameters, EstimationMethod, TimeParameters};
pub use timeseries::TimeSeries;
pub use unit_hydrograph::UnitHydrograph;
pub use units::UnitSystem;
