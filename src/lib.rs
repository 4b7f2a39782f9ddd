//! Plant Energy Twin
//!
//! Simulates the hourly electricity-consumption behavior of an industrial
//! plant: a small set of operating parameters is expanded into a
//! time-indexed feature table, enriched with derived and calendar features,
//! and fed to a pretrained predictive model to obtain an energy-usage
//! forecast per timestamp.
//!
//! The trained cluster and usage models are injected as opaque
//! [`ml::ClusterModel`] / [`ml::PredictiveModel`] implementations; loading
//! them from storage, exporting results and plotting are out of scope.

pub mod config;
pub mod domain;
pub mod error;
pub mod ml;
pub mod pipeline;
pub mod telemetry;

pub use domain::{
    BoundsRegistry, LoadType, ReferenceDataset, SimulationInputs, SimulationRow, SimulationRun,
    VariableBounds, WeekStatus,
};
pub use error::SimulationError;
pub use pipeline::SimulationState;
