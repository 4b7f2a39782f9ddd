//! The stateful simulation pipeline.
//!
//! Stages run in dependency order: input expansion, stochastic variation
//! with bounds enforcement, derived features, cluster assignment, fixed
//! feature scaling, prediction and rescaling to kWh. [`SimulationState`]
//! orchestrates the stages and caches the expanded table across calls with
//! unchanged inputs.

pub mod cluster;
pub mod expand;
pub mod features;
pub mod predict;
pub mod scaling;
pub mod state;
pub mod variation;

pub use predict::ModelFeatureRow;
pub use state::SimulationState;
