pub mod bounds;
pub mod types;

pub use bounds::{BoundsRegistry, ReferenceDataset, VariableBounds};
pub use types::{LoadType, SimulationInputs, SimulationRow, SimulationRun, WeekStatus};
