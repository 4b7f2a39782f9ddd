//! Operating-state cluster assignment.

use crate::domain::types::SimulationRow;
use crate::error::SimulationError;
use crate::ml::{ClusterModel, FeatureVector};

/// Column order the clustering model was trained with.
const CLUSTER_FEATURES: [&str; 4] = [
    "lagging_current_reactive_power_kvarh",
    "leading_current_reactive_power_kvarh",
    "lagging_current_power_factor",
    "leading_current_power_factor",
];

/// Assign each row's raw electrical state to a discrete cluster label.
pub fn assign_clusters(
    model: &dyn ClusterModel,
    rows: &[SimulationRow],
) -> Result<Vec<u32>, SimulationError> {
    rows.iter()
        .map(|row| {
            let features = FeatureVector::new(
                vec![
                    row.lagging_reactive_power_kvarh,
                    row.leading_reactive_power_kvarh,
                    row.lagging_power_factor,
                    row.leading_power_factor,
                ],
                CLUSTER_FEATURES.iter().map(|s| s.to_string()).collect(),
            )?;
            model.assign(&features)
        })
        .collect()
}
