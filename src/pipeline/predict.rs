//! Assembly of the model-ready feature table and invocation of the
//! predictive model.
//!
//! The column order here is a contract with the trained model, fixed by the
//! typed assembler rather than string-keyed column lookups.

use tracing::debug;

use crate::domain::types::SimulationRow;
use crate::error::SimulationError;
use crate::ml::{FeatureVector, PredictiveModel};
use crate::pipeline::{features, scaling};

/// Names of the assembled columns, in model order.
pub const FEATURE_NAMES: [&str; ModelFeatureRow::FEATURE_COUNT] = [
    "lagging_current_reactive_power_kvarh_scaled",
    "leading_current_reactive_power_kvarh_scaled",
    "co2_tco2_scaled",
    "weekstatus",
    "day_of_week",
    "load_type_light",
    "load_type_maximum",
    "load_type_medium",
    "freq1_sin",
    "freq1_cos",
    "freq2_sin",
    "freq2_cos",
    "freq3_sin",
    "freq3_cos",
    "freq4_sin",
    "freq4_cos",
    "freq5_sin",
    "freq5_cos",
    "freq6_sin",
    "freq6_cos",
    "electric_cluster",
];

/// Model-ready features for one simulated hour. Ephemeral: built, fed to the
/// model, discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelFeatureRow {
    pub lagging_reactive_power_scaled: f64,
    pub leading_reactive_power_scaled: f64,
    pub co2_scaled: f64,
    pub weekstatus: u8,
    pub day_of_week: u8,
    pub load_light: f64,
    pub load_maximum: f64,
    pub load_medium: f64,
    pub cyclical: [(f64, f64); 6],
    pub electric_cluster: u32,
}

impl ModelFeatureRow {
    pub const FEATURE_COUNT: usize = 21;

    pub fn from_row(row: &SimulationRow, electric_cluster: u32) -> Self {
        let (load_light, load_maximum, load_medium) = features::one_hot_load_type(row.load_type);
        Self {
            lagging_reactive_power_scaled: scaling::LAGGING_REACTIVE_POWER
                .scale(row.lagging_reactive_power_kvarh),
            leading_reactive_power_scaled: scaling::LEADING_REACTIVE_POWER
                .scale(row.leading_reactive_power_kvarh),
            co2_scaled: scaling::CO2.scale(row.co2_tco2),
            weekstatus: row.weekstatus.encode(),
            day_of_week: row.day_of_week,
            load_light,
            load_maximum,
            load_medium,
            cyclical: features::cyclical_features(&row.timestamp),
            electric_cluster,
        }
    }

    /// Flatten into the exact ordered vector the model expects.
    pub fn to_feature_vector(&self) -> Result<FeatureVector, SimulationError> {
        let mut values = Vec::with_capacity(Self::FEATURE_COUNT);
        values.push(self.lagging_reactive_power_scaled);
        values.push(self.leading_reactive_power_scaled);
        values.push(self.co2_scaled);
        values.push(f64::from(self.weekstatus));
        values.push(f64::from(self.day_of_week));
        values.push(self.load_light);
        values.push(self.load_maximum);
        values.push(self.load_medium);
        for (sin, cos) in self.cyclical {
            values.push(sin);
            values.push(cos);
        }
        values.push(f64::from(self.electric_cluster));

        FeatureVector::new(values, FEATURE_NAMES.iter().map(|s| s.to_string()).collect())
    }
}

/// Build the ephemeral model table: one feature row per simulation row.
pub fn build_model_rows(rows: &[SimulationRow], cluster_labels: &[u32]) -> Vec<ModelFeatureRow> {
    rows.iter()
        .zip(cluster_labels.iter())
        .map(|(row, label)| ModelFeatureRow::from_row(row, *label))
        .collect()
}

/// Invoke the predictive model per row and rescale the standardized output
/// back to kWh.
pub fn predict_usage(
    model: &dyn PredictiveModel,
    rows: &[ModelFeatureRow],
) -> Result<Vec<f64>, SimulationError> {
    if model.expected_features() != ModelFeatureRow::FEATURE_COUNT {
        return Err(SimulationError::FeatureShape {
            expected: model.expected_features(),
            actual: ModelFeatureRow::FEATURE_COUNT,
        });
    }

    debug!(rows = rows.len(), "running usage prediction");
    rows.iter()
        .map(|row| {
            let features = row.to_feature_vector()?;
            let scaled = model.predict(&features)?;
            Ok(scaling::USAGE_KWH.rescale(scaled))
        })
        .collect()
}
