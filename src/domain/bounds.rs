//! Valid operating ranges per tracked variable, derived from the reference
//! hourly history the predictive model was trained on.

use chrono::NaiveDateTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::io::Read;

use crate::domain::types::{LoadType, SimulationInputs};
use crate::error::SimulationError;

/// Valid range and dispersion for one tracked variable.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VariableBounds {
    pub min: f64,
    pub max: f64,
    /// Sample standard deviation; drives the noise magnitude.
    pub std: f64,
}

impl VariableBounds {
    pub fn new(min: f64, max: f64, std: f64) -> Result<Self, SimulationError> {
        if min > max {
            return Err(SimulationError::DataLoad(format!(
                "invalid bounds: min {} > max {}",
                min, max
            )));
        }
        if std < 0.0 || !std.is_finite() {
            return Err(SimulationError::DataLoad(format!(
                "invalid standard deviation: {}",
                std
            )));
        }
        Ok(Self { min, max, std })
    }

    /// Clamp a value into `[min, max]`.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Validate a caller-supplied scalar, naming the offending variable.
    pub fn check(&self, variable: &'static str, value: f64) -> Result<(), SimulationError> {
        if !self.contains(value) {
            return Err(SimulationError::InvalidInputs {
                variable,
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    fn from_samples(values: &[f64]) -> Result<Self, SimulationError> {
        if values.is_empty() {
            return Err(SimulationError::DataLoad(
                "reference dataset is empty".to_string(),
            ));
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let std = if values.len() < 2 {
            0.0
        } else {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / (values.len() - 1) as f64;
            variance.sqrt()
        };
        Self::new(min, max, std)
    }
}

/// One record of the reference hourly history.
#[derive(Debug, Clone, Deserialize)]
struct ReferenceRecord {
    lagging_current_reactive_power_kvarh: f64,
    leading_current_reactive_power_kvarh: f64,
    co2_tco2: f64,
    lagging_current_power_factor: f64,
    leading_current_power_factor: f64,
    load_type: String,
}

/// The historical dataset the simulator is anchored to.
///
/// Keeps the raw records so plausible starting inputs can be sampled from
/// real operating points; the aggregated [`BoundsRegistry`] is what the
/// pipeline consumes.
#[derive(Debug, Clone)]
pub struct ReferenceDataset {
    records: Vec<ReferenceRecord>,
}

impl ReferenceDataset {
    /// Read the reference CSV. A missing or unparsable column is fatal.
    pub fn load<R: Read>(reader: R) -> Result<Self, SimulationError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let records = csv_reader
            .deserialize()
            .collect::<Result<Vec<ReferenceRecord>, _>>()?;
        if records.is_empty() {
            return Err(SimulationError::DataLoad(
                "reference dataset is empty".to_string(),
            ));
        }
        Ok(Self { records })
    }

    /// Compute min/max/std per tracked variable.
    pub fn bounds(&self) -> Result<BoundsRegistry, SimulationError> {
        let column = |f: fn(&ReferenceRecord) -> f64| -> Vec<f64> {
            self.records.iter().map(f).collect()
        };

        Ok(BoundsRegistry {
            lagging_reactive_power: VariableBounds::from_samples(&column(|r| {
                r.lagging_current_reactive_power_kvarh
            }))?,
            leading_reactive_power: VariableBounds::from_samples(&column(|r| {
                r.leading_current_reactive_power_kvarh
            }))?,
            co2: VariableBounds::from_samples(&column(|r| r.co2_tco2))?,
            lagging_power_factor: VariableBounds::from_samples(&column(|r| {
                r.lagging_current_power_factor
            }))?,
            leading_power_factor: VariableBounds::from_samples(&column(|r| {
                r.leading_current_power_factor
            }))?,
        })
    }

    /// Draw a plausible set of starting inputs from a random historical row.
    pub fn sample_inputs<R: Rng>(
        &self,
        rng: &mut R,
        start_date: NaiveDateTime,
        total_days: u32,
        total_hours: u32,
    ) -> Result<SimulationInputs, SimulationError> {
        let record = &self.records[rng.gen_range(0..self.records.len())];
        let load_type: LoadType = record.load_type.parse()?;
        Ok(SimulationInputs {
            start_date,
            total_days,
            total_hours,
            lagging_reactive_power: record.lagging_current_reactive_power_kvarh,
            leading_reactive_power: record.leading_current_reactive_power_kvarh,
            co2: record.co2_tco2,
            lagging_power_factor: record.lagging_current_power_factor,
            load_type,
        })
    }
}

/// Immutable registry of per-variable operating bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoundsRegistry {
    lagging_reactive_power: VariableBounds,
    leading_reactive_power: VariableBounds,
    co2: VariableBounds,
    lagging_power_factor: VariableBounds,
    leading_power_factor: VariableBounds,
}

impl BoundsRegistry {
    pub fn new(
        lagging_reactive_power: VariableBounds,
        leading_reactive_power: VariableBounds,
        co2: VariableBounds,
        lagging_power_factor: VariableBounds,
        leading_power_factor: VariableBounds,
    ) -> Self {
        Self {
            lagging_reactive_power,
            leading_reactive_power,
            co2,
            lagging_power_factor,
            leading_power_factor,
        }
    }

    pub fn lagging_reactive_power(&self) -> &VariableBounds {
        &self.lagging_reactive_power
    }

    pub fn leading_reactive_power(&self) -> &VariableBounds {
        &self.leading_reactive_power
    }

    pub fn co2(&self) -> &VariableBounds {
        &self.co2
    }

    pub fn lagging_power_factor(&self) -> &VariableBounds {
        &self.lagging_power_factor
    }

    pub fn leading_power_factor(&self) -> &VariableBounds {
        &self.leading_power_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const REFERENCE_CSV: &str = "\
lagging_current_reactive_power_kvarh,leading_current_reactive_power_kvarh,co2_tco2,lagging_current_power_factor,leading_current_power_factor,load_type
10.0,2.0,0.01,80.0,95.0,Light_Load
20.0,4.0,0.02,70.0,90.0,Medium_Load
30.0,6.0,0.03,90.0,85.0,Maximum_Load
";

    #[test]
    fn test_bounds_from_reference_csv() {
        let dataset = ReferenceDataset::load(REFERENCE_CSV.as_bytes()).unwrap();
        let bounds = dataset.bounds().unwrap();

        assert_eq!(bounds.lagging_reactive_power().min, 10.0);
        assert_eq!(bounds.lagging_reactive_power().max, 30.0);
        assert_eq!(bounds.lagging_reactive_power().std, 10.0);
        assert_eq!(bounds.co2().min, 0.01);
        assert_eq!(bounds.co2().max, 0.03);
        assert_eq!(bounds.leading_power_factor().min, 85.0);
        assert_eq!(bounds.leading_power_factor().max, 95.0);
    }

    #[test]
    fn test_missing_column_is_data_load_error() {
        let csv = "\
lagging_current_reactive_power_kvarh,co2_tco2
10.0,0.01
";
        let err = ReferenceDataset::load(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SimulationError::DataLoad(_)));
    }

    #[test]
    fn test_empty_dataset_is_data_load_error() {
        let csv = "\
lagging_current_reactive_power_kvarh,leading_current_reactive_power_kvarh,co2_tco2,lagging_current_power_factor,leading_current_power_factor,load_type
";
        let err = ReferenceDataset::load(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, SimulationError::DataLoad(_)));
    }

    #[test]
    fn test_sample_inputs_comes_from_a_historical_row() {
        let dataset = ReferenceDataset::load(REFERENCE_CSV.as_bytes()).unwrap();
        let bounds = dataset.bounds().unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        let inputs = dataset.sample_inputs(&mut rng, start, 1, 0).unwrap();
        assert!(inputs.validate(&bounds).is_ok());
        assert_eq!(inputs.total_entries(), 25);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        assert!(VariableBounds::new(5.0, 1.0, 0.0).is_err());
        assert!(VariableBounds::new(1.0, 5.0, -1.0).is_err());
        assert!(VariableBounds::new(1.0, 5.0, 2.0).is_ok());
    }

    #[test]
    fn test_clamp_and_contains() {
        let bounds = VariableBounds::new(0.0, 10.0, 1.0).unwrap();
        assert_eq!(bounds.clamp(-5.0), 0.0);
        assert_eq!(bounds.clamp(15.0), 10.0);
        assert_eq!(bounds.clamp(5.0), 5.0);
        assert!(bounds.contains(0.0));
        assert!(bounds.contains(10.0));
        assert!(!bounds.contains(10.1));
    }
}
