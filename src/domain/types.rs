use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::bounds::BoundsRegistry;
use crate::error::SimulationError;

/// Categorical plant operating mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoadType {
    #[serde(rename = "Light_Load")]
    LightLoad,
    #[serde(rename = "Medium_Load")]
    MediumLoad,
    #[serde(rename = "Maximum_Load")]
    MaximumLoad,
}

impl std::str::FromStr for LoadType {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Light_Load" => Ok(LoadType::LightLoad),
            "Medium_Load" => Ok(LoadType::MediumLoad),
            "Maximum_Load" => Ok(LoadType::MaximumLoad),
            _ => Err(SimulationError::UnknownCategory(s.to_string())),
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadType::LightLoad => write!(f, "Light_Load"),
            LoadType::MediumLoad => write!(f, "Medium_Load"),
            LoadType::MaximumLoad => write!(f, "Maximum_Load"),
        }
    }
}

/// Whether a simulated day falls on a working day or the weekend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WeekStatus {
    Weekday,
    Weekend,
}

impl WeekStatus {
    /// Model encoding: Weekday = 1, Weekend = 0.
    pub fn encode(&self) -> u8 {
        match self {
            WeekStatus::Weekday => 1,
            WeekStatus::Weekend => 0,
        }
    }
}

impl std::fmt::Display for WeekStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeekStatus::Weekday => write!(f, "Weekday"),
            WeekStatus::Weekend => write!(f, "Weekend"),
        }
    }
}

/// User-supplied operating parameters for one simulation window.
///
/// Compared field-by-field against the previously accepted inputs to decide
/// whether the simulation table must be rebuilt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationInputs {
    pub start_date: NaiveDateTime,
    pub total_days: u32,
    pub total_hours: u32,
    pub lagging_reactive_power: f64,
    pub leading_reactive_power: f64,
    pub co2: f64,
    pub lagging_power_factor: f64,
    pub load_type: LoadType,
}

impl SimulationInputs {
    /// Reject scalars outside the historical operating range.
    ///
    /// Validation happens before noise injection; values pushed out of range
    /// by noise later in the pipeline are clamped instead.
    pub fn validate(&self, bounds: &BoundsRegistry) -> Result<(), SimulationError> {
        bounds
            .lagging_reactive_power()
            .check("lagging_reactive_power", self.lagging_reactive_power)?;
        bounds
            .leading_reactive_power()
            .check("leading_reactive_power", self.leading_reactive_power)?;
        bounds.co2().check("co2", self.co2)?;
        bounds
            .lagging_power_factor()
            .check("lagging_power_factor", self.lagging_power_factor)?;
        Ok(())
    }

    /// Number of hourly entries the expanded table will hold.
    pub fn total_entries(&self) -> usize {
        (self.total_days as usize) * 24 + (self.total_hours as usize) + 1
    }
}

/// One simulated hour of plant operation.
///
/// `usage_kwh` stays `None` until the predictive model has run; rows returned
/// inside a [`SimulationRun`] always carry a prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationRow {
    pub timestamp: NaiveDateTime,
    pub lagging_reactive_power_kvarh: f64,
    pub leading_reactive_power_kvarh: f64,
    pub co2_tco2: f64,
    pub lagging_power_factor: f64,
    pub leading_power_factor: f64,
    /// Seconds since midnight of the row's own day, 0..=86399.
    pub nsm: u32,
    pub weekstatus: WeekStatus,
    /// Monday = 1 .. Sunday = 7.
    pub day_of_week: u8,
    pub load_type: LoadType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_kwh: Option<f64>,
}

/// One completed simulation, as appended to the run log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRun {
    pub sequence_number: u64,
    /// Sheet name the downstream exporter files this run under.
    pub sheet_name: String,
    pub rows: Vec<SimulationRow>,
}

impl SimulationRun {
    pub fn new(sequence_number: u64, start_date: NaiveDateTime, rows: Vec<SimulationRow>) -> Self {
        let sheet_name = format!(
            "sim{}_{}",
            sequence_number,
            start_date.format("%Y-%m-%d %H:%M:%S")
        );
        Self {
            sequence_number,
            sheet_name,
            rows,
        }
    }

    /// Serialize the run for a downstream exporter. The pipeline itself
    /// performs no file I/O.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
