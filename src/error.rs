use thiserror::Error;

/// Errors surfaced by the simulation pipeline.
///
/// Out-of-range values produced by noise injection are never errors: they are
/// silently clamped back into the allowed range. Only caller-supplied scalars
/// are validated, before any derivation runs.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("reference data error: {0}")]
    DataLoad(String),

    #[error("input {variable} = {value} outside allowed range [{min}, {max}]")]
    InvalidInputs {
        variable: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("unknown load type: {0}")]
    UnknownCategory(String),

    #[error("feature vector mismatch: model expects {expected} columns, got {actual}")]
    FeatureShape { expected: usize, actual: usize },

    #[error("model inference failed: {0}")]
    Inference(String),
}

impl From<csv::Error> for SimulationError {
    fn from(error: csv::Error) -> Self {
        SimulationError::DataLoad(error.to_string())
    }
}
