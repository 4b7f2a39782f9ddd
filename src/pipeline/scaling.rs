//! Standardization with the fixed parameters the predictive model was
//! trained with.
//!
//! The parameters are never refit on simulated data: projecting simulated
//! inputs into the training coordinate space is the whole point. Features
//! without an entry here pass through unscaled.

use serde::{Deserialize, Serialize};

/// Fixed `(mu, sigma)` pair for one standardized column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScalingParams {
    pub mu: f64,
    pub sigma: f64,
}

impl ScalingParams {
    /// `(value - mu) / sigma`
    pub fn scale(&self, value: f64) -> f64 {
        (value - self.mu) / self.sigma
    }

    /// `value * sigma + mu`
    pub fn rescale(&self, value: f64) -> f64 {
        value * self.sigma + self.mu
    }
}

pub const LAGGING_REACTIVE_POWER: ScalingParams = ScalingParams {
    mu: 13.035383561643835,
    sigma: 14.524747793581406,
};

pub const LEADING_REACTIVE_POWER: ScalingParams = ScalingParams {
    mu: 3.8709486301369855,
    sigma: 6.729335287688414,
};

pub const CO2: ScalingParams = ScalingParams {
    mu: 0.01152425799086758,
    sigma: 0.015072620173269598,
};

/// Target scaling: converts the model's standardized output back to kWh.
pub const USAGE_KWH: ScalingParams = ScalingParams {
    mu: 27.386892408675802,
    sigma: 31.352646806775816,
};
