//! Model-facing types and the contracts the externally trained models
//! fulfil.
//!
//! The cluster model and the predictive model are opaque collaborators: the
//! pipeline hands them feature vectors in a fixed column order and consumes
//! their output, nothing more. Their training and internals live elsewhere.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

pub mod models;

/// Ordered numeric features plus their column names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureVector {
    pub features: Vec<f64>,
    pub feature_names: Vec<String>,
}

impl FeatureVector {
    pub fn new(features: Vec<f64>, feature_names: Vec<String>) -> Result<Self, SimulationError> {
        if features.len() != feature_names.len() {
            return Err(SimulationError::FeatureShape {
                expected: feature_names.len(),
                actual: features.len(),
            });
        }
        Ok(Self {
            features,
            feature_names,
        })
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Maps raw electrical features to a discrete operating-state label.
///
/// Stateless from the pipeline's perspective; expects the four raw columns
/// `[lagging_reactive_power, leading_reactive_power, lagging_power_factor,
/// leading_power_factor]`.
pub trait ClusterModel: Send + Sync {
    fn assign(&self, features: &FeatureVector) -> Result<u32, SimulationError>;
}

/// Predicts standardized energy usage from the assembled feature vector.
pub trait PredictiveModel: Send + Sync {
    /// Number of columns the model was trained on; used to reject a
    /// mismatched feature assembly before inference.
    fn expected_features(&self) -> usize;

    /// Standardized prediction; the invoker rescales it back to kWh.
    fn predict(&self, features: &FeatureVector) -> Result<f64, SimulationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_creation() {
        let fv = FeatureVector::new(
            vec![1.0, 2.0, 3.0],
            vec!["f1".to_string(), "f2".to_string(), "f3".to_string()],
        )
        .unwrap();
        assert_eq!(fv.len(), 3);
        assert!(!fv.is_empty());
    }

    #[test]
    fn test_feature_vector_shape_mismatch() {
        let err = FeatureVector::new(vec![1.0, 2.0], vec!["f1".to_string()]).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::FeatureShape {
                expected: 1,
                actual: 2
            }
        ));
    }
}
