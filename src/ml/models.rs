//! Baseline model implementations.
//!
//! These stand in for the trained artifacts in the demo binary and in tests.
//! Production deployments inject their own [`ClusterModel`] /
//! [`PredictiveModel`] implementations wrapping the real trained models.

use serde::{Deserialize, Serialize};

use super::{ClusterModel, FeatureVector, PredictiveModel};
use crate::error::SimulationError;

/// Nearest-centroid operating-state classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearestCentroidClusters {
    /// One centroid per operating state, in the raw electrical feature space
    /// `[lagging_rp, leading_rp, lagging_pf, leading_pf]`.
    pub centroids: Vec<[f64; 4]>,
}

impl NearestCentroidClusters {
    pub fn new(centroids: Vec<[f64; 4]>) -> Self {
        Self { centroids }
    }

    /// Three operating states roughly matching light, medium and maximum
    /// load conditions of the reference plant.
    pub fn baseline() -> Self {
        Self::new(vec![
            [4.0, 6.5, 68.0, 85.0],
            [14.0, 3.0, 83.0, 92.0],
            [45.0, 0.5, 94.0, 99.0],
        ])
    }
}

impl ClusterModel for NearestCentroidClusters {
    fn assign(&self, features: &FeatureVector) -> Result<u32, SimulationError> {
        if features.len() != 4 {
            return Err(SimulationError::FeatureShape {
                expected: 4,
                actual: features.len(),
            });
        }
        if self.centroids.is_empty() {
            return Err(SimulationError::Inference(
                "cluster model has no centroids".to_string(),
            ));
        }

        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (label, centroid) in self.centroids.iter().enumerate() {
            let distance: f64 = centroid
                .iter()
                .zip(features.features.iter())
                .map(|(c, f)| (c - f).powi(2))
                .sum();
            if distance < best_distance {
                best_distance = distance;
                best = label;
            }
        }
        Ok(best as u32)
    }
}

/// Linear model over the assembled feature vector, predicting standardized
/// usage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearUsageModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearUsageModel {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Mild positive response to reactive power and CO2. Coefficients are
    /// small enough that the rescaled prediction stays positive over the
    /// whole valid input range.
    pub fn baseline() -> Self {
        let mut coefficients = vec![
            0.20, // lagging reactive power (scaled)
            0.05, // leading reactive power (scaled)
            0.10, // co2 (scaled)
            0.05, // weekstatus
            0.01, // day of week
            0.00, // load type: light
            0.06, // load type: maximum
            0.03, // load type: medium
        ];
        // Seasonal terms and the cluster label contribute only weakly.
        coefficients.extend(std::iter::repeat(0.01).take(12));
        coefficients.push(0.02);
        Self::new(coefficients, 0.0)
    }
}

impl PredictiveModel for LinearUsageModel {
    fn expected_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, SimulationError> {
        if features.len() != self.coefficients.len() {
            return Err(SimulationError::FeatureShape {
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }
        let prediction = features
            .features
            .iter()
            .zip(self.coefficients.iter())
            .map(|(f, c)| f * c)
            .sum::<f64>()
            + self.intercept;
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_features(values: [f64; 4]) -> FeatureVector {
        FeatureVector::new(
            values.to_vec(),
            vec![
                "lagging_reactive_power".to_string(),
                "leading_reactive_power".to_string(),
                "lagging_power_factor".to_string(),
                "leading_power_factor".to_string(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_nearest_centroid_assignment() {
        let model = NearestCentroidClusters::baseline();

        let label = model.assign(&raw_features([4.1, 6.4, 68.2, 85.1])).unwrap();
        assert_eq!(label, 0);

        let label = model.assign(&raw_features([44.0, 0.6, 93.5, 99.0])).unwrap();
        assert_eq!(label, 2);
    }

    #[test]
    fn test_cluster_rejects_wrong_arity() {
        let model = NearestCentroidClusters::baseline();
        let features =
            FeatureVector::new(vec![1.0, 2.0], vec!["a".to_string(), "b".to_string()]).unwrap();
        let err = model.assign(&features).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::FeatureShape {
                expected: 4,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_linear_model_prediction() {
        let model = LinearUsageModel::new(vec![2.0, 3.0, 1.0], 5.0);
        let features = FeatureVector::new(
            vec![1.0, 2.0, 3.0],
            vec!["f1".to_string(), "f2".to_string(), "f3".to_string()],
        )
        .unwrap();

        // 2*1 + 3*2 + 1*3 + 5 = 16
        assert_eq!(model.predict(&features).unwrap(), 16.0);
    }

    #[test]
    fn test_baseline_model_arity_matches_pipeline() {
        assert_eq!(LinearUsageModel::baseline().expected_features(), 21);
    }

    #[test]
    fn test_linear_model_rejects_wrong_arity() {
        let model = LinearUsageModel::baseline();
        let features = FeatureVector::new(vec![0.0; 20], vec![String::new(); 20]).unwrap();
        let err = model.predict(&features).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::FeatureShape {
                expected: 21,
                actual: 20
            }
        ));
    }
}
