//! Bounded stochastic variation for the constant-filled parameter arrays.
//!
//! Each continuous variable gets independent per-element noise, then a clamp
//! back into its historical operating range. A value pushed out of range by
//! noise is corrected silently, never reported as an error.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::domain::bounds::VariableBounds;

/// Add independent noise to every element: magnitude uniform in
/// `[0, 3*std)`, sign positive or negative with equal probability.
///
/// A zero standard deviation leaves the array untouched.
pub fn add_noise<R: Rng>(values: &mut [f64], std: f64, rng: &mut R) {
    if std <= 0.0 {
        return;
    }
    let magnitude = Uniform::new(0.0, 3.0 * std);
    for value in values.iter_mut() {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        *value += sign * magnitude.sample(rng);
    }
}

/// Clamp every element into `[min, max]`.
pub fn clamp_to_bounds(values: &mut [f64], bounds: &VariableBounds) {
    for value in values.iter_mut() {
        *value = bounds.clamp(*value);
    }
}

/// Noise followed by clamping; the output always lies within the bounds.
pub fn apply_variation<R: Rng>(values: &mut [f64], bounds: &VariableBounds, rng: &mut R) {
    add_noise(values, bounds.std, rng);
    clamp_to_bounds(values, bounds);
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_zero_std_is_identity() {
        let bounds = VariableBounds::new(0.0, 100.0, 0.0).unwrap();
        let mut values = vec![10.0, 20.0, 30.0];
        let mut rng = StdRng::seed_from_u64(1);
        apply_variation(&mut values, &bounds, &mut rng);
        assert_eq!(values, vec![10.0, 20.0, 30.0]);
    }

    #[test]
    fn test_noise_magnitude_is_bounded() {
        let mut rng = StdRng::seed_from_u64(2);
        let std = 2.0;
        let mut values = vec![50.0; 1000];
        add_noise(&mut values, std, &mut rng);
        for value in values {
            assert!((value - 50.0).abs() < 3.0 * std);
        }
    }

    #[test]
    fn test_noise_varies_across_elements() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut values = vec![50.0; 100];
        add_noise(&mut values, 1.0, &mut rng);
        let first = values[0];
        assert!(values.iter().any(|v| (v - first).abs() > f64::EPSILON));
    }

    proptest! {
        /// Core invariant: after clamping, every element lies in [min, max],
        /// whatever the noise did.
        #[test]
        fn prop_variation_respects_bounds(
            seed in any::<u64>(),
            base in -1000.0f64..1000.0,
            std in 0.0f64..100.0,
            span in 0.0f64..500.0,
            min in -500.0f64..500.0,
        ) {
            let bounds = VariableBounds::new(min, min + span, std).unwrap();
            let mut rng = StdRng::seed_from_u64(seed);
            let mut values = vec![base; 64];
            apply_variation(&mut values, &bounds, &mut rng);
            for value in values {
                prop_assert!(value >= bounds.min && value <= bounds.max);
            }
        }
    }
}
