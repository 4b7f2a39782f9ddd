//! Derived features: the regression-derived leading power factor, cyclical
//! encodings of the known periodicities, and the categorical encodings.

use chrono::NaiveDateTime;
use rand::Rng;

use crate::domain::bounds::VariableBounds;
use crate::domain::types::LoadType;
use crate::pipeline::variation;

/// Linear relation between leading reactive power and leading power factor,
/// fitted on the reference history.
pub const LEADING_PF_SLOPE: f64 = -0.23;
pub const LEADING_PF_INTERCEPT: f64 = 23.09;

/// Periodicities the usage signal is known to carry, in cycles per year.
pub const CYCLES_PER_YEAR: [f64; 6] = [
    4.002766, 52.035958, 365.2524, 1095.7572, 1461.0096, 1826.262,
];

/// Mean Gregorian year, in seconds.
const SECONDS_PER_YEAR: f64 = 365.2425 * 86_400.0;

/// Derive the leading power factor from leading reactive power.
///
/// This variable is never accepted from the caller: it is computed from the
/// fitted linear relation, perturbed with the variable's own noise level and
/// clamped into its historical range.
pub fn derive_leading_power_factor<R: Rng>(
    leading_reactive_power: &[f64],
    bounds: &VariableBounds,
    noise_std: f64,
    rng: &mut R,
) -> Vec<f64> {
    let mut values: Vec<f64> = leading_reactive_power
        .iter()
        .map(|x| x * LEADING_PF_SLOPE + LEADING_PF_INTERCEPT)
        .collect();
    variation::add_noise(&mut values, noise_std, rng);
    variation::clamp_to_bounds(&mut values, bounds);
    values
}

/// Sine/cosine pair per known periodicity for one timestamp.
///
/// `t` is the timestamp's position in fractional years since the Unix epoch,
/// matching the encoding the model was trained with.
pub fn cyclical_features(timestamp: &NaiveDateTime) -> [(f64, f64); 6] {
    let t_years = timestamp.and_utc().timestamp() as f64 / SECONDS_PER_YEAR;
    CYCLES_PER_YEAR.map(|frequency| {
        let angle = 2.0 * std::f64::consts::PI * frequency * t_years;
        (angle.sin(), angle.cos())
    })
}

/// One-hot encoding of the load type.
///
/// Column order is (light, maximum, medium), the layout the predictive
/// model was trained with. Exactly one flag is 1.0.
pub fn one_hot_load_type(load_type: LoadType) -> (f64, f64, f64) {
    match load_type {
        LoadType::LightLoad => (1.0, 0.0, 0.0),
        LoadType::MaximumLoad => (0.0, 1.0, 0.0),
        LoadType::MediumLoad => (0.0, 0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rstest::rstest;

    #[test]
    fn test_leading_pf_is_exact_linear_without_noise() {
        let bounds = VariableBounds::new(0.0, 100.0, 5.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let values = derive_leading_power_factor(&[0.0, 2.0, 10.0], &bounds, 0.0, &mut rng);
        assert_eq!(values[0], 23.09);
        assert!((values[1] - (2.0 * -0.23 + 23.09)).abs() < 1e-12);
        assert!((values[2] - (10.0 * -0.23 + 23.09)).abs() < 1e-12);
    }

    #[test]
    fn test_leading_pf_clamped_to_bounds() {
        // Intercept alone is 23.09; a [40, 100] range forces the clamp.
        let bounds = VariableBounds::new(40.0, 100.0, 2.0).unwrap();
        let mut rng = StdRng::seed_from_u64(2);
        let values = derive_leading_power_factor(&[0.0; 50], &bounds, bounds.std, &mut rng);
        assert!(values.iter().all(|v| (40.0..=100.0).contains(v)));
    }

    #[test]
    fn test_cyclical_features_lie_on_unit_circle() {
        let timestamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        for (sin, cos) in cyclical_features(&timestamp) {
            assert!((sin * sin + cos * cos - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_cyclical_features_distinguish_hours() {
        let base = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let later = base + chrono::Duration::hours(6);
        // The fastest frequency (~daily and above) must move within 6 hours.
        let a = cyclical_features(&base);
        let b = cyclical_features(&later);
        assert!((a[2].0 - b[2].0).abs() > 1e-6);
    }

    #[rstest]
    #[case(LoadType::LightLoad, (1.0, 0.0, 0.0))]
    #[case(LoadType::MaximumLoad, (0.0, 1.0, 0.0))]
    #[case(LoadType::MediumLoad, (0.0, 0.0, 1.0))]
    fn test_one_hot_exclusivity(#[case] load_type: LoadType, #[case] expected: (f64, f64, f64)) {
        let (light, maximum, medium) = one_hot_load_type(load_type);
        assert_eq!((light, maximum, medium), expected);
        assert_eq!(light + maximum + medium, 1.0);
    }
}
