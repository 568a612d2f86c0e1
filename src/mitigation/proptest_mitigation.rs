//! Property-based tests for the mitigation estimator using proptest.

use proptest::prelude::*;

use super::{compute_mitigation, DeflectionStrategy, MitigationParameters, MISS_THRESHOLD_KM};

fn strategy() -> impl Strategy<Value = DeflectionStrategy> {
    prop_oneof![
        Just(DeflectionStrategy::Kinetic),
        Just(DeflectionStrategy::GravityTractor),
        Just(DeflectionStrategy::Nuclear),
    ]
}

fn campaign() -> impl Strategy<Value = MitigationParameters> {
    (
        1.0f64..5000.0,
        11.0f64..72.0,
        -90.0f64..=90.0,
        -180.0f64..=180.0,
        strategy(),
        0.01f64..50.0,
        0.001f64..20.0,
    )
        .prop_map(
            |(diameter, velocity, lat, lon, strategy, warning_time_years, velocity_change_cm_s)| {
                MitigationParameters {
                    diameter,
                    velocity,
                    lat,
                    lon,
                    strategy,
                    warning_time_years,
                    velocity_change_cm_s,
                }
            },
        )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Success is exactly "deflection beyond 2% of Earth's radius".
    #[test]
    fn prop_success_matches_threshold(params in campaign()) {
        let outcome = compute_mitigation(&params);
        prop_assert_eq!(outcome.success, outcome.deflection_distance_km > MISS_THRESHOLD_KM);
        prop_assert_eq!(outcome.success, outcome.new_impact_location.is_none());
    }

    /// Probability always lands in [5, 98] and never exceeds the strategy cap.
    #[test]
    fn prop_probability_bounded(params in campaign()) {
        let outcome = compute_mitigation(&params);
        let cap = params.strategy.coefficients().cap;
        prop_assert!(outcome.success_probability_percent >= 5.0);
        prop_assert!(outcome.success_probability_percent <= 98.0);
        prop_assert!(outcome.success_probability_percent <= cap.max(5.0));
    }

    /// Identical campaigns give identical answers.
    #[test]
    fn prop_idempotent(params in campaign()) {
        prop_assert_eq!(compute_mitigation(&params), compute_mitigation(&params));
    }

    /// Longitude is never touched by the meridional shift.
    #[test]
    fn prop_longitude_unchanged(params in campaign()) {
        if let Some(location) = compute_mitigation(&params).new_impact_location {
            prop_assert_eq!(location.lon, params.lon);
            prop_assert!(location.lat >= params.lat);
        }
    }
}
