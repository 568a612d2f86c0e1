//! Property-based tests for the impact physics calculator using proptest.
//!
//! These tests verify invariants across the full range of plausible impactors.

use proptest::prelude::*;

use super::compute_impact_effects;
use crate::test_utils::assertions;
use crate::types::ImpactorParameters;

fn impactor() -> impl Strategy<Value = ImpactorParameters> {
    (
        1.0f64..5000.0,
        11.0f64..72.0,
        5.0f64..=90.0,
        900.0f64..8000.0,
        -90.0f64..=90.0,
        -180.0f64..=180.0,
    )
        .prop_map(|(diameter, velocity, angle, density, lat, lon)| {
            ImpactorParameters::new(diameter, velocity, angle, density, lat, lon)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Repeated evaluation of the same input gives identical output.
    #[test]
    fn prop_deterministic(params in impactor()) {
        let first = compute_impact_effects(&params);
        let second = compute_impact_effects(&params);
        prop_assert_eq!(first, second);
    }

    /// Valid input never yields negative or non-finite radii.
    #[test]
    fn prop_radii_non_negative(params in impactor()) {
        prop_assume!(params.validate().is_ok());
        let effects = compute_impact_effects(&params);
        prop_assert!(effects.is_finite());
        assertions::assert_effects_non_negative(&effects);
    }

    /// Larger impactors release more energy and dig larger craters.
    #[test]
    fn prop_monotonic_in_diameter(params in impactor(), growth in 1.01f64..4.0) {
        let small = compute_impact_effects(&params);
        let large = compute_impact_effects(&ImpactorParameters {
            diameter: params.diameter * growth,
            ..params
        });

        prop_assert!(large.energy.energy_megatons > small.energy.energy_megatons);
        prop_assert!(large.crater.diameter_km > small.crater.diameter_km);
        prop_assert!(large.blast.moderate_damage_radius > small.blast.moderate_damage_radius);
    }

    /// Faster impactors release more energy.
    #[test]
    fn prop_monotonic_in_velocity(params in impactor(), extra in 0.5f64..30.0) {
        let slow = compute_impact_effects(&params);
        let fast = compute_impact_effects(&ImpactorParameters {
            velocity: params.velocity + extra,
            ..params
        });

        prop_assert!(fast.energy.energy_megatons > slow.energy.energy_megatons);
        prop_assert!(fast.seismic.magnitude > slow.seismic.magnitude);
    }

    /// Steeper impacts always give smaller craters than shallow ones.
    #[test]
    fn prop_steeper_angle_smaller_crater(params in impactor(), steeper in 1.0f64..40.0) {
        let angle = (params.angle + steeper).min(90.0);
        prop_assume!(angle > params.angle);
        let shallow = compute_impact_effects(&params);
        let steep = compute_impact_effects(&ImpactorParameters { angle, ..params });
        prop_assert!(steep.crater.diameter_km < shallow.crater.diameter_km);
        prop_assert_eq!(steep.energy.energy_megatons, shallow.energy.energy_megatons);
    }
}
