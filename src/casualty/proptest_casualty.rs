//! Property-based tests for the casualty estimator using proptest.

use proptest::prelude::*;

use super::{compute_casualties, CasualtyInputs, Severity, ZoneAreas};
use crate::physics::compute_impact_effects;
use crate::test_utils::assertions;
use crate::types::{GeoPoint, ImpactorParameters};

fn impactor() -> impl Strategy<Value = ImpactorParameters> {
    (
        1.0f64..3000.0,
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

    /// Ring areas add back up to the enclosing discs.
    #[test]
    fn prop_ring_areas_decompose(
        crater in 0.0f64..50.0,
        severe in 0.0f64..200.0,
        moderate in 0.0f64..500.0,
    ) {
        let areas = ZoneAreas::from_radii(crater, severe, moderate);
        let severe_disc = std::f64::consts::PI * severe * severe;
        let moderate_disc = std::f64::consts::PI * moderate * moderate;
        // Rings may be negative, so compare against the largest disc involved.
        let scale = areas.crater.max(severe_disc).max(moderate_disc).max(1.0);

        prop_assert!(((areas.crater + areas.severe) - severe_disc).abs() / scale < 1e-12);
        prop_assert!((areas.total() - moderate_disc).abs() / scale < 1e-12);
    }

    /// Headline totals are consistent for any impact and density.
    #[test]
    fn prop_totals_consistent(params in impactor(), density in proptest::option::of(0.0f64..20_000.0)) {
        let effects = compute_impact_effects(&params);
        let impact = compute_casualties(&CasualtyInputs::from_effects(&effects), density);
        assertions::assert_casualties_consistent(&impact);
        prop_assert!(impact.population_density >= 0.0);
    }

    /// Zero measured density means nobody is hurt anywhere.
    #[test]
    fn prop_zero_density_zero_casualties(params in impactor()) {
        let effects = compute_impact_effects(&params);
        let impact = compute_casualties(&CasualtyInputs::from_effects(&effects), Some(0.0));
        prop_assert_eq!(impact.estimated_fatalities, 0);
        prop_assert_eq!(impact.total_at_risk, 0);
        prop_assert_eq!(impact.seismic_deaths, 0);
        prop_assert_eq!(impact.severity, Severity::Low);
    }

    /// More fatalities never lowers the severity class.
    #[test]
    fn prop_severity_monotonic(a in 0u64..5_000_000, b in 0u64..5_000_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Severity::from_fatalities(low) <= Severity::from_fatalities(high));
    }

    /// Denser populations never produce fewer headline fatalities.
    #[test]
    fn prop_fatalities_monotonic_in_density(
        params in impactor(),
        density in 0.0f64..5_000.0,
        factor in 1.0f64..10.0,
    ) {
        let effects = compute_impact_effects(&params);
        let inputs = CasualtyInputs::from_effects(&effects);
        let sparse = compute_casualties(&inputs, Some(density));
        let dense = compute_casualties(&inputs, Some(density * factor));
        prop_assert!(dense.total_at_risk >= sparse.total_at_risk);
        prop_assert!(dense.crater_vaporized >= sparse.crater_vaporized);
        prop_assert!(dense.estimated_fatalities >= sparse.estimated_fatalities);
        prop_assert!(dense.severity >= sparse.severity);
    }

    /// The geographic fallback always yields one of its calibrated densities.
    #[test]
    fn prop_estimated_density_is_calibrated(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
        let estimate = super::estimate_region(GeoPoint::new(lat, lon));
        prop_assert!([0.5, 1.0, 25.0, 150.0].contains(&estimate.density));
    }
}
