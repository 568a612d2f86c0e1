//! Test utilities for impact estimation tests.
//!
//! Provides fixtures for common impactors and assertions for checking the
//! invariants every result must satisfy.

use crate::casualty::PopulationImpact;
use crate::physics::ImpactEffects;
use crate::types::ImpactorParameters;

/// Fixtures for creating test impactors.
pub mod fixtures {
    use super::*;

    /// 100 m stony asteroid at 20 km/s, 45° entry, over the Atlantic.
    pub fn stony_100m() -> ImpactorParameters {
        ImpactorParameters::new(100.0, 20.0, 45.0, 3000.0, 20.0, -40.0)
    }

    /// 1 km stony asteroid at 20 km/s striking vertically over Europe.
    pub fn stony_1km() -> ImpactorParameters {
        ImpactorParameters::new(1000.0, 20.0, 90.0, 3000.0, 48.85, 2.35)
    }

    /// Chelyabinsk-sized airburst candidate.
    pub fn small_20m() -> ImpactorParameters {
        ImpactorParameters::new(20.0, 19.0, 18.0, 3300.0, 55.15, 61.4)
    }

    /// Impactor with the given diameter, otherwise like [`stony_100m`].
    pub fn with_diameter(diameter: f64) -> ImpactorParameters {
        ImpactorParameters {
            diameter,
            ..stony_100m()
        }
    }
}

/// Assertions for verifying result invariants.
pub mod assertions {
    use super::*;

    /// Assert every radius and energy value is finite and non-negative.
    ///
    /// # Panics
    /// Panics naming the first offending field.
    pub fn assert_effects_non_negative(effects: &ImpactEffects) {
        let values = [
            ("energy_megatons", effects.energy.energy_megatons),
            ("crater_diameter", effects.crater.diameter_km),
            ("crater_depth", effects.crater.depth_km),
            ("fireball_radius", effects.thermal.fireball_radius_km),
            ("ignition_radius", effects.thermal.ignition_radius_km),
            ("third_degree_radius", effects.thermal.third_degree_radius_km),
            ("second_degree_radius", effects.thermal.second_degree_radius_km),
            ("air_blast_radius", effects.blast.air_blast_radius),
            ("moderate_damage_radius", effects.blast.moderate_damage_radius),
            ("light_damage_radius", effects.blast.light_damage_radius),
            ("lung_damage_radius", effects.wind.lung_damage_radius),
            ("seismic_felt_radius", effects.seismic.felt_radius_km),
            ("affected_area", effects.affected_area),
        ];
        for (name, value) in values {
            assert!(
                value.is_finite() && value >= 0.0,
                "{name} should be finite and non-negative, got {value}"
            );
        }
    }

    /// Assert the headline totals of a casualty estimate are consistent.
    pub fn assert_casualties_consistent(impact: &PopulationImpact) {
        let zone_sum = impact.crater_vaporized + impact.severe_zone_fatalities + impact.moderate_zone_fatalities;
        assert_eq!(
            impact.estimated_fatalities, zone_sum,
            "estimated fatalities must equal the zone totals"
        );
        assert_eq!(impact.severity, crate::casualty::Severity::from_fatalities(impact.estimated_fatalities));
    }

    /// Relative difference between two values, safe around zero.
    pub fn relative_difference(a: f64, b: f64) -> f64 {
        let scale = a.abs().max(b.abs());
        if scale < 1e-12 { 0.0 } else { (a - b).abs() / scale }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::compute_impact_effects;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixtures_are_valid() {
        for params in [
            fixtures::stony_100m(),
            fixtures::stony_1km(),
            fixtures::small_20m(),
            fixtures::with_diameter(640.0),
        ] {
            assert!(params.validate().is_ok(), "{params:?} should validate");
            assertions::assert_effects_non_negative(&compute_impact_effects(&params));
        }
    }

    #[test]
    fn test_relative_difference() {
        assert_relative_eq!(assertions::relative_difference(100.0, 99.0), 0.01);
        assert_eq!(assertions::relative_difference(0.0, 0.0), 0.0);
    }
}
