//! Benchmark percentile classification and target comparison.

use crate::view::{BenchmarkZone, PercentilePosition, TargetComparison, TargetStatus};
use carbon_store::{BenchmarkTarget, Distribution};

const NEAR_TERM_TARGET_ID: &str = "near_term_target";
const STRETCH_TARGET_ID: &str = "stretch_target";

// Fallbacks when the named targets are missing from the dataset.
const DEFAULT_NEAR_TERM_TARGET: f64 = 250.0;
const DEFAULT_STRETCH_TARGET: f64 = 200.0;

/// Classify an intensity against the p10/p50/p90 distribution.
///
/// Boundaries are inclusive on the lower end and exclusive on the upper end;
/// the top zone has no upper bound.
#[must_use]
pub fn percentile_position(intensity: f64, distribution: &Distribution) -> PercentilePosition {
    let (zone, description) = if intensity < distribution.p10 {
        (BenchmarkZone::VeryLow, "Muito baixo")
    } else if intensity < distribution.p50 {
        (BenchmarkZone::Low, "Baixo")
    } else if intensity < distribution.p90 {
        (BenchmarkZone::MediumHigh, "Médio–alto")
    } else {
        (BenchmarkZone::VeryHigh, "Muito alto")
    };

    PercentilePosition {
        zone,
        description_pt_br: description.to_string(),
    }
}

/// Evaluate the active intensity against every named target.
///
/// The full target list is iterated by id; the 2030/stretch convenience
/// fields come from id lookups, never from list positions.
#[must_use]
pub fn target_comparison(intensity: f64, targets: &[BenchmarkTarget]) -> TargetComparison {
    let statuses: Vec<TargetStatus> = targets
        .iter()
        .map(|target| TargetStatus {
            id: target.id.clone(),
            label_pt_br: target.label_pt_br.clone(),
            target_kgco2e_per_m2: target.target_kgco2e_per_m2,
            below_target: intensity < target.target_kgco2e_per_m2,
            distance_kg_per_m2: intensity - target.target_kgco2e_per_m2,
        })
        .collect();

    let threshold = |id: &str, fallback: f64| {
        targets
            .iter()
            .find(|t| t.id == id)
            .map_or(fallback, |t| t.target_kgco2e_per_m2)
    };
    let near_term = threshold(NEAR_TERM_TARGET_ID, DEFAULT_NEAR_TERM_TARGET);
    let stretch = threshold(STRETCH_TARGET_ID, DEFAULT_STRETCH_TARGET);

    TargetComparison {
        targets: statuses,
        below_2030_target: intensity < near_term,
        below_stretch_target: intensity < stretch,
        distance_to_2030_target: intensity - near_term,
        distance_to_stretch_target: intensity - stretch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distribution() -> Distribution {
        Distribution {
            p10: 180.0,
            p50: 300.0,
            p90: 500.0,
        }
    }

    #[test]
    fn zone_boundaries_are_lower_inclusive() {
        assert_eq!(
            percentile_position(179.0, &distribution()).zone,
            BenchmarkZone::VeryLow
        );
        assert_eq!(
            percentile_position(180.0, &distribution()).zone,
            BenchmarkZone::Low
        );
        assert_eq!(
            percentile_position(300.0, &distribution()).zone,
            BenchmarkZone::MediumHigh
        );
        assert_eq!(
            percentile_position(500.0, &distribution()).zone,
            BenchmarkZone::VeryHigh
        );
        assert_eq!(
            percentile_position(600.0, &distribution()).zone,
            BenchmarkZone::VeryHigh
        );
    }

    #[test]
    fn zone_carries_fixed_description() {
        assert_eq!(
            percentile_position(282.6, &distribution()).description_pt_br,
            "Baixo"
        );
    }

    fn targets() -> Vec<BenchmarkTarget> {
        vec![
            BenchmarkTarget {
                id: "near_term_target".to_string(),
                label_en: "Near-term target 2030".to_string(),
                label_pt_br: "Meta 2030".to_string(),
                target_kgco2e_per_m2: 250.0,
            },
            BenchmarkTarget {
                id: "stretch_target".to_string(),
                label_en: "Stretch target".to_string(),
                label_pt_br: "Meta ambiciosa".to_string(),
                target_kgco2e_per_m2: 200.0,
            },
        ]
    }

    #[test]
    fn baseline_intensity_misses_both_targets() {
        let comparison = target_comparison(282.6, &targets());
        assert!(!comparison.below_2030_target);
        assert!(!comparison.below_stretch_target);
        assert!((comparison.distance_to_2030_target - 32.6).abs() < 1e-9);
    }

    #[test]
    fn low_clinker_intensity_meets_the_near_term_target() {
        let comparison = target_comparison(230.0, &targets());
        assert!(comparison.below_2030_target);
        assert!(!comparison.below_stretch_target);
        assert!((comparison.distance_to_2030_target - (-20.0)).abs() < 1e-9);
    }

    #[test]
    fn every_target_in_the_list_is_evaluated() {
        let mut extended = targets();
        extended.push(BenchmarkTarget {
            id: "aspirational_target".to_string(),
            label_en: "Aspirational".to_string(),
            label_pt_br: "Aspiracional".to_string(),
            target_kgco2e_per_m2: 150.0,
        });
        let comparison = target_comparison(230.0, &extended);
        assert_eq!(comparison.targets.len(), 3);
        let aspirational = comparison
            .targets
            .iter()
            .find(|t| t.id == "aspirational_target")
            .unwrap();
        assert!(!aspirational.below_target);
        assert!((aspirational.distance_kg_per_m2 - 80.0).abs() < 1e-9);
    }
}
