//! Coverage-weighted data-quality scoring.

use crate::view::{DataQualitySummary, QualityLevel};
use carbon_store::Coverage;

const HIGH_QUALITY_THRESHOLD_PERCENT: u32 = 90;
const MEDIUM_QUALITY_THRESHOLD_PERCENT: u32 = 70;

/// Overall coverage is the rounded arithmetic mean of the three domain
/// coverages; the quality label applies fixed thresholds to it.
#[must_use]
pub fn data_quality_summary(coverage: &Coverage) -> DataQualitySummary {
    let structural = coverage.share_of_structural_volume_with_factors_percent;
    let envelope = coverage.share_of_envelope_area_with_factors_percent;
    let finishes = coverage.share_of_total_building_mass_with_factors_percent;

    let overall = ((structural + envelope + finishes) / 3.0).round() as u32;

    let quality_level = if overall >= HIGH_QUALITY_THRESHOLD_PERCENT {
        QualityLevel::High
    } else if overall >= MEDIUM_QUALITY_THRESHOLD_PERCENT {
        QualityLevel::Medium
    } else {
        QualityLevel::Low
    };

    DataQualitySummary {
        overall_coverage: overall,
        structural_coverage: structural,
        envelope_coverage: envelope,
        finishes_coverage: finishes,
        quality_level,
    }
}
