//! Category breakdown with coverage and strategy recommendations.

use crate::view::CategoryBreakdown;
use carbon_store::{CarbonCategory, Coverage, ReductionStrategy};

const STRUCTURAL_CATEGORY_ID: &str = "structural_concrete";
const ENVELOPE_CATEGORY_IDS: &[&str] = &["glazing", "doors"];
const LUMPED_CATEGORY_ID: &str = "other_finishes_and_services";

/// Coverage assumed for categories the quality metrics don't describe.
const DEFAULT_CATEGORY_COVERAGE_PERCENT: f64 = 50.0;

pub fn category_breakdown(
    categories: &[CarbonCategory],
    coverage: &Coverage,
    strategies: &[ReductionStrategy],
) -> Vec<CategoryBreakdown> {
    categories
        .iter()
        .map(|category| CategoryBreakdown {
            id: category.id.clone(),
            name_pt_br: category.name_pt_br.clone(),
            quantity: category.quantity.value(),
            quantity_unit: category.quantity.unit_label().to_string(),
            emissions_kg: category.embodied_kgco2e,
            share_percent: category.share_of_total_percent,
            coverage_percent: category_coverage(category, coverage),
            reduction_suggestion: recommendation_for(category, strategies),
        })
        .collect()
}

/// Coverage by category kind: structural categories read the structural
/// figure, envelope categories (glazing, doors) the envelope figure, the
/// lumped catch-all the building-mass figure. Anything else gets a
/// conservative default.
fn category_coverage(category: &CarbonCategory, coverage: &Coverage) -> f64 {
    match category.id.as_str() {
        STRUCTURAL_CATEGORY_ID => coverage.share_of_structural_volume_with_factors_percent,
        id if ENVELOPE_CATEGORY_IDS.contains(&id) => {
            coverage.share_of_envelope_area_with_factors_percent
        }
        LUMPED_CATEGORY_ID => coverage.share_of_total_building_mass_with_factors_percent,
        _ => DEFAULT_CATEGORY_COVERAGE_PERCENT,
    }
}

/// First strategy whose applicability lists the category (by category id or
/// by the category's material id), rendered as a one-line suggestion.
fn recommendation_for(
    category: &CarbonCategory,
    strategies: &[ReductionStrategy],
) -> Option<String> {
    strategies
        .iter()
        .find(|strategy| strategy.applies_to(category))
        .map(|strategy| {
            let range = strategy.typical_reduction_range_percent;
            format!(
                "{} (redução de {}-{}%)",
                strategy.name_pt_br,
                range.low(),
                range.high()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use carbon_store::CarbonContext;
    use pretty_assertions::assert_eq;

    #[test]
    fn structural_category_gets_structural_coverage_and_concrete_strategy() {
        let context = CarbonContext::load_default().unwrap();
        let breakdown = category_breakdown(
            &context.carbon_baseline.by_category,
            &context.data_quality.coverage,
            &context.reduction_strategies.for_single_family_residential,
        );

        let concrete = breakdown
            .iter()
            .find(|c| c.id == "structural_concrete")
            .unwrap();
        assert_eq!(concrete.coverage_percent, 100.0);
        assert_eq!(
            concrete.reduction_suggestion.as_deref(),
            Some("Otimizar o uso de concreto estrutural (redução de 10-30%)")
        );
    }

    #[test]
    fn envelope_categories_share_the_envelope_coverage() {
        let context = CarbonContext::load_default().unwrap();
        let breakdown = category_breakdown(
            &context.carbon_baseline.by_category,
            &context.data_quality.coverage,
            &context.reduction_strategies.for_single_family_residential,
        );

        for id in ["glazing", "doors"] {
            let category = breakdown.iter().find(|c| c.id == id).unwrap();
            assert_eq!(category.coverage_percent, 95.0, "category {id}");
        }
    }

    #[test]
    fn lumped_category_has_no_recommendation() {
        let context = CarbonContext::load_default().unwrap();
        let breakdown = category_breakdown(
            &context.carbon_baseline.by_category,
            &context.data_quality.coverage,
            &context.reduction_strategies.for_single_family_residential,
        );

        let lumped = breakdown
            .iter()
            .find(|c| c.id == "other_finishes_and_services")
            .unwrap();
        assert_eq!(lumped.coverage_percent, 90.0);
        assert!(lumped.reduction_suggestion.is_none());
        assert!(lumped.quantity.is_none());
        assert_eq!(lumped.quantity_unit, "N/A");
    }
}
