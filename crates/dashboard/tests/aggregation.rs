use carbon_dashboard::{try_unified, unified_dashboard, BenchmarkZone, QualityLevel};
use carbon_store::CarbonContext;
use pretty_assertions::assert_eq;

fn context() -> CarbonContext {
    CarbonContext::load_default().unwrap()
}

#[test]
fn baseline_dashboard_reflects_stored_figures() {
    let dashboard = unified_dashboard(&context(), None).unwrap();

    assert_eq!(dashboard.active_scenario_id, "baseline_current_design");
    assert_eq!(dashboard.total_emissions_kg, 58_936.4);
    assert_eq!(dashboard.intensity_kg_per_m2, 282.6);
    assert_eq!(dashboard.reduction_percent, 0.0);
    assert_eq!(dashboard.percentile_position.zone, BenchmarkZone::Low);
    assert!(!dashboard.target_comparison.below_2030_target);
    assert!((dashboard.target_comparison.distance_to_2030_target - 32.6).abs() < 1e-9);
}

#[test]
fn low_clinker_dashboard_uses_stored_reduction() {
    let dashboard = unified_dashboard(&context(), Some("low_clinker_concrete")).unwrap();

    assert_eq!(dashboard.active_scenario_id, "low_clinker_concrete");
    assert_eq!(dashboard.intensity_kg_per_m2, 230.0);
    assert_eq!(dashboard.total_emissions_kg, 48_000.0);
    assert_eq!(dashboard.reduction_percent, 18.6);
    assert!(dashboard.target_comparison.below_2030_target);
    assert!((dashboard.target_comparison.distance_to_2030_target - (-20.0)).abs() < 1e-9);
}

#[test]
fn best_scenario_total_is_omitted_when_active_is_best() {
    let best = unified_dashboard(&context(), Some("lighter_slab_plus_window_optimization")).unwrap();
    assert!(best.best_scenario_emissions_kg.is_none());

    let baseline = unified_dashboard(&context(), None).unwrap();
    assert_eq!(baseline.best_scenario_emissions_kg, Some(43_500.0));
}

#[test]
fn unknown_scenario_falls_back_to_baseline() {
    let dashboard = unified_dashboard(&context(), Some("not_a_scenario")).unwrap();
    assert_eq!(dashboard.active_scenario_id, "baseline_current_design");
}

#[test]
fn operational_future_total_is_derived_from_grid_ratio() {
    let dashboard = unified_dashboard(&context(), None).unwrap();
    assert_eq!(dashboard.operational_lifetime_kg, 182_500.0);
    assert!((dashboard.operational_future_kg - 36_500.0).abs() < 1e-9);
}

#[test]
fn embodied_total_comes_from_the_baseline_category_sum() {
    let dashboard = unified_dashboard(&context(), Some("low_clinker_concrete")).unwrap();
    // The embodied split always reports the baseline inventory total, not the
    // active scenario total.
    assert_eq!(dashboard.embodied_total_kg, 58_936.4);
}

#[test]
fn quality_summary_scores_the_fixture_high() {
    let dashboard = unified_dashboard(&context(), None).unwrap();
    assert_eq!(dashboard.data_quality.overall_coverage, 95);
    assert_eq!(dashboard.data_quality.quality_level, QualityLevel::High);
    assert_eq!(dashboard.known_gaps.len(), 3);
}

#[test]
fn missing_store_surfaces_as_absence_not_error() {
    assert!(try_unified(None, None).unwrap().is_none());

    let ctx = context();
    let dashboard = try_unified(Some(&ctx), None).unwrap();
    assert!(dashboard.is_some());
}

#[test]
fn breakdown_covers_every_category() {
    let dashboard = unified_dashboard(&context(), None).unwrap();
    let ids: Vec<&str> = dashboard
        .breakdown_by_category
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(
        ids,
        [
            "structural_concrete",
            "glazing",
            "doors",
            "other_finishes_and_services"
        ]
    );
}
