//! Dashboard data aggregator.
//!
//! Consumes the carbon context store and the scenario resolver output and
//! produces a single unified view-model for presentation layers. Everything
//! is recomputed per call from the resolved scenario set — the active
//! scenario changes with user interaction, so nothing is cached.
//!
//! The chat layer embeds the same resolved scenario values in its prompts,
//! which is what keeps the dashboard and the assistant numerically
//! consistent.

pub mod benchmark;
pub mod breakdown;
pub mod quality;
pub mod view;

pub use view::*;

use carbon_store::{resolve_scenarios, CarbonContext, Result};

/// Build the unified dashboard view-model for the requested scenario.
///
/// Hard failures (corrupt store, missing baseline) surface as errors; an
/// unknown requested id silently falls back to the baseline, mirroring the
/// scenario resolver.
pub fn unified_dashboard(
    context: &CarbonContext,
    requested_scenario: Option<&str>,
) -> Result<UnifiedDashboard> {
    let resolved = resolve_scenarios(context, requested_scenario)?;
    let active = &resolved.active;
    let operational = &context.operational_carbon;
    log::debug!(
        "building dashboard view-model for scenario '{}'",
        active.id
    );

    let quality = quality::data_quality_summary(&context.data_quality.coverage);

    let known_gaps = if context.data_quality.known_gaps_pt_br.is_empty() {
        context.data_quality.known_gaps_en.clone()
    } else {
        context.data_quality.known_gaps_pt_br.clone()
    };

    Ok(UnifiedDashboard {
        project_name: context.project_summary.name_pt_br.clone(),
        typology: context.project_summary.usage_type_pt_br.clone(),
        active_scenario_id: active.id.clone(),
        available_scenarios: context
            .scenarios
            .scenarios
            .iter()
            .map(|scenario| ScenarioSummary {
                id: scenario.id.clone(),
                label_pt_br: scenario.label_pt_br.clone(),
                intensity_kgco2e_per_m2: scenario.intensity_kgco2e_per_m2,
                total_kgco2e: scenario.total_kgco2e,
                reduction_vs_baseline_percent: scenario.reduction_vs_baseline_percent,
                changes_summary_pt_br: scenario.changes_summary_pt_br.clone(),
            })
            .collect(),

        total_emissions_kg: active.total_kgco2e,
        intensity_kg_per_m2: active.intensity_kgco2e_per_m2,

        baseline_emissions_kg: resolved.baseline.total_kgco2e,
        active_scenario_emissions_kg: active.total_kgco2e,
        best_scenario_emissions_kg: (resolved.best.id != active.id)
            .then_some(resolved.best.total_kgco2e),
        reduction_percent: resolved.reduction_percent(),

        breakdown_by_category: breakdown::category_breakdown(
            &context.carbon_baseline.by_category,
            &context.data_quality.coverage,
            &context.reduction_strategies.for_single_family_residential,
        ),

        percentile_position: benchmark::percentile_position(
            active.intensity_kgco2e_per_m2,
            &context.benchmarks.distribution,
        ),
        target_comparison: benchmark::target_comparison(
            active.intensity_kgco2e_per_m2,
            &context.benchmarks.targets,
        ),

        data_quality: quality,

        embodied_total_kg: context.carbon_baseline.total_embodied_kgco2e,
        operational_lifetime_kg: operational.total_operational_kgco2e_lifetime_current_grid,
        operational_future_kg: operational.lifetime_total_future_grid_kgco2e(),

        known_gaps,
    })
}

/// Not-ready-aware wrapper: `None` store means the context has not finished
/// loading, surfaced as an absence so presentation layers can show a loading
/// state instead of an error.
pub fn try_unified(
    context: Option<&CarbonContext>,
    requested_scenario: Option<&str>,
) -> Result<Option<UnifiedDashboard>> {
    match context {
        Some(ctx) => unified_dashboard(ctx, requested_scenario).map(Some),
        None => Ok(None),
    }
}
