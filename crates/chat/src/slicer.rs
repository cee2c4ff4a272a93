//! Topic-scoped context slicing.
//!
//! Each topic maps to a fixed, minimal set of store subtrees — enough to
//! answer that question category and nothing more. Bounding the slice keeps
//! the answering-engine payload small and steers it toward the precomputed
//! aggregates instead of raw low-level data. The raw IFC fixture and the
//! write-back mapping are withheld from every slice unless the catch-all
//! topic runs with the debug flag set.

use crate::classifier::QuestionTopic;
use carbon_store::{CarbonContext, QuickRef, ResolvedScenarios};
use serde_json::{json, Value};

/// Select the context subtrees for a topic, as a serializable JSON document.
#[must_use]
pub fn context_slice(
    context: &CarbonContext,
    topic: QuestionTopic,
    resolved: &ResolvedScenarios,
    debug: bool,
) -> Value {
    let quick_ref = QuickRef::derive(context);

    match topic {
        QuestionTopic::EmissionsByCategory => json!({
            "quick_ref": {
                "material_contributions": &quick_ref.material_contributions,
                "total_embodied_kgco2e": quick_ref.total_embodied_kgco2e,
            },
            "carbon_baseline": {
                "by_category": &context.carbon_baseline.by_category,
            },
        }),
        QuestionTopic::MaterialQuantity => json!({
            "quick_ref": {
                "concrete_total_m3": quick_ref.concrete_total_m3,
                "concrete_walls_m3": quick_ref.concrete_walls_m3,
                "concrete_slabs_m3": quick_ref.concrete_slabs_m3,
            },
            "geometry_aggregates": {
                "structure": &context.geometry_aggregates.structure,
            },
        }),
        QuestionTopic::EmissionFactors => json!({
            "quick_ref": {
                "emission_factors": &quick_ref.emission_factors,
            },
            "material_factors": {
                "materials": &context.material_factors.materials,
            },
        }),
        QuestionTopic::TotalCarbon => json!({
            "quick_ref": {
                "total_embodied_kgco2e": quick_ref.total_embodied_kgco2e,
                "total_embodied_tco2e": quick_ref.total_embodied_tco2e,
                "intensity_kgco2e_per_m2": quick_ref.intensity_kgco2e_per_m2,
            },
            "active_scenario": &resolved.active,
        }),
        QuestionTopic::LowClinkerScenario => json!({
            "quick_ref": {
                "scenarios": &quick_ref.scenarios,
            },
            "scenarios": {
                "scenarios": &context.scenarios.scenarios,
            },
        }),
        QuestionTopic::ScenarioComparison => json!({
            "quick_ref": {
                "scenarios": &quick_ref.scenarios,
            },
            "scenarios": &context.scenarios,
            "benchmarks": {
                "targets": &context.benchmarks.targets,
            },
        }),
        QuestionTopic::ReductionStrategies => json!({
            "reduction_strategies": &context.reduction_strategies,
        }),
        QuestionTopic::EmissionsByFloor => json!({
            "quick_ref": {
                "floor_areas": &quick_ref.floor_areas,
                "intensity_kgco2e_per_m2": quick_ref.intensity_kgco2e_per_m2,
            },
            "project_summary": {
                "floor_area_by_storey": &context.project_summary.floor_area_by_storey,
            },
        }),
        QuestionTopic::ExecutiveSummary => json!({
            "project_summary": &context.project_summary,
            "quick_ref": &quick_ref,
            "carbon_baseline": &context.carbon_baseline,
            "benchmarks": &context.benchmarks,
            "scenarios": &context.scenarios,
            "data_quality": &context.data_quality,
        }),
        QuestionTopic::General => general_slice(context, resolved, &quick_ref, debug),
    }
}

/// Broad-but-bounded catch-all: every aggregate section, plus the raw IFC
/// fixture and the write-back mapping only under the debug flag.
fn general_slice(
    context: &CarbonContext,
    resolved: &ResolvedScenarios,
    quick_ref: &QuickRef,
    debug: bool,
) -> Value {
    let mut slice = json!({
        "quick_ref": quick_ref,
        "project_summary": &context.project_summary,
        "geometry_aggregates": &context.geometry_aggregates,
        "material_factors": &context.material_factors,
        "carbon_baseline": &context.carbon_baseline,
        "assumptions": &context.assumptions,
        "benchmarks": &context.benchmarks,
        "scenarios": &context.scenarios,
        "reduction_strategies": &context.reduction_strategies,
        "data_quality": &context.data_quality,
        "operational_carbon": &context.operational_carbon,
        "active_scenario": &resolved.active,
        "active_scenario_id": &resolved.active.id,
    });

    if debug {
        let map = slice.as_object_mut().expect("general slice is an object");
        map.insert("ifc_data".to_string(), context.ifc_data.clone());
        map.insert("ifc_writeback".to_string(), json!(&context.ifc_writeback));
    }

    slice
}
