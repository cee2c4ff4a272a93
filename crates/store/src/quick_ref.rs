//! Flattened quick-reference view of the context.
//!
//! The answering engine reaches for these fields on the most common
//! questions (totals, concrete volumes, factors, scenario summaries) instead
//! of navigating the full structured document. The view is derived on demand
//! from the structured sections and is never stored, so it cannot drift from
//! the data the dashboard aggregates.

use crate::model::CarbonContext;
use crate::units::kg_to_tonnes;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct QuickRef {
    pub total_embodied_kgco2e: f64,
    pub total_embodied_tco2e: f64,
    pub intensity_kgco2e_per_m2: f64,
    pub concrete_total_m3: f64,
    pub concrete_walls_m3: f64,
    pub concrete_slabs_m3: f64,
    pub floor_areas: Vec<FloorAreaRef>,
    pub material_contributions: Vec<MaterialContribution>,
    pub emission_factors: Vec<FactorRef>,
    pub scenarios: Vec<ScenarioRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FloorAreaRef {
    pub storey: String,
    pub net_floor_area_m2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct MaterialContribution {
    pub category_id: String,
    pub name_pt_br: String,
    pub share_of_total_percent: f64,
    pub embodied_kgco2e: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub quantity_unit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FactorRef {
    pub material_id: String,
    pub name_pt_br: String,
    pub kgco2e: f64,
    pub unit: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioRef {
    pub id: String,
    pub label_pt_br: String,
    pub intensity_kgco2e_per_m2: f64,
    pub total_kgco2e: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_vs_baseline_percent: Option<f64>,
}

impl QuickRef {
    #[must_use]
    pub fn derive(context: &CarbonContext) -> Self {
        let baseline = &context.carbon_baseline;
        let structure = &context.geometry_aggregates.structure;

        Self {
            total_embodied_kgco2e: baseline.total_embodied_kgco2e,
            total_embodied_tco2e: kg_to_tonnes(baseline.total_embodied_kgco2e),
            intensity_kgco2e_per_m2: baseline.intensity_kgco2e_per_m2,
            concrete_total_m3: structure.wall_net_volume_m3 + structure.slab_net_volume_m3,
            concrete_walls_m3: structure.wall_net_volume_m3,
            concrete_slabs_m3: structure.slab_net_volume_m3,
            floor_areas: context
                .project_summary
                .floor_area_by_storey
                .iter()
                .map(|storey| FloorAreaRef {
                    storey: storey.name_pt_br.clone(),
                    net_floor_area_m2: storey.net_floor_area_m2,
                })
                .collect(),
            material_contributions: baseline
                .by_category
                .iter()
                .map(|category| MaterialContribution {
                    category_id: category.id.clone(),
                    name_pt_br: category.name_pt_br.clone(),
                    share_of_total_percent: category.share_of_total_percent,
                    embodied_kgco2e: category.embodied_kgco2e,
                    quantity: category.quantity.value(),
                    quantity_unit: category.quantity.unit_label().to_string(),
                })
                .collect(),
            emission_factors: context
                .material_factors
                .materials
                .iter()
                .map(|material| FactorRef {
                    material_id: material.id.clone(),
                    name_pt_br: material.name_pt_br.clone(),
                    kgco2e: material.factor.value(),
                    unit: material.factor.unit_label().to_string(),
                })
                .collect(),
            scenarios: context
                .scenarios
                .scenarios
                .iter()
                .map(|scenario| ScenarioRef {
                    id: scenario.id.clone(),
                    label_pt_br: scenario.label_pt_br.clone(),
                    intensity_kgco2e_per_m2: scenario.intensity_kgco2e_per_m2,
                    total_kgco2e: scenario.total_kgco2e,
                    reduction_vs_baseline_percent: scenario.reduction_vs_baseline_percent,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derives_concrete_totals_from_structure_aggregates() {
        let context = CarbonContext::load_default().unwrap();
        let quick_ref = QuickRef::derive(&context);
        assert_eq!(quick_ref.concrete_walls_m3, 54.481);
        assert_eq!(quick_ref.concrete_slabs_m3, 76.992);
        assert!((quick_ref.concrete_total_m3 - 131.473).abs() < 1e-9);
    }

    #[test]
    fn tonne_total_is_display_conversion_of_kg_total() {
        let context = CarbonContext::load_default().unwrap();
        let quick_ref = QuickRef::derive(&context);
        assert_eq!(quick_ref.total_embodied_kgco2e, 58_936.4);
        assert!((quick_ref.total_embodied_tco2e - 58.9364).abs() < 1e-9);
    }

    #[test]
    fn lists_every_scenario_and_factor() {
        let context = CarbonContext::load_default().unwrap();
        let quick_ref = QuickRef::derive(&context);
        assert_eq!(quick_ref.scenarios.len(), 3);
        assert_eq!(quick_ref.emission_factors.len(), 5);
        assert_eq!(quick_ref.floor_areas.len(), 2);
    }
}
