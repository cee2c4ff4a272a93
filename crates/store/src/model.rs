//! Data model for the carbon context store.
//!
//! Every type here is read-only after load. Internal keys stay in English
//! with explicit unit suffixes; user-facing strings carry `_pt_br` variants
//! alongside `_en`. Mass is always stored in kgCO2e — tonne values exist only
//! in derived display fields.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of the structured dataset handed to the dashboard aggregator and the
/// chat context slicer. Loaded once at process start, then frozen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonContext {
    pub project_summary: ProjectSummary,
    pub geometry_aggregates: GeometryAggregates,
    pub material_factors: MaterialFactors,
    pub carbon_baseline: CarbonBaseline,
    pub assumptions: Assumptions,
    pub benchmarks: Benchmarks,
    pub scenarios: ScenarioSet,
    pub reduction_strategies: ReductionStrategies,
    pub data_quality: DataQuality,
    pub operational_carbon: OperationalCarbon,
    pub ifc_writeback: IfcWriteback,
    /// Raw IFC export, kept opaque. The core never interprets it, and it is
    /// withheld from every context slice except the debug-gated catch-all.
    pub ifc_data: serde_json::Value,
}

impl CarbonContext {
    #[must_use]
    pub fn material(&self, id: &str) -> Option<&MaterialFactor> {
        self.material_factors.materials.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn category(&self, id: &str) -> Option<&CarbonCategory> {
        self.carbon_baseline.by_category.iter().find(|c| c.id == id)
    }
}

// Project summary

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub name_pt_br: String,
    pub description_en: String,
    pub description_pt_br: String,
    pub usage_type_en: String,
    pub usage_type_pt_br: String,
    pub storeys_above_ground: u32,
    pub gross_floor_area_m2: f64,
    pub net_floor_area_m2: f64,
    pub floor_area_by_storey: Vec<StoreyArea>,
    pub element_counts: BTreeMap<String, u32>,
    pub units: UnitsBlock,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreyArea {
    pub storey_id: String,
    pub name_en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_de: Option<String>,
    pub name_pt_br: String,
    pub elevation_m: f64,
    pub net_floor_area_m2: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitsBlock {
    pub length: String,
    pub area: String,
    pub volume: String,
    pub mass: String,
    pub emissions: String,
}

// Geometry aggregates

/// Derived-at-authoring-time totals. Glazing ratios are stored, not
/// recomputed from the area fields; upstream is the source of truth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryAggregates {
    pub envelope: EnvelopeAggregates,
    pub structure: StructureAggregates,
    pub spaces: SpaceAggregates,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeAggregates {
    pub wall_net_side_area_m2: f64,
    pub wall_gross_side_area_m2: f64,
    pub window_area_m2: f64,
    pub door_area_m2: f64,
    pub envelope_area_m2: f64,
    pub glazing_ratio_windows_only: f64,
    pub glazing_plus_doors_ratio: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureAggregates {
    pub wall_net_volume_m3: f64,
    pub wall_gross_volume_m3: f64,
    pub slab_net_area_m2: f64,
    pub slab_net_volume_m3: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpaceAggregates {
    pub count_spaces: u32,
    pub gross_floor_area_m2: f64,
    pub net_floor_area_m2: f64,
    pub average_clear_height_m: f64,
}

// Material factors

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialFactors {
    pub unit_emissions: String,
    pub materials: Vec<MaterialFactor>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialFactor {
    pub id: String,
    pub name_en: String,
    pub name_pt_br: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub typical_use: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_per_m3: Option<f64>,
    pub factor: EmissionFactor,
}

/// Emission factor basis. Exactly one basis applies per material; consumers
/// branch on the variant instead of probing optional fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", content = "kgco2e", rename_all = "snake_case")]
pub enum EmissionFactor {
    PerM3(f64),
    PerM2(f64),
}

impl EmissionFactor {
    #[must_use]
    pub fn value(&self) -> f64 {
        match self {
            Self::PerM3(v) | Self::PerM2(v) => *v,
        }
    }

    #[must_use]
    pub fn unit_label(&self) -> &'static str {
        match self {
            Self::PerM3(_) => "kgCO2e/m³",
            Self::PerM2(_) => "kgCO2e/m²",
        }
    }
}

// Carbon baseline

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonBaseline {
    pub scope: String,
    pub scope_description_en: String,
    pub total_embodied_kgco2e: f64,
    pub intensity_kgco2e_per_m2: f64,
    pub reference_floor_area_m2: f64,
    pub by_category: Vec<CarbonCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarbonCategory {
    pub id: String,
    pub name_en: String,
    pub name_pt_br: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id: Option<String>,
    pub quantity: Quantity,
    pub embodied_kgco2e: f64,
    pub share_of_total_percent: f64,
}

/// Category quantity. A category is measured by volume or by area; lumped
/// allowance categories have no physical quantity at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum Quantity {
    M3(f64),
    M2(f64),
    Lumped,
}

impl Quantity {
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::M3(v) | Self::M2(v) => Some(*v),
            Self::Lumped => None,
        }
    }

    #[must_use]
    pub fn unit_label(&self) -> &'static str {
        match self {
            Self::M3(_) => "m³",
            Self::M2(_) => "m²",
            Self::Lumped => "N/A",
        }
    }
}

// Assumptions

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assumptions {
    pub scope: ScopeAssumptions,
    pub data_quality: AssumptionNotes,
    pub modelling_rules: ModellingRules,
    pub llm_guidelines: LlmGuidelines,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeAssumptions {
    pub modules_included: Vec<String>,
    pub modules_excluded: Vec<String>,
    pub text_en: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssumptionNotes {
    pub status: String,
    pub notes_en: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModellingRules {
    pub treat_wall_net_side_area_as_external_wall_area: bool,
    pub treat_slab_net_volume_as_structural_concrete_volume: bool,
    pub use_project_gross_floor_area_for_intensity: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmGuidelines {
    pub never_invent_new_numeric_values: bool,
    pub what_if_instructions_en: String,
    pub language_preference_en: String,
}

// Benchmarks

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Benchmarks {
    pub methodology_reference: MethodologyReference,
    pub building_type: String,
    pub region: String,
    pub metric: String,
    pub distribution: Distribution,
    pub targets: Vec<BenchmarkTarget>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodologyReference {
    pub sources: Vec<BenchmarkSource>,
    pub notes_en: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkSource {
    pub id: String,
    pub name: String,
    pub url: String,
}

/// Percentile distribution for the intensity metric. Invariant (checked at
/// load): `p10 <= p50 <= p90`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Distribution {
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkTarget {
    pub id: String,
    pub label_en: String,
    pub label_pt_br: String,
    pub target_kgco2e_per_m2: f64,
}

// Scenarios

/// All scenarios are precomputed and static; the "active scenario" is a
/// selection, never a mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSet {
    pub baseline_id: String,
    pub scenarios: Vec<Scenario>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub label_en: String,
    pub label_pt_br: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description_pt_br: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changed_materials: Vec<MaterialSwap>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes_summary_en: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes_summary_pt_br: Vec<String>,
    pub intensity_kgco2e_per_m2: f64,
    pub total_kgco2e: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction_vs_baseline_percent: Option<f64>,
}

impl Scenario {
    /// Reduction versus a baseline, from the intensity figures.
    #[must_use]
    pub fn intensity_reduction_percent_vs(&self, baseline: &Scenario) -> f64 {
        (baseline.intensity_kgco2e_per_m2 - self.intensity_kgco2e_per_m2)
            / baseline.intensity_kgco2e_per_m2
            * 100.0
    }

    /// Reduction versus a baseline, from the total figures. This is how the
    /// stored `reduction_vs_baseline_percent` values were produced upstream.
    #[must_use]
    pub fn total_reduction_percent_vs(&self, baseline: &Scenario) -> f64 {
        (baseline.total_kgco2e - self.total_kgco2e) / baseline.total_kgco2e * 100.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialSwap {
    pub from_material_id: String,
    pub to_material_id: String,
    pub factor_change_percent: f64,
}

// Reduction strategies

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionStrategies {
    pub for_single_family_residential: Vec<ReductionStrategy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReductionStrategy {
    pub id: String,
    pub name_en: String,
    pub name_pt_br: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applies_to_categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applies_to_materials: Vec<String>,
    pub typical_reduction_range_percent: ReductionRange,
    pub evidence_summary_en: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub caveats_en: Vec<String>,
}

impl ReductionStrategy {
    /// Does this strategy apply to the given category (by category id or by
    /// the category's material id)?
    #[must_use]
    pub fn applies_to(&self, category: &CarbonCategory) -> bool {
        if self.applies_to_categories.iter().any(|c| *c == category.id) {
            return true;
        }
        category
            .material_id
            .as_ref()
            .is_some_and(|mat| self.applies_to_materials.iter().any(|m| m == mat))
    }
}

/// Typical reduction range in percent, serialized as `[low, high]`.
/// Invariant (checked at load): `low <= high`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReductionRange(pub f64, pub f64);

impl ReductionRange {
    #[must_use]
    pub fn low(&self) -> f64 {
        self.0
    }

    #[must_use]
    pub fn high(&self) -> f64 {
        self.1
    }
}

// Data quality

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataQuality {
    pub coverage: Coverage,
    pub sources: LcaSources,
    pub classification: ClassificationNotes,
    pub known_gaps_en: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub known_gaps_pt_br: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coverage {
    pub share_of_structural_volume_with_factors_percent: f64,
    pub share_of_envelope_area_with_factors_percent: f64,
    pub share_of_total_building_mass_with_factors_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LcaSources {
    pub lca_database_name: String,
    pub lca_database_region: String,
    pub lca_database_year: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationNotes {
    pub system: String,
    pub notes_en: String,
}

// Operational carbon

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationalCarbon {
    pub assumed_lifetime_years: u32,
    pub reference_energy_use_intensity_kwh_per_m2_per_year: f64,
    pub grid_intensity_kgco2e_per_kwh_current: f64,
    pub grid_intensity_kgco2e_per_kwh_2050: f64,
    pub total_operational_kgco2e_lifetime_current_grid: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes_en: Vec<String>,
}

impl OperationalCarbon {
    /// Lifetime operational total under the decarbonized grid. Always
    /// derived from the current-grid total and the grid intensity ratio,
    /// never stored, so the two figures cannot drift apart.
    #[must_use]
    pub fn lifetime_total_future_grid_kgco2e(&self) -> f64 {
        self.total_operational_kgco2e_lifetime_current_grid
            * (self.grid_intensity_kgco2e_per_kwh_2050 / self.grid_intensity_kgco2e_per_kwh_current)
    }
}

// IFC write-back mapping (descriptive only; consumed by the export collaborator)

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IfcWriteback {
    pub target_property_set_name: String,
    pub fields: Vec<WritebackField>,
    pub notes_en: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritebackField {
    pub ifc_property_name: String,
    pub from_context_path: String,
    pub description_en: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emission_factor_serializes_tagged() {
        let factor = EmissionFactor::PerM3(350.0);
        let raw = serde_json::to_string(&factor).unwrap();
        assert_eq!(raw, r#"{"basis":"per_m3","kgco2e":350.0}"#);
        let back: EmissionFactor = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, factor);
    }

    #[test]
    fn lumped_quantity_has_no_value() {
        let quantity: Quantity = serde_json::from_str(r#"{"unit":"lumped"}"#).unwrap();
        assert_eq!(quantity, Quantity::Lumped);
        assert!(quantity.value().is_none());
        assert_eq!(quantity.unit_label(), "N/A");
    }

    #[test]
    fn future_grid_total_scales_by_intensity_ratio() {
        let operational = OperationalCarbon {
            assumed_lifetime_years: 50,
            reference_energy_use_intensity_kwh_per_m2_per_year: 70.0,
            grid_intensity_kgco2e_per_kwh_current: 0.25,
            grid_intensity_kgco2e_per_kwh_2050: 0.05,
            total_operational_kgco2e_lifetime_current_grid: 182_500.0,
            notes_en: Vec::new(),
        };
        let future = operational.lifetime_total_future_grid_kgco2e();
        assert!((future - 36_500.0).abs() < 1e-9);
    }
}
