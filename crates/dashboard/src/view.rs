//! Dashboard view-model types.
//!
//! Everything here is a derived, request-scoped value: recomputed on each
//! call from the resolved scenario set, never cached, never written back to
//! the store. Mass fields are kgCO2e; presentation layers convert to tonnes
//! for display.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct UnifiedDashboard {
    pub project_name: String,
    pub typology: String,
    pub active_scenario_id: String,
    pub available_scenarios: Vec<ScenarioSummary>,

    pub total_emissions_kg: f64,
    pub intensity_kg_per_m2: f64,

    pub baseline_emissions_kg: f64,
    pub active_scenario_emissions_kg: f64,
    /// Absent when the best scenario is the active one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_scenario_emissions_kg: Option<f64>,
    pub reduction_percent: f64,

    pub breakdown_by_category: Vec<CategoryBreakdown>,

    pub percentile_position: PercentilePosition,
    pub target_comparison: TargetComparison,

    pub data_quality: DataQualitySummary,

    pub embodied_total_kg: f64,
    pub operational_lifetime_kg: f64,
    pub operational_future_kg: f64,

    pub known_gaps: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSummary {
    pub id: String,
    pub label_pt_br: String,
    pub intensity_kgco2e_per_m2: f64,
    pub total_kgco2e: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_vs_baseline_percent: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub changes_summary_pt_br: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub id: String,
    pub name_pt_br: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub quantity_unit: String,
    pub emissions_kg: f64,
    pub share_percent: f64,
    pub coverage_percent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction_suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkZone {
    VeryLow,
    Low,
    MediumHigh,
    VeryHigh,
}

#[derive(Debug, Clone, Serialize)]
pub struct PercentilePosition {
    pub zone: BenchmarkZone,
    pub description_pt_br: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetStatus {
    pub id: String,
    pub label_pt_br: String,
    pub target_kgco2e_per_m2: f64,
    pub below_target: bool,
    /// `active - target`; negative means under target.
    pub distance_kg_per_m2: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct TargetComparison {
    pub targets: Vec<TargetStatus>,
    pub below_2030_target: bool,
    pub below_stretch_target: bool,
    pub distance_to_2030_target: f64,
    pub distance_to_stretch_target: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize)]
pub struct DataQualitySummary {
    /// Rounded arithmetic mean of the three domain coverages, 0-100.
    pub overall_coverage: u32,
    pub structural_coverage: f64,
    pub envelope_coverage: f64,
    pub finishes_coverage: f64,
    pub quality_level: QualityLevel,
}
