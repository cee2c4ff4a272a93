//! Context loading and integrity validation.
//!
//! The store is populated exactly once, at process start, and is read-only
//! afterwards (load-then-freeze). Any conforming JSON document can be loaded
//! through [`CarbonContext::from_json_str`]; the embedded fixture backs
//! [`CarbonContext::load_default`]. Validation failures are
//! configuration-class errors and must abort startup, never degrade silently.

use crate::error::{Result, StoreError};
use crate::model::CarbonContext;
use std::collections::HashSet;

const FIXTURE: &str = include_str!("../data/ac20_fzk_haus.json");

/// Tolerance for the category-share sum invariant (shares should add up to
/// 100% up to rounding).
const SHARE_SUM_TOLERANCE_PERCENT: f64 = 0.1;

/// Tolerance between the stored total and the per-category sum, in kgCO2e.
const EMBODIED_SUM_TOLERANCE_KGCO2E: f64 = 0.5;

/// Tolerance between a scenario's stored reduction percent and the value
/// recomputed from the scenario totals.
const REDUCTION_DRIFT_TOLERANCE_PERCENT: f64 = 0.1;

impl CarbonContext {
    /// Load the embedded AC20-FZK-Haus fixture.
    pub fn load_default() -> Result<Self> {
        Self::from_json_str(FIXTURE)
    }

    /// Parse and validate a context document.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let context: Self = serde_json::from_str(raw)?;
        context.validate()?;
        log::info!(
            "Carbon context loaded: project '{}', {} scenarios, {} categories",
            context.project_summary.id,
            context.scenarios.scenarios.len(),
            context.carbon_baseline.by_category.len()
        );
        Ok(context)
    }

    /// Integrity checks over the loaded document. Every failure here means
    /// the dataset is corrupt or incomplete, not that a user did anything
    /// wrong.
    pub fn validate(&self) -> Result<()> {
        self.validate_scenarios()?;
        self.validate_baseline_categories()?;
        self.validate_benchmarks()?;
        self.validate_strategies()?;
        self.validate_coverage()?;
        Ok(())
    }

    fn validate_scenarios(&self) -> Result<()> {
        let set = &self.scenarios;

        let mut seen = HashSet::new();
        for scenario in &set.scenarios {
            if !seen.insert(scenario.id.as_str()) {
                return Err(integrity(format!(
                    "duplicate scenario id '{}'",
                    scenario.id
                )));
            }
        }

        let baseline = set
            .scenarios
            .iter()
            .find(|s| s.id == set.baseline_id)
            .ok_or_else(|| {
                integrity(format!(
                    "baseline_id '{}' not present among scenarios {:?}",
                    set.baseline_id,
                    set.scenarios.iter().map(|s| &s.id).collect::<Vec<_>>()
                ))
            })?;

        if let Some(reduction) = baseline.reduction_vs_baseline_percent {
            if reduction.abs() > f64::EPSILON {
                return Err(integrity(format!(
                    "baseline scenario '{}' claims a {reduction}% reduction vs itself",
                    baseline.id
                )));
            }
        }

        // Stored reduction percentages were computed upstream from the
        // scenario totals; re-derive them and reject drift.
        for scenario in &set.scenarios {
            let Some(stored) = scenario.reduction_vs_baseline_percent else {
                continue;
            };
            if scenario.id == set.baseline_id {
                continue;
            }
            let computed = scenario.total_reduction_percent_vs(baseline);
            if (stored - computed).abs() > REDUCTION_DRIFT_TOLERANCE_PERCENT {
                return Err(integrity(format!(
                    "scenario '{}': stored reduction {stored}% drifts from computed {computed:.2}%",
                    scenario.id
                )));
            }
        }

        for scenario in &set.scenarios {
            for swap in &scenario.changed_materials {
                for material_id in [&swap.from_material_id, &swap.to_material_id] {
                    if self.material(material_id).is_none() {
                        return Err(integrity(format!(
                            "scenario '{}' references unknown material '{material_id}'",
                            scenario.id
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    fn validate_baseline_categories(&self) -> Result<()> {
        let baseline = &self.carbon_baseline;

        let share_sum: f64 = baseline
            .by_category
            .iter()
            .map(|c| c.share_of_total_percent)
            .sum();
        if (share_sum - 100.0).abs() > SHARE_SUM_TOLERANCE_PERCENT {
            return Err(integrity(format!(
                "category shares sum to {share_sum}%, expected 100%"
            )));
        }

        let embodied_sum: f64 = baseline.by_category.iter().map(|c| c.embodied_kgco2e).sum();
        if (embodied_sum - baseline.total_embodied_kgco2e).abs() > EMBODIED_SUM_TOLERANCE_KGCO2E {
            return Err(integrity(format!(
                "per-category embodied sum {embodied_sum} kgCO2e does not match total {} kgCO2e",
                baseline.total_embodied_kgco2e
            )));
        }

        for category in &baseline.by_category {
            if let Some(material_id) = &category.material_id {
                if self.material(material_id).is_none() {
                    return Err(integrity(format!(
                        "category '{}' references unknown material '{material_id}'",
                        category.id
                    )));
                }
            }
        }

        Ok(())
    }

    fn validate_benchmarks(&self) -> Result<()> {
        let dist = &self.benchmarks.distribution;
        if !(dist.p10 <= dist.p50 && dist.p50 <= dist.p90) {
            return Err(integrity(format!(
                "benchmark distribution is not ordered: p10={}, p50={}, p90={}",
                dist.p10, dist.p50, dist.p90
            )));
        }
        Ok(())
    }

    fn validate_strategies(&self) -> Result<()> {
        for strategy in &self.reduction_strategies.for_single_family_residential {
            let range = strategy.typical_reduction_range_percent;
            if range.low() > range.high() {
                return Err(integrity(format!(
                    "strategy '{}' has inverted reduction range [{}, {}]",
                    strategy.id,
                    range.low(),
                    range.high()
                )));
            }
        }
        Ok(())
    }

    fn validate_coverage(&self) -> Result<()> {
        let coverage = self.data_quality.coverage;
        for (label, value) in [
            (
                "structural",
                coverage.share_of_structural_volume_with_factors_percent,
            ),
            (
                "envelope",
                coverage.share_of_envelope_area_with_factors_percent,
            ),
            (
                "mass",
                coverage.share_of_total_building_mass_with_factors_percent,
            ),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(integrity(format!(
                    "{label} coverage {value}% is outside [0, 100]"
                )));
            }
        }
        Ok(())
    }
}

fn integrity(message: String) -> StoreError {
    log::error!("Context integrity check failed: {message}");
    StoreError::Integrity(message)
}
