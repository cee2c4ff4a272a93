//! Scenario resolution.
//!
//! Both the dashboard aggregator and the chat prompt assembler derive their
//! numbers from the same [`ResolvedScenarios`] value, so what the user sees
//! on screen and what the answering engine is told can never diverge.

use crate::error::{Result, StoreError};
use crate::model::{CarbonContext, Scenario};

/// Output of a scenario resolution: the active selection, the baseline used
/// for comparison math, and the lowest-intensity scenario. Owned values, not
/// lazy references into the store.
#[derive(Debug, Clone)]
pub struct ResolvedScenarios {
    pub active: Scenario,
    pub baseline: Scenario,
    pub best: Scenario,
}

impl ResolvedScenarios {
    /// Reduction of the active scenario versus the baseline. Prefers the
    /// stored figure; falls back to the intensity-derived value (checked
    /// against the stored one at load time).
    #[must_use]
    pub fn reduction_percent(&self) -> f64 {
        self.active
            .reduction_vs_baseline_percent
            .unwrap_or_else(|| self.active.intensity_reduction_percent_vs(&self.baseline))
    }
}

/// Resolve the active, baseline and best scenarios.
///
/// An unknown or absent `requested` id falls back to the baseline. A missing
/// baseline id is a configuration error: the store is corrupt, and the
/// failure carries the full scenario list for diagnostics.
pub fn resolve_scenarios(
    context: &CarbonContext,
    requested: Option<&str>,
) -> Result<ResolvedScenarios> {
    let set = &context.scenarios;
    let find = |id: &str| set.scenarios.iter().find(|s| s.id == id);

    let baseline = find(&set.baseline_id).ok_or_else(|| StoreError::UnknownScenario {
        requested: requested.unwrap_or(&set.baseline_id).to_string(),
        known: set.scenarios.iter().map(|s| s.id.clone()).collect(),
    })?;

    let active = match requested {
        Some(id) => match find(id) {
            Some(scenario) => scenario,
            None => {
                log::debug!("unknown scenario '{id}', falling back to baseline '{}'", baseline.id);
                baseline
            }
        },
        None => baseline,
    };

    // Lowest intensity wins; ties keep the earlier entry.
    let best = set
        .scenarios
        .iter()
        .reduce(|best, current| {
            if current.intensity_kgco2e_per_m2 < best.intensity_kgco2e_per_m2 {
                current
            } else {
                best
            }
        })
        .unwrap_or(baseline);

    Ok(ResolvedScenarios {
        active: active.clone(),
        baseline: baseline.clone(),
        best: best.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn context() -> CarbonContext {
        CarbonContext::load_default().unwrap()
    }

    #[test]
    fn resolves_requested_scenario() {
        let resolved = resolve_scenarios(&context(), Some("low_clinker_concrete")).unwrap();
        assert_eq!(resolved.active.id, "low_clinker_concrete");
        assert_eq!(resolved.baseline.id, "baseline_current_design");
    }

    #[test]
    fn unknown_id_falls_back_to_baseline() {
        let resolved = resolve_scenarios(&context(), Some("does_not_exist")).unwrap();
        assert_eq!(resolved.active.id, "baseline_current_design");
    }

    #[test]
    fn absent_id_resolves_baseline() {
        let resolved = resolve_scenarios(&context(), None).unwrap();
        assert_eq!(resolved.active.id, "baseline_current_design");
    }

    #[test]
    fn best_scenario_has_minimum_intensity() {
        let resolved = resolve_scenarios(&context(), None).unwrap();
        assert_eq!(resolved.best.id, "lighter_slab_plus_window_optimization");
        assert_eq!(resolved.best.intensity_kgco2e_per_m2, 210.0);
    }

    #[test]
    fn missing_baseline_is_a_configuration_error() {
        let mut ctx = context();
        ctx.scenarios.baseline_id = "gone".to_string();
        let err = resolve_scenarios(&ctx, Some("also_gone")).unwrap_err();
        match err {
            StoreError::UnknownScenario { known, .. } => assert_eq!(known.len(), 3),
            other => panic!("expected UnknownScenario, got {other:?}"),
        }
    }

    #[test]
    fn reduction_percent_prefers_stored_value() {
        let resolved = resolve_scenarios(&context(), Some("low_clinker_concrete")).unwrap();
        assert_eq!(resolved.reduction_percent(), 18.6);
    }

    #[test]
    fn reduction_percent_falls_back_to_intensity_derivation() {
        let mut ctx = context();
        for scenario in &mut ctx.scenarios.scenarios {
            scenario.reduction_vs_baseline_percent = None;
        }
        let resolved = resolve_scenarios(&ctx, Some("low_clinker_concrete")).unwrap();
        let expected = (282.6 - 230.0) / 282.6 * 100.0;
        assert!((resolved.reduction_percent() - expected).abs() < 1e-9);
    }
}
