//! Prompt assembly for the answering engine.
//!
//! Concatenates the topic-scoped data slice, the resolved active-scenario
//! block, an optional category-focus directive, the literal user question,
//! topic-specific answering instructions and the fixed general rules into a
//! single prompt string. Assembly is pure and idempotent: same inputs, same
//! string.

use crate::classifier::QuestionTopic;
use carbon_store::ResolvedScenarios;
use serde_json::Value;
use std::fmt::Write;

pub struct PromptInputs<'a> {
    pub topic: QuestionTopic,
    pub slice: &'a Value,
    pub resolved: &'a ResolvedScenarios,
    /// Free-form category hint, emitted verbatim. Unknown ids are not
    /// rejected here; the answering engine reports them as unknown.
    pub category_hint: Option<&'a str>,
    pub message: &'a str,
}

#[must_use]
pub fn assemble_prompt(inputs: &PromptInputs<'_>) -> String {
    let mut prompt = String::new();

    let slice_json = carbon_protocol::serialize_json_pretty(inputs.slice)
        .unwrap_or_else(|_| inputs.slice.to_string());

    let _ = writeln!(prompt, "RELEVANT DATA FOR THIS QUESTION:");
    let _ = writeln!(prompt, "{slice_json}");
    let _ = writeln!(prompt);

    let active = &inputs.resolved.active;
    let _ = writeln!(prompt, "ACTIVE SCENARIO:");
    let _ = writeln!(prompt, "- Name: {}", active.label_pt_br);
    let _ = writeln!(
        prompt,
        "- Intensity: {} kgCO2e/m²",
        active.intensity_kgco2e_per_m2
    );
    let _ = writeln!(prompt, "- Total: {} kgCO2e", active.total_kgco2e);
    if active.id != inputs.resolved.baseline.id {
        let _ = writeln!(
            prompt,
            "- Reduction: {}% vs baseline",
            inputs.resolved.reduction_percent()
        );
    }
    let _ = writeln!(prompt);

    if let Some(hint) = inputs.category_hint {
        let _ = writeln!(
            prompt,
            "CATEGORY FOCUS: Answer specifically about category \"{hint}\" from carbon_baseline.by_category."
        );
        let _ = writeln!(prompt);
    }

    let _ = writeln!(prompt, "User Question: {}", inputs.message);
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "ANSWERING INSTRUCTIONS:");
    let _ = writeln!(prompt, "{}", topic_instructions(inputs.topic));
    let _ = writeln!(prompt);

    let _ = writeln!(prompt, "GENERAL RULES:");
    for (index, rule) in GENERAL_RULES.iter().enumerate() {
        let _ = writeln!(prompt, "{}. {rule}", index + 1);
    }

    prompt
}

/// Topic-specific guidance: which fields to privilege and how to phrase the
/// answer.
#[must_use]
fn topic_instructions(topic: QuestionTopic) -> &'static str {
    match topic {
        QuestionTopic::EmissionsByCategory => {
            "Use quick_ref.material_contributions or carbon_baseline.by_category. \
             List each category with percent, kgCO2e, and quantity. Use name_pt_br fields."
        }
        QuestionTopic::MaterialQuantity => {
            "Use quick_ref.concrete_total_m3 for the total volume, broken down into \
             walls (concrete_walls_m3) and slabs (concrete_slabs_m3)."
        }
        QuestionTopic::EmissionFactors => {
            "List every emission factor with its unit (kgCO2e/m³ or kgCO2e/m²). \
             Use name_pt_br fields for material names."
        }
        QuestionTopic::TotalCarbon => {
            "Use quick_ref.total_embodied_kgco2e or active_scenario.total_kgco2e. \
             Convert to tCO2e for display (divide by 1000). When the user asks about \
             the current scenario, use the ACTIVE SCENARIO values above."
        }
        QuestionTopic::LowClinkerScenario => {
            "Use the low_clinker_concrete entry in scenarios. Show its \
             reduction_vs_baseline_percent and new intensity, compared against the baseline."
        }
        QuestionTopic::ScenarioComparison => {
            "Compare the scenarios by intensity, total and reduction percent; mention \
             which targets each scenario meets."
        }
        QuestionTopic::ReductionStrategies => {
            "Use reduction_strategies.for_single_family_residential. List every strategy \
             with its typical_reduction_range_percent and main caveats. Use name_pt_br fields."
        }
        QuestionTopic::EmissionsByFloor => {
            "Estimate emissions per floor as floor_area × intensity, using \
             project_summary.floor_area_by_storey. State that the split is area-proportional."
        }
        QuestionTopic::ExecutiveSummary => {
            "Write a short executive summary: total and intensity, benchmark position, \
             main category contributions, best scenario and data quality."
        }
        QuestionTopic::General => {
            "Use any relevant section from the data above. Check quick_ref first for \
             common figures."
        }
    }
}

/// Fixed rules appended to every prompt.
const GENERAL_RULES: &[&str] = &[
    "Respond in Portuguese (PT-BR); use name_pt_br / label_pt_br fields for names.",
    "Always cite exact numbers from the data above (e.g. \"78.1%\", \"131.473 m³\", \"282.6 kgCO2e/m²\").",
    "Never invent values that are not present in the data above.",
    "Never claim the data is missing without first checking every section provided above.",
    "Never attempt to re-derive numbers from raw geometry; that data is deliberately withheld. Use the precomputed aggregates.",
    "Format with Markdown and bold the key metrics.",
];
