//! Keyword question classifier.
//!
//! Maps free-text questions (PT-BR in the observed domain, with a few
//! English aliases) onto a closed set of topic tags via case-insensitive
//! substring matching. Classification is a pure function of the input
//! string: no state, same input, same tag.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionTopic {
    EmissionsByCategory,
    MaterialQuantity,
    EmissionFactors,
    TotalCarbon,
    LowClinkerScenario,
    ScenarioComparison,
    ReductionStrategies,
    EmissionsByFloor,
    ExecutiveSummary,
    General,
}

impl QuestionTopic {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EmissionsByCategory => "emissions_by_category",
            Self::MaterialQuantity => "material_quantity",
            Self::EmissionFactors => "emission_factors",
            Self::TotalCarbon => "total_carbon",
            Self::LowClinkerScenario => "scenario_low_clinker",
            Self::ScenarioComparison => "scenario_comparison",
            Self::ReductionStrategies => "reduction_strategies",
            Self::EmissionsByFloor => "emissions_by_floor",
            Self::ExecutiveSummary => "executive_summary",
            Self::General => "general",
        }
    }
}

/// Ordered rule table; the first matching rule wins.
///
/// Order is load-bearing: the low-clinker scenario vocabulary ("baixo
/// clínquer", "trocar concreto") must be checked before the generic
/// reduction-strategies vocabulary ("redução", "alternativas"), and "redução
/// total" before the bare "redução". Tests assert the priority.
const RULES: &[(&[&str], QuestionTopic)] = &[
    (
        &[
            "materiais mais contribuem",
            "emissões por categoria",
            "contribuem para as emissões",
        ],
        QuestionTopic::EmissionsByCategory,
    ),
    (
        &[
            "concreto estrutural",
            "quanto concreto",
            "quantidade de concreto",
            "quantidade de material",
        ],
        QuestionTopic::MaterialQuantity,
    ),
    (
        &[
            "fatores de emissão",
            "emission factors",
            "fatores foram usados",
        ],
        QuestionTopic::EmissionFactors,
    ),
    (
        &[
            "redução total",
            "total carbono",
            "total de carbono",
            "total de emissões",
        ],
        QuestionTopic::TotalCarbon,
    ),
    (
        &[
            "trocar concreto",
            "baixo carbono",
            "low-clinker",
            "baixo clínquer",
        ],
        QuestionTopic::LowClinkerScenario,
    ),
    (
        &[
            "comparar cenários",
            "comparação de cenários",
            "qual cenário",
        ],
        QuestionTopic::ScenarioComparison,
    ),
    (
        &["alternativas", "reduzir emissões", "estratégias", "redução"],
        QuestionTopic::ReductionStrategies,
    ),
    (
        &["por pavimento", "por andar", "distribuem as emissões"],
        QuestionTopic::EmissionsByFloor,
    ),
    (
        &["resumo executivo", "relatório executivo"],
        QuestionTopic::ExecutiveSummary,
    ),
];

/// Classify a question into a topic tag. Falls back to
/// [`QuestionTopic::General`] when no rule matches.
#[must_use]
pub fn classify(message: &str) -> QuestionTopic {
    let lowered = message.to_lowercase();
    for (needles, topic) in RULES {
        if needles.iter().any(|needle| lowered.contains(needle)) {
            return *topic;
        }
    }
    QuestionTopic::General
}
