//! The dashboard and the chat prompt must quote identical numbers for the
//! same scenario selection.

use carbon_chat::{ChatService, StubEngine};
use carbon_dashboard::unified_dashboard;
use carbon_protocol::ChatRequest;
use carbon_store::CarbonContext;
use std::sync::Arc;

#[tokio::test]
async fn dashboard_and_prompt_agree_on_scenario_figures() {
    let context = Arc::new(CarbonContext::load_default().unwrap());

    let dashboard = unified_dashboard(&context, Some("low_clinker_concrete")).unwrap();
    assert_eq!(dashboard.intensity_kg_per_m2, 230.0);
    assert_eq!(dashboard.total_emissions_kg, 48_000.0);
    assert_eq!(dashboard.reduction_percent, 18.6);

    let service = ChatService::new(context, Arc::new(StubEngine::echo()));
    let mut request = ChatRequest::new("Qual o total de carbono do cenário atual?");
    request.active_scenario_id = Some("low_clinker_concrete".to_string());
    let prompt = service.handle(&request).await.unwrap().reply;

    // The prompt embeds exactly the figures the dashboard reports.
    assert!(prompt.contains(&format!(
        "- Intensity: {} kgCO2e/m²",
        dashboard.intensity_kg_per_m2
    )));
    assert!(prompt.contains(&format!("- Total: {} kgCO2e", dashboard.total_emissions_kg)));
    assert!(prompt.contains(&format!(
        "- Reduction: {}% vs baseline",
        dashboard.reduction_percent
    )));
}

#[tokio::test]
async fn unknown_scenario_falls_back_identically_on_both_surfaces() {
    let context = Arc::new(CarbonContext::load_default().unwrap());

    let dashboard = unified_dashboard(&context, Some("missing")).unwrap();
    assert_eq!(dashboard.active_scenario_id, "baseline_current_design");

    let service = ChatService::new(context, Arc::new(StubEngine::echo()));
    let mut request = ChatRequest::new("Qual o total de carbono?");
    request.active_scenario_id = Some("missing".to_string());
    let prompt = service.handle(&request).await.unwrap().reply;

    assert!(prompt.contains("- Name: Projeto atual (referência)"));
    assert!(prompt.contains(&format!(
        "- Intensity: {} kgCO2e/m²",
        dashboard.intensity_kg_per_m2
    )));
}
