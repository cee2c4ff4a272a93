//! Chat orchestration: validate → resolve → classify → slice → assemble →
//! generate.

use crate::classifier::classify;
use crate::engine::{AnsweringEngine, EngineError};
use crate::error::{ChatError, Result};
use crate::prompt::{assemble_prompt, PromptInputs};
use crate::slicer::context_slice;
use carbon_protocol::{ChatRequest, ChatReply};
use carbon_store::{resolve_scenarios, CarbonContext};
use std::sync::Arc;

pub struct ChatService {
    context: Arc<CarbonContext>,
    engine: Arc<dyn AnsweringEngine>,
}

impl ChatService {
    #[must_use]
    pub fn new(context: Arc<CarbonContext>, engine: Arc<dyn AnsweringEngine>) -> Self {
        Self { context, engine }
    }

    /// Drive one chat request end to end. The caller translates errors into
    /// a structured reply; nothing here is swallowed.
    pub async fn handle(&self, request: &ChatRequest) -> Result<ChatReply> {
        let message = request.message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }

        let resolved =
            resolve_scenarios(&self.context, request.active_scenario_id.as_deref())?;
        let topic = classify(message);
        log::info!(
            "chat request: topic={}, scenario={}, message_chars={}",
            topic.as_str(),
            resolved.active.id,
            message.len()
        );

        let slice = context_slice(&self.context, topic, &resolved, request.debug);
        let prompt = assemble_prompt(&PromptInputs {
            topic,
            slice: &slice,
            resolved: &resolved,
            category_hint: request.category_id.as_deref(),
            message,
        });
        log::debug!("assembled prompt: {} chars", prompt.len());

        let reply = self.generate_with_retry(&prompt).await?;
        Ok(ChatReply::new(reply))
    }

    /// At most one fresh attempt after a transient failure; never more.
    async fn generate_with_retry(&self, prompt: &str) -> std::result::Result<String, EngineError> {
        match self.engine.generate(prompt).await {
            Err(err) if err.is_transient() => {
                log::warn!("engine call failed transiently, retrying once: {err}");
                self.engine.generate(prompt).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StubEngine;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn service_with(engine: Arc<dyn AnsweringEngine>) -> ChatService {
        let context = Arc::new(CarbonContext::load_default().unwrap());
        ChatService::new(context, engine)
    }

    #[tokio::test]
    async fn empty_message_is_rejected_before_any_work() {
        let service = service_with(Arc::new(StubEngine::with_reply("nunca")));
        let err = service
            .handle(&ChatRequest::new("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::EmptyMessage));
    }

    #[tokio::test]
    async fn reply_passes_through_verbatim() {
        let service = service_with(Arc::new(StubEngine::with_reply("**78.1%** do total")));
        let reply = service
            .handle(&ChatRequest::new("Quais materiais mais contribuem?"))
            .await
            .unwrap();
        assert_eq!(reply.reply, "**78.1%** do total");
    }

    struct FlakyEngine {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnsweringEngine for FlakyEngine {
        async fn generate(&self, _prompt: &str) -> std::result::Result<String, EngineError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(EngineError::Transient("rate limited".to_string()))
            } else {
                Ok("segunda tentativa".to_string())
            }
        }
    }

    #[tokio::test]
    async fn transient_failure_is_retried_exactly_once() {
        let engine = Arc::new(FlakyEngine {
            calls: AtomicUsize::new(0),
        });
        let service = service_with(engine.clone());
        let reply = service
            .handle(&ChatRequest::new("Qual o total de carbono?"))
            .await
            .unwrap();
        assert_eq!(reply.reply, "segunda tentativa");
        assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
    }

    struct AlwaysDown;

    #[async_trait]
    impl AnsweringEngine for AlwaysDown {
        async fn generate(&self, _prompt: &str) -> std::result::Result<String, EngineError> {
            Err(EngineError::Transient("down".to_string()))
        }
    }

    #[tokio::test]
    async fn persistent_failure_surfaces_as_engine_error() {
        let service = service_with(Arc::new(AlwaysDown));
        let err = service
            .handle(&ChatRequest::new("Qual o total?"))
            .await
            .unwrap_err();
        assert!(matches!(err, ChatError::Engine(EngineError::Transient(_))));
    }

    #[tokio::test]
    async fn fatal_engine_error_is_not_retried() {
        struct FatalOnce {
            calls: AtomicUsize,
        }

        #[async_trait]
        impl AnsweringEngine for FatalOnce {
            async fn generate(&self, _prompt: &str) -> std::result::Result<String, EngineError> {
                self.calls.fetch_add(1, Ordering::SeqCst);
                Err(EngineError::Fatal("bad key".to_string()))
            }
        }

        let engine = Arc::new(FatalOnce {
            calls: AtomicUsize::new(0),
        });
        let service = service_with(engine.clone());
        let err = service.handle(&ChatRequest::new("oi")).await.unwrap_err();
        assert!(matches!(err, ChatError::Engine(EngineError::Fatal(_))));
        assert_eq!(engine.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn prompt_scenario_values_match_the_dashboard() {
        // The echo engine returns the assembled prompt, so the test can
        // assert the chat surface embeds exactly the values the dashboard
        // aggregator reports for the same scenario.
        let service = service_with(Arc::new(StubEngine::echo()));
        let mut request = ChatRequest::new("Qual o total de carbono?");
        request.active_scenario_id = Some("low_clinker_concrete".to_string());
        let reply = service.handle(&request).await.unwrap();

        assert!(reply.reply.contains("- Intensity: 230 kgCO2e/m²"));
        assert!(reply.reply.contains("- Total: 48000 kgCO2e"));
        assert!(reply.reply.contains("- Reduction: 18.6% vs baseline"));
    }
}
