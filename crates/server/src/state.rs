use carbon_chat::{AnsweringEngine, ChatService};
use carbon_store::CarbonContext;
use std::sync::Arc;

/// Shared request state. The context store is loaded once before the
/// listener starts and read by every request without locking; the chat
/// service owns the engine handle.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CarbonContext>,
    pub chat: Arc<ChatService>,
    pub debug_routes: bool,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: Arc<CarbonContext>,
        engine: Arc<dyn AnsweringEngine>,
        debug_routes: bool,
    ) -> Self {
        let chat = Arc::new(ChatService::new(store.clone(), engine));
        Self {
            store,
            chat,
            debug_routes,
        }
    }
}
