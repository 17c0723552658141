//! Shared application state for the gateway server.

use agents::AssetManager;
use llm::LLM;
use std::sync::Arc;
use store::AssetStore;

/// Shared state available to all request handlers.
pub struct AppState<P: LLM + 'static> {
    /// The asset store (sole owner of the asset table).
    pub store: Arc<AssetStore>,
    /// The manager agent fronting the conversational surface.
    pub manager: Arc<AssetManager<P>>,
}

impl<P: LLM + 'static> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            manager: Arc::clone(&self.manager),
        }
    }
}
