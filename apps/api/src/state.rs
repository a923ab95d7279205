use std::sync::Arc;

use crate::llm_client::CompletionProvider;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Rate-limited Gemini client in production; a stub in tests.
    pub llm: Arc<dyn CompletionProvider>,
}
