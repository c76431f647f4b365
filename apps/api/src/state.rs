use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionModel;

/// Shared application state injected into all route handlers via Axum
/// extractors. The pipeline itself is stateless; this only carries the
/// model client and configuration.
#[derive(Clone)]
pub struct AppState {
    pub llm: Arc<dyn CompletionModel>,
    pub config: Config,
}
