use std::sync::Arc;

use sqlx::PgPool;
use tokio::sync::RwLock;

use crate::config::Config;
use crate::interview::registry::SessionRegistry;
use crate::llm_client::LlmClient;
use crate::search_client::SearchClient;
use crate::support::log::SupportLog;

/// Shared application state injected into all route handlers via Axum
/// extractors. The registries hold the process-local conversation state;
/// their locks are never held across a backend call.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub search: SearchClient,
    pub config: Config,
    pub interviews: Arc<RwLock<SessionRegistry>>,
    pub support: Arc<RwLock<SupportLog>>,
}
