use std::sync::Arc;

use sqlx::PgPool;

use crate::llm_client::TextGenerator;
use crate::scraper::PageScraper;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Model backend. `LlmClient` in production, swappable for tests.
    pub llm: Arc<dyn TextGenerator>,
    pub scraper: PageScraper,
}
