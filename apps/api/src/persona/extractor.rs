//! Persona pipeline: scrape → prompt → LLM → normalize.
//!
//! Every step degrades instead of failing: an unreachable page becomes empty content,
//! an LLM error becomes the placeholder persona.

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::llm_client::TextGenerator;
use crate::persona::models::Persona;
use crate::persona::normalize::{normalize_persona, persona_from_value};
use crate::persona::prompts::persona_prompt;
use crate::scraper::PageScraper;

/// Asks the model for a persona grounded in `web_content` and `description`.
pub async fn build_persona(
    llm: &dyn TextGenerator,
    web_content: &str,
    description: &str,
) -> Persona {
    let prompt = persona_prompt(web_content, description);
    match llm.generate(&prompt).await {
        Ok(reply) => {
            debug!("Persona reply: {} chars", reply.len());
            normalize_persona(&reply)
        }
        Err(e) => {
            warn!("Error calling LLM for persona: {e}");
            persona_from_value(&Value::Null)
        }
    }
}

/// Scrapes `url` and builds a persona from its text plus the caller's description.
pub async fn scrape_persona(
    scraper: &PageScraper,
    llm: &dyn TextGenerator,
    url: &str,
    description: &str,
) -> Persona {
    info!("Building persona from {url}");
    let web_content = scraper.scrape_or_empty(url).await;
    build_persona(llm, &web_content, description).await
}
