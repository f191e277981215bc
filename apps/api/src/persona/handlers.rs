use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::persona::extractor::scrape_persona;
use crate::persona::models::Persona;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PersonaRequest {
    pub url: String,
    pub description: String,
}

/// POST /persona
///
/// Scrapes the page and returns the inferred persona. Scrape and LLM failures
/// produce a placeholder persona rather than an error.
pub async fn handle_create_persona(
    State(state): State<AppState>,
    Json(request): Json<PersonaRequest>,
) -> Result<Json<Persona>, AppError> {
    let url = request.url.trim();
    if url.is_empty() {
        return Err(AppError::Validation("url cannot be empty".to_string()));
    }

    let persona =
        scrape_persona(&state.scraper, state.llm.as_ref(), url, &request.description).await;
    Ok(Json(persona))
}
