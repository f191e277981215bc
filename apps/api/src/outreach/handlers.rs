//! Axum route handlers for outreach generation.
//!
//! Generation never fails a request; persistence does.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::db::{find_document, insert_document, CAMPAIGNS_COLLECTION, IDEAS_COLLECTION};
use crate::errors::AppError;
use crate::models::document::DocumentRow;
use crate::outreach::generator::{clamp_count, generate_campaign_content, generate_ideas};
use crate::outreach::models::{
    CampaignDetails, CampaignDocument, CampaignRequest, CampaignResponse, IdeasDocument,
    IdeasOutput,
};
use crate::persona::models::Persona;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CountQuery {
    pub count: Option<u32>,
}

/// POST /ideas
pub async fn handle_generate_ideas(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
    Json(persona): Json<Persona>,
) -> Result<Json<IdeasOutput>, AppError> {
    let count = clamp_count(query.count);
    let output = generate_ideas(state.llm.as_ref(), &persona, count).await;

    let stored = insert_document(
        &state.db,
        IDEAS_COLLECTION,
        &IdeasDocument {
            persona: &persona,
            ideas: &output.ideas,
        },
    )
    .await?;
    info!("Stored {} ideas as {}", output.ideas.len(), stored.id);

    Ok(Json(output))
}

/// POST /create_campaign
pub async fn handle_create_campaign(
    State(state): State<AppState>,
    Query(query): Query<CountQuery>,
    Json(request): Json<CampaignRequest>,
) -> Result<Json<CampaignResponse>, AppError> {
    let count = clamp_count(query.count);
    let channel = request.outreach_channel;
    let generated_content =
        generate_campaign_content(state.llm.as_ref(), &request.persona, channel, count).await;

    let stored = insert_document(
        &state.db,
        CAMPAIGNS_COLLECTION,
        &CampaignDocument {
            persona: &request.persona,
            outreach_channel: channel,
            generated_content: &generated_content,
        },
    )
    .await?;
    info!("Created {channel} campaign {}", stored.id);

    Ok(Json(CampaignResponse {
        message: "Campaign created successfully".to_string(),
        campaign_details: CampaignDetails {
            campaign_id: stored.id,
            persona_id: request.persona.id.clone(),
            outreach_channel: channel,
            message_count: generated_content.message_count(),
            created_at: stored.created_at,
        },
        generated_content,
    }))
}

/// GET /campaigns/:id
pub async fn handle_get_campaign(
    State(state): State<AppState>,
    Path(campaign_id): Path<Uuid>,
) -> Result<Json<DocumentRow>, AppError> {
    let document = find_document(&state.db, CAMPAIGNS_COLLECTION, campaign_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Campaign {campaign_id} not found")))?;
    Ok(Json(document))
}
