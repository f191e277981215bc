//! Outreach generation: ideas and channel copy derived from a persona.
//!
//! Like the persona pipeline, nothing here fails: an LLM or parse error is logged and
//! the caller gets an empty list.

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::llm_client::{parse_json_reply, TextGenerator};
use crate::outreach::models::{GeneratedContent, IdeasOutput, MessageOutput, OutreachChannel};
use crate::outreach::prompts::{
    email_content_prompt, idea_generation_prompt, linkedin_content_prompt,
};
use crate::persona::models::Persona;

pub const DEFAULT_COUNT: u32 = 3;
pub const MAX_COUNT: u32 = 10;

/// Applies the default and bounds to a caller-supplied item count.
pub fn clamp_count(requested: Option<u32>) -> u32 {
    requested.unwrap_or(DEFAULT_COUNT).clamp(1, MAX_COUNT)
}

pub async fn generate_ideas(llm: &dyn TextGenerator, persona: &Persona, count: u32) -> IdeasOutput {
    let prompt = idea_generation_prompt(count, persona);
    let output: IdeasOutput = request_json(llm, &prompt, "ideas").await;
    info!("Generated {} outreach ideas", output.ideas.len());
    output
}

pub async fn generate_email_content(
    llm: &dyn TextGenerator,
    persona: &Persona,
    count: u32,
) -> MessageOutput {
    let prompt = email_content_prompt(count, persona);
    request_json(llm, &prompt, "emails").await
}

pub async fn generate_linkedin_content(
    llm: &dyn TextGenerator,
    persona: &Persona,
    count: u32,
) -> MessageOutput {
    let prompt = linkedin_content_prompt(count, persona);
    let mut output: MessageOutput = request_json(llm, &prompt, "LinkedIn").await;
    for message in &mut output.messages {
        message.subject = None;
    }
    output
}

/// Generates the copy for `channel`. `UseBoth` runs the two channel requests concurrently.
pub async fn generate_campaign_content(
    llm: &dyn TextGenerator,
    persona: &Persona,
    channel: OutreachChannel,
    count: u32,
) -> GeneratedContent {
    match channel {
        OutreachChannel::Email => {
            GeneratedContent::Single(generate_email_content(llm, persona, count).await.messages)
        }
        OutreachChannel::Linkedin => {
            GeneratedContent::Single(generate_linkedin_content(llm, persona, count).await.messages)
        }
        OutreachChannel::UseBoth => {
            let (email, linkedin) = tokio::join!(
                generate_email_content(llm, persona, count),
                generate_linkedin_content(llm, persona, count)
            );
            GeneratedContent::Both {
                email: email.messages,
                linkedin: linkedin.messages,
            }
        }
    }
}

async fn request_json<T: DeserializeOwned + Default>(
    llm: &dyn TextGenerator,
    prompt: &str,
    what: &str,
) -> T {
    match llm.generate(prompt).await {
        Ok(reply) => parse_json_reply(&reply).unwrap_or_else(|e| {
            warn!("Could not parse {what} reply: {e}");
            T::default()
        }),
        Err(e) => {
            warn!("Error calling LLM for {what}: {e}");
            T::default()
        }
    }
}
