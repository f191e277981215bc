// Outreach: ideas, email copy and LinkedIn copy generated from a persona.
// All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod models;
pub mod prompts;
