// Persona extraction: scraped page + description → structured sales-target profile.

pub mod extractor;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod prompts;
