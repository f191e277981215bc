//! Best-effort coercion of a model reply into a `Persona`.
//!
//! The model is asked for a fixed JSON shape but routinely deviates: nulls instead of
//! lists, comma-separated strings instead of arrays, bare strings where objects were
//! requested. Nothing here fails; anything unusable becomes an empty value.

use serde_json::Value;
use tracing::warn;

use crate::llm_client::parse_json_reply;
use crate::persona::models::{Persona, SocialProof};

/// Parses a (possibly fenced) model reply into a persona.
pub fn normalize_persona(reply: &str) -> Persona {
    let value = parse_json_reply::<Value>(reply).unwrap_or_else(|e| {
        warn!("Persona reply was not valid JSON: {e}");
        Value::Null
    });
    persona_from_value(&value)
}

/// Builds a persona from whatever JSON the model produced. Non-objects yield the placeholder.
pub fn persona_from_value(value: &Value) -> Persona {
    Persona {
        name: Some(String::new()),
        email: Some(String::new()),
        title: extract_string(value.get("title")),
        company: extract_string(value.get("company")),
        pain_points: ensure_list(value.get("pain_points")),
        social_proof: social_proof_list(value.get("social_proof")),
        cost_of_inaction: ensure_list(value.get("cost_of_inaction")),
        solutions: ensure_list(value.get("solutions")),
        objections: ensure_list(value.get("objections")),
        competitive_advantages: ensure_list(value.get("competitive_advantages")),
        ..Persona::default()
    }
}

/// Coerces a list field: arrays keep their scalar items, strings split on commas.
pub fn ensure_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(String::from)
            .collect(),
        _ => Vec::new(),
    }
}

/// Accepts `{statement, source}` objects and bare strings; skips anything else.
pub fn social_proof_list(value: Option<&Value>) -> Vec<SocialProof> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(fields) => Some(SocialProof {
                statement: fields
                    .get("statement")
                    .and_then(scalar_text)
                    .unwrap_or_default(),
                source: fields
                    .get("source")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            }),
            Value::String(s) => Some(SocialProof::unattributed(s.as_str())),
            _ => None,
        })
        .collect()
}

/// A trimmed, non-empty string, taking the first element when the model sent a list.
pub fn extract_string(value: Option<&Value>) -> Option<String> {
    let candidate = match value? {
        Value::Array(items) => items.first()?,
        other => other,
    };
    candidate
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
