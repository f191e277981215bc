use serde::{Deserialize, Deserializer, Serialize};

/// Id carried by every persona built from a scrape.
pub const SCRAPED_PERSONA_ID: &str = "scraped_lead";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialProof {
    pub statement: String,
    #[serde(default)]
    pub source: Option<String>,
}

impl SocialProof {
    pub fn unattributed(statement: impl Into<String>) -> Self {
        Self {
            statement: statement.into(),
            source: None,
        }
    }
}

/// Profile of a sales target. Every field may be omitted on input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    #[serde(default = "default_persona_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pain_points: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub social_proof: Vec<SocialProof>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cost_of_inaction: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub solutions: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub objections: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub competitive_advantages: Vec<String>,
}

impl Default for Persona {
    fn default() -> Self {
        Self {
            id: default_persona_id(),
            name: None,
            title: None,
            company: None,
            email: None,
            pain_points: Vec::new(),
            social_proof: Vec::new(),
            cost_of_inaction: Vec::new(),
            solutions: Vec::new(),
            objections: Vec::new(),
            competitive_advantages: Vec::new(),
        }
    }
}

fn default_persona_id() -> String {
    SCRAPED_PERSONA_ID.to_string()
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}
