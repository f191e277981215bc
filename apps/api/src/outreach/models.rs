use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::persona::models::Persona;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdeasOutput {
    #[serde(default)]
    pub ideas: Vec<String>,
}

/// One generated message. LinkedIn messages carry no subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub body: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageOutput {
    #[serde(default)]
    pub messages: Vec<MessageContent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutreachChannel {
    Email,
    Linkedin,
    UseBoth,
}

impl OutreachChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutreachChannel::Email => "email",
            OutreachChannel::Linkedin => "linkedin",
            OutreachChannel::UseBoth => "useboth",
        }
    }
}

impl fmt::Display for OutreachChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignRequest {
    pub persona: Persona,
    pub outreach_channel: OutreachChannel,
}

/// A flat message list for one channel, or one list per channel for `useboth`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeneratedContent {
    Both {
        email: Vec<MessageContent>,
        linkedin: Vec<MessageContent>,
    },
    Single(Vec<MessageContent>),
}

impl GeneratedContent {
    pub fn message_count(&self) -> usize {
        match self {
            GeneratedContent::Single(messages) => messages.len(),
            GeneratedContent::Both { email, linkedin } => email.len() + linkedin.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignDetails {
    pub campaign_id: Uuid,
    pub persona_id: String,
    pub outreach_channel: OutreachChannel,
    pub message_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignResponse {
    pub message: String,
    pub campaign_details: CampaignDetails,
    pub generated_content: GeneratedContent,
}

/// Body stored in the `campaigns` collection.
#[derive(Debug, Serialize)]
pub struct CampaignDocument<'a> {
    pub persona: &'a Persona,
    pub outreach_channel: OutreachChannel,
    pub generated_content: &'a GeneratedContent,
}

/// Body stored in the `ideas` collection.
#[derive(Debug, Serialize)]
pub struct IdeasDocument<'a> {
    pub persona: &'a Persona,
    pub ideas: &'a [String],
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_wire_names() {
        for (wire, channel) in [
            ("email", OutreachChannel::Email),
            ("linkedin", OutreachChannel::Linkedin),
            ("useboth", OutreachChannel::UseBoth),
        ] {
            let parsed: OutreachChannel = serde_json::from_value(json!(wire)).unwrap();
            assert_eq!(parsed, channel);
            assert_eq!(serde_json::to_value(channel).unwrap(), json!(wire));
            assert_eq!(channel.to_string(), wire);
        }
    }

    #[test]
    fn test_unknown_channel_is_rejected() {
        assert!(serde_json::from_value::<OutreachChannel>(json!("fax")).is_err());
        assert!(serde_json::from_value::<OutreachChannel>(json!("EMAIL")).is_err());
    }

    #[test]
    fn test_body_only_message_omits_subject() {
        let message = MessageContent {
            subject: None,
            body: "Hi Sam".into(),
        };
        assert_eq!(serde_json::to_value(&message).unwrap(), json!({"body": "Hi Sam"}));
    }

    #[test]
    fn test_generated_content_shapes() {
        let message = MessageContent {
            subject: Some("Quick idea".into()),
            body: "Hello".into(),
        };
        let single = GeneratedContent::Single(vec![message.clone()]);
        assert_eq!(
            serde_json::to_value(&single).unwrap(),
            json!([{"subject": "Quick idea", "body": "Hello"}])
        );

        let both = GeneratedContent::Both {
            email: vec![message],
            linkedin: vec![],
        };
        assert_eq!(
            serde_json::to_value(&both).unwrap(),
            json!({"email": [{"subject": "Quick idea", "body": "Hello"}], "linkedin": []})
        );
        assert_eq!(both.message_count(), 1);
    }

    #[test]
    fn test_campaign_request_accepts_partial_persona() {
        let request: CampaignRequest = serde_json::from_value(json!({
            "persona": {"id": "test_lead", "company": "Test Corp", "social_proof": []},
            "outreach_channel": "useboth"
        }))
        .unwrap();
        assert_eq!(request.persona.id, "test_lead");
        assert_eq!(request.outreach_channel, OutreachChannel::UseBoth);
    }
}
