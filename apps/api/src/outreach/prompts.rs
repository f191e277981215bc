// Outreach prompt builders. Each one renders the persona slice its channel needs.

use crate::llm_client::prompts::{comma_list, or_not_specified, JSON_ONLY_INSTRUCTION};
use crate::persona::models::Persona;

pub fn idea_generation_prompt(count: u32, persona: &Persona) -> String {
    let social_proof = persona
        .social_proof
        .iter()
        .map(|sp| {
            format!(
                "\"{}\" from {}",
                sp.statement,
                sp.source.as_deref().unwrap_or("an unnamed source")
            )
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are a senior B2B sales strategist. Generate {count} compelling, creative outreach ideas for the persona below.

Respond in JSON with a single key, "ideas", holding a list of strings. Each string is one concise sentence.

Each idea should:
- address one of the persona's pain points directly
- highlight a specific solution or competitive advantage
- connect with the persona's goals

Persona:
- Title: {title}
- Company: {company}
- Pain Points: {pain_points}
- Solutions: {solutions}
- Competitive Advantages: {advantages}
- Social Proof: {social_proof}

Return a JSON object like this:
{{"ideas": ["Idea 1", "Idea 2", "Idea 3"]}}
{json_only}"#,
        title = or_not_specified(persona.title.as_deref()),
        company = or_not_specified(persona.company.as_deref()),
        pain_points = comma_list(&persona.pain_points),
        solutions = comma_list(&persona.solutions),
        advantages = comma_list(&persona.competitive_advantages),
        json_only = JSON_ONLY_INSTRUCTION,
    )
}

pub fn email_content_prompt(count: u32, persona: &Persona) -> String {
    let social_proof = persona
        .social_proof
        .iter()
        .map(|sp| format!("\"{}\"", sp.statement))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        r#"You are an expert sales copywriter. Write {count} email messages for a B2B sales campaign, each tailored to the persona below.

The emails should be professional yet engaging, with a clear value proposition.

Persona:
- Title: {title}
- Company: {company}
- Pain Points: {pain_points}
- Solutions: {solutions}
- Social Proof: {social_proof}

Return a JSON object with a key "messages" holding a list of objects. Each object has a "subject" and a "body" field.

Example:
{{
  "messages": [
    {{"subject": "Subject for Message 1", "body": "Body of Message 1"}},
    {{"subject": "Subject for Message 2", "body": "Body of Message 2"}}
  ]
}}
{json_only}"#,
        title = or_not_specified(persona.title.as_deref()),
        company = or_not_specified(persona.company.as_deref()),
        pain_points = comma_list(&persona.pain_points),
        solutions = comma_list(&persona.solutions),
        json_only = JSON_ONLY_INSTRUCTION,
    )
}

pub fn linkedin_content_prompt(count: u32, persona: &Persona) -> String {
    format!(
        r#"You are a LinkedIn outreach specialist. Write {count} short, personalized LinkedIn messages for a B2B sales campaign, each tailored to the persona below.

The messages should be brief and friendly, and aim to start a conversation.

Persona:
- Title: {title}
- Company: {company}
- Pain Points: {pain_points}
- Solutions: {solutions}

Return a JSON object with a key "messages" holding a list of objects. Each object has a "body" field only. Do not include a subject line.

Example:
{{
  "messages": [
    {{"body": "Body of Message 1"}},
    {{"body": "Body of Message 2"}}
  ]
}}
{json_only}"#,
        title = or_not_specified(persona.title.as_deref()),
        company = or_not_specified(persona.company.as_deref()),
        pain_points = comma_list(&persona.pain_points),
        solutions = comma_list(&persona.solutions),
        json_only = JSON_ONLY_INSTRUCTION,
    )
}
