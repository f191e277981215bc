// Persona extraction prompt.

use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};

/// Replace `{description}` and `{web_content}` before sending.
const PERSONA_PROMPT_TEMPLATE: &str = r#"You are a B2B market analyst. Read the web content and the additional context below and extract a detailed buyer persona.

FIELDS TO EXTRACT:

1. Organization context
   - title: the role being targeted (e.g. "Chief Technology Officer", "IT Manager")
   - company: the company type or industry vertical

2. Business analysis (several detailed, multi-sentence points per field)
   - pain_points: operational challenges, strategic problems, market pressure,
     resource constraints, growth bottlenecks. At least 4 points.
   - social_proof: objects with
       * statement: a success metric, case study or testimonial (2-3 sentences)
       * source: who it is attributed to (company, role or data source)
     At least 4 entries, with numbers where possible.
   - cost_of_inaction: short-term financial impact, long-term risk, competitive
     disadvantage, lost market share, inefficiency. At least 4 points.
   - solutions: core features and their benefits, implementation approach,
     expected outcomes, integrations, success metrics. At least 5 points.
   - objections: implementation effort, resourcing, change management, technical
     limits, budget. At least 4 points.
   - competitive_advantages: technology, positioning, efficiency, customer
     success, innovation. At least 4 points.

RULES:
- Text fields are strings; use an empty string when nothing is found
- social_proof is an array of objects with "statement" and "source"
- Every other list field is an array of strings
- Never use null, except for a social_proof "source" that is unknown
- Be specific, use the industry's terminology, and quantify where possible

Content to analyze:
{web_content}

Additional context:
{description}

Return a JSON object with exactly this structure:
{"title": "", "company": "",
 "pain_points": [],
 "social_proof": [{"statement": "Example success metric", "source": "Source if available"}],
 "cost_of_inaction": [],
 "solutions": [],
 "objections": [],
 "competitive_advantages": []}
"#;

pub fn persona_prompt(web_content: &str, description: &str) -> String {
    let mut prompt = fill_template(
        PERSONA_PROMPT_TEMPLATE,
        &[("web_content", web_content), ("description", description)],
    );
    prompt.push_str(JSON_ONLY_INSTRUCTION);
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_content_and_description() {
        let prompt = persona_prompt("Acme automates invoices.", "Target finance leaders");
        assert!(prompt.contains("Content to analyze:\nAcme automates invoices."));
        assert!(prompt.contains("Additional context:\nTarget finance leaders"));
        assert!(!prompt.contains("{web_content}"));
        assert!(!prompt.contains("{description}"));
        assert!(prompt.ends_with(JSON_ONLY_INSTRUCTION));
    }

    #[test]
    fn test_prompt_lists_every_persona_field() {
        let prompt = persona_prompt("", "");
        for field in [
            "title",
            "company",
            "pain_points",
            "social_proof",
            "cost_of_inaction",
            "solutions",
            "objections",
            "competitive_advantages",
        ] {
            assert!(prompt.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn test_placeholders_in_scraped_content_are_left_alone() {
        let prompt = persona_prompt("template text {description}", "ctx");
        assert!(prompt.contains("template text {description}"));
    }

    #[test]
    fn test_placeholders_in_description_are_left_alone() {
        let prompt = persona_prompt("SCRAPED PAGE", "see {web_content}");
        assert!(prompt.contains("Additional context:\nsee {web_content}"));
        assert_eq!(prompt.matches("SCRAPED PAGE").count(), 1);
    }
}
