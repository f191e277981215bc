// Shared prompt fragments and formatting helpers.
// Each pipeline module keeps its own prompts.rs; only cross-cutting pieces live here.

/// Closing instruction appended to every prompt that expects structured output.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with the JSON object only. \
    Do NOT include explanations, apologies, or any text outside the JSON object.";

/// Renders an optional persona attribute, with a placeholder when the model found nothing.
pub fn or_not_specified(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "Not specified",
    }
}

/// Joins list items the way they are shown to the model: `a, b, c`.
pub fn comma_list(items: &[String]) -> String {
    items.join(", ")
}

/// Fills `{name}` placeholders in one pass over `template`.
///
/// Substituted values are never scanned again, so a value that itself contains a
/// placeholder is inserted verbatim.
pub fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    loop {
        let next = values
            .iter()
            .filter_map(|(name, value)| {
                let placeholder = format!("{{{name}}}");
                rest.find(&placeholder)
                    .map(|pos| (pos, placeholder.len(), *value))
            })
            .min_by_key(|(pos, _, _)| *pos);

        let Some((pos, len, value)) = next else {
            out.push_str(rest);
            return out;
        };
        out.push_str(&rest[..pos]);
        out.push_str(value);
        rest = &rest[pos + len..];
    }
}
