pub const SYSTEM_INSTRUCTION: &str = include_str!("../data/prompts/system_instruction.txt");

pub const NO_CONTEXT: &str = "No specific user context provided.";
pub const NO_SPECIES_DATA: &str =
    "DATABASE STATUS: Species database not provided for this request.";

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is single-pass: placeholder syntax inside a substituted value
/// is left as-is. Unknown keys are kept verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        match after_open.find("}}") {
            Some(end) => {
                let key = &after_open[..end];
                match vars.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => result.push_str(value),
                    None => {
                        result.push_str("{{");
                        result.push_str(key);
                        result.push_str("}}");
                    }
                }
                rest = &after_open[end + 2..];
            }
            None => {
                result.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    result.push_str(rest);
    result
}

/// Whether a JSON value counts as "provided": `null`, `false`, `0` and `""`
/// do not.
fn is_provided(value: &serde_json::Value) -> bool {
    use serde_json::Value;

    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Sentence describing the species database available to the model.
pub fn species_context(species_data: Option<&serde_json::Value>) -> String {
    match species_data {
        Some(data) if is_provided(data) => format!(
            "REAL-TIME DATABASE ACCESS: You have access to the following trusted species database: {}.",
            data
        ),
        _ => NO_SPECIES_DATA.to_string(),
    }
}

/// Build the system instruction sent alongside the conversation.
pub fn build_system_instruction(
    context: Option<&str>,
    species_data: Option<&serde_json::Value>,
) -> String {
    let context = context
        .filter(|c| !c.is_empty())
        .unwrap_or(NO_CONTEXT);
    let species = species_context(species_data);

    render(
        SYSTEM_INSTRUCTION,
        &[("context", context), ("species_context", &species)],
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "oaks"), ("b", "teaks")]),
            "oaks and teaks"
        );
    }

    #[test]
    fn test_render_does_not_expand_values() {
        assert_eq!(
            render("{{a}} / {{b}}", &[("a", "{{b}}"), ("b", "x")]),
            "{{b}} / x"
        );
    }

    #[test]
    fn test_render_keeps_unknown_and_unclosed() {
        assert_eq!(render("{{missing}} {{open", &[]), "{{missing}} {{open");
    }

    #[test]
    fn test_template_has_placeholders() {
        assert!(SYSTEM_INSTRUCTION.contains("{{context}}"));
        assert!(SYSTEM_INSTRUCTION.contains("{{species_context}}"));
        assert!(SYSTEM_INSTRUCTION.contains("CONTEXT FROM USER SESSION:"));
    }

    #[test]
    fn test_instruction_with_context_and_species() {
        let species = json!([{"name": "Iroko", "growthRate": "slow"}]);
        let instruction = build_system_instruction(Some("Farmer in Ogun"), Some(&species));

        assert!(instruction.starts_with("You are ForestWise AI"));
        assert!(instruction.contains("CONTEXT FROM USER SESSION:\nFarmer in Ogun"));
        assert!(instruction.ends_with(
            r#"trusted species database: [{"growthRate":"slow","name":"Iroko"}]."#
        ));
    }

    #[test]
    fn test_instruction_defaults() {
        let instruction = build_system_instruction(None, None);
        assert!(instruction.contains(NO_CONTEXT));
        assert!(instruction.ends_with(NO_SPECIES_DATA));
        assert!(!instruction.contains("{{"));
    }

    #[test]
    fn test_empty_context_uses_placeholder() {
        let instruction = build_system_instruction(Some(""), None);
        assert!(instruction.contains(NO_CONTEXT));
    }

    #[test]
    fn test_falsy_species_data_is_not_provided() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert_eq!(species_context(Some(&value)), NO_SPECIES_DATA, "{}", value);
        }
    }

    #[test]
    fn test_truthy_scalars_and_empty_containers_are_provided() {
        for value in [json!(true), json!(3), json!("neem"), json!([]), json!({})] {
            assert!(
                species_context(Some(&value)).starts_with("REAL-TIME DATABASE ACCESS"),
                "{}",
                value
            );
        }
    }

    #[test]
    fn test_whitespace_context_is_kept() {
        let instruction = build_system_instruction(Some("  "), None);
        assert!(!instruction.contains(NO_CONTEXT));
        assert!(instruction.contains("CONTEXT FROM USER SESSION:\n  \n"));
    }
}
