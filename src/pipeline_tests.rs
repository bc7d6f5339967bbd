//! End-to-end tests: prompt → document → page → validation → source.

#[cfg(test)]
mod tests {
    use crate::compile::{compile_prompt, verify_generated_source, CompileOptions};
    use crate::diagnostics::{CODEGEN_SYNTAX_ERROR, INVALID_COMPONENT};
    use crate::lower::lower_to_page;
    use crate::node::Node;
    use crate::prompt::parse_prompt_to_ui_dsl;
    use crate::registry::{ComponentRegistry, RegistryEntry};
    use crate::validate::{validate_page, validate_tree};
    use serde_json::json;

    const PROMPTS: &[&str] = &[
        "registration form with email and password",
        "login screen",
        "Create a contact form. Fields: full name, email, country, message, accept terms",
        "settings page with display name, bio and newsletter",
        "analytics dashboard with start date, end date and category",
        "two-column job application form with name, email, phone, resume, cover letter",
        "Stwórz formularz kontaktowy z polami imię, email i wiadomość",
        "???",
    ];

    #[test]
    fn test_design_system_accepts_every_lowered_prompt() {
        let registry = ComponentRegistry::design_system();
        for prompt in PROMPTS {
            let page = lower_to_page(&parse_prompt_to_ui_dsl(prompt));
            let result = validate_page(&serde_json::to_value(&page).unwrap(), &registry);
            assert!(result.valid, "{}: {:?}", prompt, result.diagnostics);
            assert_eq!(result.warnings().count(), 0, "{}: {:?}", prompt, result.diagnostics);
            assert!(validate_tree(&page, &registry).valid);
        }
    }

    #[test]
    fn test_compile_prompt_produces_parseable_source() {
        let registry = ComponentRegistry::design_system();
        for prompt in PROMPTS {
            let output = compile_prompt(prompt, &registry, &CompileOptions::default());
            assert!(output.validation.valid, "{}: {:?}", prompt, output.validation.diagnostics);
            let code = output.code.expect("code for a valid document");
            assert!(code.contains("export default function"));
        }
    }

    #[test]
    fn test_compile_output_serializes_camel_case() {
        let output = compile_prompt(
            "registration form with email and password",
            &ComponentRegistry::design_system(),
            &CompileOptions::default(),
        );
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["dsl"]["type"], json!("form"));
        assert_eq!(value["dsl"]["scaffold"], json!("form-auth"));
        assert_eq!(value["page"]["type"], json!("page"));
        assert_eq!(value["report"]["fieldRule"], json!("with-list"));
        assert_eq!(value["validation"]["valid"], json!(true));
        assert_eq!(value["dsl"]["fields"][1]["validation"][1], json!({ "type": "minLength", "value": 8 }));
    }

    #[test]
    fn test_no_code_when_registry_lacks_components() {
        let registry = ComponentRegistry::new()
            .with_component("Input", RegistryEntry::new("@/components/ui/input"));
        let output = compile_prompt("contact form with email", &registry, &CompileOptions::default());
        assert!(!output.validation.valid);
        assert!(output.code.is_none());
        assert!(output
            .validation
            .with_code(INVALID_COMPONENT)
            .any(|d| d.message.contains("\"Button\"")));
    }

    #[test]
    fn test_lowered_page_round_trips_through_json() {
        let page = lower_to_page(&parse_prompt_to_ui_dsl("login screen"));
        let value = serde_json::to_value(&page).unwrap();
        let back: Node = serde_json::from_value(value).unwrap();
        assert_eq!(back, page);
    }

    #[test]
    fn test_syntax_check_reports_errors() {
        let diagnostics = verify_generated_source("export default function X() { return <div>; }");
        assert!(!diagnostics.is_empty());
        assert!(diagnostics.iter().all(|d| d.has_code(CODEGEN_SYNTAX_ERROR)));
    }
}
