//! Codegen tests: imports, state, validation table, markup and escaping.

#[cfg(test)]
mod tests {
    use crate::codegen::{
        component_name, generate_code_from_ui_dsl, generate_code_with_options, initial_value,
        input_type, rule_literal, ui_imports, GeneratorOptions,
    };
    use crate::compile::verify_generated_source;
    use crate::dsl::{
        Action, ActionType, ActionVariant, DocumentType, Field, FieldComponent, Scaffold,
        SelectOption, UiDsl, ValidationRule,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn field(name: &str, label: &str, component: FieldComponent) -> Field {
        Field::new(name, label, component)
    }

    fn contact_form() -> UiDsl {
        let mut dsl = UiDsl::new(DocumentType::Form, "Contact");
        let mut email = field("email", "Email", FieldComponent::Input);
        email.placeholder = Some("you@example.com".to_string());
        email.validation = vec![ValidationRule::required(), ValidationRule::email()];
        let mut country = field("country", "Country", FieldComponent::Select);
        country.options = vec![SelectOption::new("Poland", "pl"), SelectOption::new("Germany", "de")];
        dsl.fields = vec![email, country, field("terms", "Accept terms", FieldComponent::Checkbox)];
        dsl.actions = vec![Action::submit("Send"), Action::secondary("action-cancel", "Cancel")];
        dsl
    }

    fn import_names(dsl: &UiDsl) -> Vec<String> {
        ui_imports(dsl, &GeneratorOptions::default())
            .into_iter()
            .flat_map(|i| i.names)
            .collect()
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // IMPORTS
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_select_expands_to_compound_imports() {
        let mut dsl = UiDsl::new(DocumentType::Form, "Pick");
        dsl.fields.push(field("size", "Size", FieldComponent::Select));
        let names = import_names(&dsl);
        for expected in ["Select", "SelectTrigger", "SelectValue", "SelectContent", "SelectItem"] {
            assert!(names.iter().any(|n| n == expected), "missing {}", expected);
        }
    }

    #[test]
    fn test_imports_are_grouped_sorted_and_deduplicated() {
        let mut dsl = contact_form();
        dsl.fields.push(field("phone", "Phone", FieldComponent::Input));
        let imports = ui_imports(&dsl, &GeneratorOptions::default());
        let modules: Vec<&str> = imports.iter().map(|i| i.module.as_str()).collect();
        assert_eq!(
            modules,
            vec![
                "@/components/ui/button",
                "@/components/ui/checkbox",
                "@/components/ui/input",
                "@/components/ui/label",
                "@/components/ui/select",
            ]
        );
        let select = imports.iter().find(|i| i.module.ends_with("/select")).unwrap();
        assert_eq!(
            select.names,
            vec!["Select", "SelectContent", "SelectItem", "SelectTrigger", "SelectValue"]
        );
    }

    #[test]
    fn test_auth_scaffold_adds_card_imports() {
        let mut dsl = contact_form();
        dsl.scaffold = Some(Scaffold::FormAuth);
        let names = import_names(&dsl);
        assert!(names.contains(&"CardFooter".to_string()));
        assert!(!names.contains(&"CardDescription".to_string()));

        dsl.description = Some("Welcome back".to_string());
        assert!(import_names(&dsl).contains(&"CardDescription".to_string()));
    }

    #[test]
    fn test_custom_import_base() {
        let options = GeneratorOptions {
            ui_import_base: "~/ui/".to_string(),
            ..GeneratorOptions::default()
        };
        let imports = ui_imports(&contact_form(), &options);
        assert_eq!(imports[0].module, "~/ui/button");
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // STATE AND RULES
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_initial_values() {
        assert_eq!(initial_value(&field("a", "A", FieldComponent::Checkbox)), "false");
        assert_eq!(initial_value(&field("a", "A", FieldComponent::DatePicker)), "undefined");
        assert_eq!(initial_value(&field("a", "A", FieldComponent::Textarea)), "\"\"");
        let mut with_default = field("a", "A", FieldComponent::Select);
        with_default.default_value = Some(json!("pl"));
        assert_eq!(initial_value(&with_default), "\"pl\"");
    }

    #[test]
    fn test_rule_literals() {
        assert_eq!(
            rule_literal(&ValidationRule::required(), "Email"),
            r#"{ type: "required", message: "Email is required." }"#
        );
        assert_eq!(
            rule_literal(&ValidationRule::min_length(8), "Password"),
            r#"{ type: "minLength", value: 8, message: "Password must be at least 8 characters." }"#
        );
        assert_eq!(
            rule_literal(&ValidationRule::pattern(r"^\d+$"), "Age"),
            r#"{ type: "pattern", value: new RegExp("^\\d+$"), message: "Age has an invalid format." }"#
        );
        let custom = ValidationRule::Email {
            message: Some("Use your \"work\" address".to_string()),
        };
        assert_eq!(
            rule_literal(&custom, "Email"),
            r#"{ type: "email", message: "Use your \"work\" address" }"#
        );
    }

    #[test]
    fn test_input_type_inference() {
        assert_eq!(input_type("workEmail"), "email");
        assert_eq!(input_type("phoneNumber"), "tel");
        assert_eq!(input_type("password"), "password");
        assert_eq!(input_type("hotelName"), "text");
    }

    #[test]
    fn test_component_name() {
        let options = GeneratorOptions::default();
        assert_eq!(component_name(&UiDsl::new(DocumentType::Form, "Sign In"), &options), "SignInForm");
        assert_eq!(component_name(&UiDsl::new(DocumentType::Form, "Registration Form"), &options), "RegistrationForm");
        assert_eq!(component_name(&UiDsl::new(DocumentType::Screen, "Zażółć"), &options), "ZaScreen");
        assert_eq!(component_name(&UiDsl::new(DocumentType::App, "!!!"), &options), "GeneratedApp");
        let named = GeneratorOptions {
            component_name: Some("checkout page".to_string()),
            ..GeneratorOptions::default()
        };
        assert_eq!(component_name(&UiDsl::new(DocumentType::Form, "x"), &named), "CheckoutPage");
    }

    // ═══════════════════════════════════════════════════════════════════════════════
    // MARKUP
    // ═══════════════════════════════════════════════════════════════════════════════

    #[test]
    fn test_generated_module_shape() {
        let code = generate_code_from_ui_dsl(&contact_form());
        assert!(code.starts_with("\"use client\";\n\nimport { useState, type FormEvent } from \"react\";\n"));
        assert!(code.contains("export default function ContactForm("));
        assert!(code.contains("  email: \"\",\n"));
        assert!(code.contains("  terms: false,\n"));
        assert!(code.contains("type=\"email\""));
        assert!(code.contains("onCheckedChange={(checked) => handleChange(\"terms\", checked === true)}"));
        assert!(code.contains("<SelectItem value=\"pl\">Poland</SelectItem>"));
        assert!(code.contains("{errors.email && <p className=\"text-sm text-destructive\">{errors.email}</p>}"));
        assert!(code.contains("<Button type=\"submit\">Send</Button>"));
        assert!(code.contains("<Button type=\"button\" variant=\"outline\">Cancel</Button>"));
        assert!(code.contains("<div className=\"mx-auto max-w-2xl p-6\">"));
    }

    #[test]
    fn test_generation_is_deterministic_and_optional_directive() {
        let dsl = contact_form();
        assert_eq!(generate_code_from_ui_dsl(&dsl), generate_code_from_ui_dsl(&dsl));
        let options = GeneratorOptions {
            use_client_directive: false,
            ..GeneratorOptions::default()
        };
        assert!(generate_code_with_options(&dsl, &options).starts_with("import { useState"));
    }

    #[test]
    fn test_auth_card_wrapper() {
        let mut dsl = contact_form();
        dsl.scaffold = Some(Scaffold::FormAuth);
        dsl.description = Some("Fill in the form".to_string());
        let code = generate_code_from_ui_dsl(&dsl);
        assert!(code.contains("<Card className=\"w-full max-w-md\">"));
        assert!(code.contains("<CardDescription>Fill in the form</CardDescription>"));
        assert!(code.contains("<CardFooter"));
    }

    #[test]
    fn test_link_action() {
        let mut dsl = UiDsl::new(DocumentType::Screen, "Help");
        dsl.actions.push(Action {
            id: "action-docs".to_string(),
            label: "Docs".to_string(),
            action_type: ActionType::Link,
            variant: ActionVariant::Link,
            href: Some("/docs?a=1&b=\"2\"".to_string()),
        });
        let code = generate_code_from_ui_dsl(&dsl);
        assert!(code.contains("<Button variant=\"link\" asChild>"));
        assert!(code.contains("<a href=\"/docs?a=1&amp;b=&quot;2&quot;\">Docs</a>"));
    }

    #[test]
    fn test_quote_bearing_text_is_escaped() {
        let mut dsl = UiDsl::new(DocumentType::Form, "Say \"hi\"");
        let mut name = field("name", "Your {name} <here>", FieldComponent::Input);
        name.placeholder = Some("e.g. \"Ada\"".to_string());
        name.helper_text = Some("Use < 20 chars".to_string());
        dsl.fields.push(name);
        let code = generate_code_from_ui_dsl(&dsl);

        assert!(code.contains("placeholder=\"e.g. &quot;Ada&quot;\""));
        assert!(code.contains(r#"<Label htmlFor="field-name">{"Your {name} <here>"}</Label>"#));
        assert!(code.contains(r#"{"Use < 20 chars"}"#));
        assert!(code.contains("export default function SayHiForm("));
        assert!(verify_generated_source(&code).is_empty());
    }

    #[test]
    fn test_every_scaffold_parses_as_tsx() {
        let mut date = field("birthDate", "Birth date", FieldComponent::DatePicker);
        date.placeholder = Some("Pick a date".to_string());
        let mut bio = field("bio", "Bio", FieldComponent::Textarea);
        bio.validation = vec![ValidationRule::max_length(300), ValidationRule::pattern("^[^<>]*$")];
        let upload = field("avatar", "Avatar", FieldComponent::FileUpload);

        for scaffold in [
            None,
            Some(Scaffold::FormAuth),
            Some(Scaffold::SettingsPage),
            Some(Scaffold::Dashboard),
            Some(Scaffold::TwoColumn),
        ] {
            let mut dsl = contact_form();
            dsl.scaffold = scaffold;
            dsl.description = Some("Details & more".to_string());
            dsl.fields.extend([date.clone(), bio.clone(), upload.clone()]);
            let code = generate_code_from_ui_dsl(&dsl);
            let errors = verify_generated_source(&code);
            assert!(errors.is_empty(), "{:?}: {:?}\n{}", scaffold, errors, code);
        }
    }

    #[test]
    fn test_empty_document_still_parses() {
        let code = generate_code_from_ui_dsl(&UiDsl::new(DocumentType::App, "Empty"));
        assert!(code.contains("const validationRules: Record<string, ValidationRule[]> = {};"));
        assert!(!code.contains("components/ui/button"));
        assert!(verify_generated_source(&code).is_empty());
    }
}
