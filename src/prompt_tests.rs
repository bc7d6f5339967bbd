//! Prompt parser tests, English and Polish.

#[cfg(test)]
mod tests {
    use crate::dsl::{
        ActionType, ActionVariant, DocumentType, FieldComponent, Scaffold, ValidationRule,
    };
    use crate::lexicon::Language;
    use crate::prompt::{
        identifier_for, parse_prompt_to_ui_dsl, parse_prompt_with_report, sanitize,
        split_field_list, title_case,
    };
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn test_registration_form_with_email_and_password() {
        let dsl = parse_prompt_to_ui_dsl("registration form with email and password");

        assert_eq!(dsl.doc_type, DocumentType::Form);
        assert_eq!(dsl.scaffold, Some(Scaffold::FormAuth));
        assert_eq!(dsl.title, "Registration Form");

        let email = dsl.field("email").expect("email field");
        assert_eq!(email.component, FieldComponent::Input);
        assert!(email.has_rule("email"));
        assert!(email.has_rule("required"));

        let password = dsl.field("password").expect("password field");
        assert!(password.is_required());
        assert!(password
            .validation
            .contains(&ValidationRule::min_length(8)));

        assert_eq!(dsl.fields.len(), 2);
        assert_eq!(dsl.actions[0].label, "Create Account");
        assert_eq!(dsl.actions[0].action_type, ActionType::Submit);
    }

    #[test]
    fn test_report_names_rules() {
        let outcome = parse_prompt_with_report("registration form with email and password");
        assert_eq!(outcome.report.language, Language::En);
        assert_eq!(outcome.report.field_rule.as_deref(), Some("with-list"));
        assert_eq!(outcome.report.title_rule, "leading-noun");
        assert_eq!(outcome.report.action_rule, "register");
        assert!(!outcome.report.code_like);
    }

    #[test]
    fn test_colon_list_and_component_classification() {
        let dsl = parse_prompt_to_ui_dsl(
            "Create a contact form. Fields: full name, email, country, message, accept terms",
        );
        let components: Vec<(&str, FieldComponent)> = dsl
            .fields
            .iter()
            .map(|f| (f.name.as_str(), f.component))
            .collect();
        assert_eq!(
            components,
            vec![
                ("fullName", FieldComponent::Input),
                ("email", FieldComponent::Input),
                ("country", FieldComponent::Select),
                ("message", FieldComponent::Textarea),
                ("acceptTerms", FieldComponent::Checkbox),
            ]
        );
        assert_eq!(dsl.title, "Contact Form");
        assert_eq!(dsl.actions[0].label, "Send Message");

        let country = dsl.field("country").unwrap();
        assert!(country.options.iter().any(|o| o.value == "pl"));
        let terms = dsl.field("acceptTerms").unwrap();
        assert!(terms.is_required());
    }

    #[test]
    fn test_dictionary_fallback_keeps_prompt_order() {
        let outcome = parse_prompt_with_report("I need something for a phone number then an email");
        let names: Vec<&str> = outcome.dsl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["phoneNumber", "email"]);
        assert_eq!(outcome.report.field_rule.as_deref(), Some("dictionary"));
        let phone = outcome.dsl.field("phoneNumber").unwrap();
        assert!(phone.has_rule("pattern"));
    }

    #[test]
    fn test_auth_scaffold_without_fields_gets_template() {
        let outcome = parse_prompt_with_report("login screen");
        assert_eq!(outcome.dsl.scaffold, Some(Scaffold::FormAuth));
        assert_eq!(outcome.dsl.doc_type, DocumentType::Screen);
        assert_eq!(outcome.report.field_rule.as_deref(), Some("auth-template"));
        let names: Vec<&str> = outcome.dsl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["email", "password"]);
        assert_eq!(outcome.dsl.actions[0].label, "Sign In");
    }

    #[test]
    fn test_global_qualifiers() {
        let dsl = parse_prompt_to_ui_dsl(
            "feedback form with name and comment, all fields required, max 200 characters",
        );
        for field in &dsl.fields {
            assert!(field.is_required(), "{} should be required", field.name);
            assert!(field.validation.contains(&ValidationRule::max_length(200)));
        }
    }

    #[test]
    fn test_min_length_prefers_password_fields() {
        let dsl = parse_prompt_to_ui_dsl("signup form with username and password, at least 12 characters");
        let password = dsl.field("password").unwrap();
        assert!(password.validation.contains(&ValidationRule::min_length(12)));
        assert!(!password.validation.contains(&ValidationRule::min_length(8)));
        assert!(!dsl.field("username").unwrap().has_rule("minLength"));
    }

    #[test]
    fn test_quoted_button_label_and_secondary_action() {
        let dsl = parse_prompt_to_ui_dsl(r#"newsletter form with email, a button "Join now" and a cancel option"#);
        assert_eq!(dsl.actions.len(), 2);
        assert_eq!(dsl.actions[0].label, "Join now");
        assert_eq!(dsl.actions[1].id, "action-cancel");
        assert_eq!(dsl.actions[1].variant, ActionVariant::Outline);
        assert_eq!(dsl.actions[1].action_type, ActionType::Button);
    }

    #[test]
    fn test_polish_prompt() {
        let outcome = parse_prompt_with_report("Stwórz formularz rejestracji z polami email, hasło i telefon");
        let dsl = outcome.dsl;
        assert_eq!(outcome.report.language, Language::Pl);
        assert_eq!(dsl.doc_type, DocumentType::Form);
        assert_eq!(dsl.scaffold, Some(Scaffold::FormAuth));
        let names: Vec<&str> = dsl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["email", "haslo", "telefon"]);
        assert!(dsl.field("haslo").unwrap().validation.contains(&ValidationRule::min_length(8)));
        assert_eq!(dsl.actions[0].label, "Zarejestruj się");
    }

    #[test]
    fn test_code_like_prompt_yields_empty_document() {
        let outcome = parse_prompt_with_report(
            "fix it\nimport React from 'react';\nexport default function Form() { return <form /> }",
        );
        assert!(outcome.report.code_like);
        assert!(outcome.dsl.fields.is_empty());
        assert!(outcome.dsl.actions.is_empty());
        assert_eq!(outcome.dsl.title, "Form");
    }

    #[test]
    fn test_import_in_prose_is_not_code() {
        let outcome = parse_prompt_with_report("Create a CSV import form with file upload and email");
        assert!(!outcome.report.code_like);
        assert_eq!(outcome.dsl.title, "CSV Import Form");
        let names: Vec<&str> = outcome.dsl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["fileUpload", "email"]);
        assert_eq!(outcome.dsl.fields[0].component, FieldComponent::FileUpload);

        let outcome = parse_prompt_with_report("Create a form to import contacts with name and email");
        assert!(!outcome.report.code_like);
        assert_eq!(outcome.dsl.title, "Import Contacts");
        let names: Vec<&str> = outcome.dsl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "email"]);
    }

    #[test]
    fn test_import_statements_still_count_as_code() {
        for code in [
            "import { Button } from \"@/components/ui/button\";",
            "import * as React from 'react'",
            "import './globals.css';",
        ] {
            assert!(sanitize(code).code_like, "{}", code);
        }
        let cleaned = sanitize("make the submit button wider please\nimport React from 'react';");
        assert!(!cleaned.code_like);
        assert_eq!(cleaned.text, "make the submit button wider please");
    }

    #[test]
    fn test_auth_words_joined_by_and_fall_back_to_template() {
        for prompt in ["login and registration page", "Build a sign in and sign up form"] {
            let outcome = parse_prompt_with_report(prompt);
            assert_eq!(outcome.dsl.scaffold, Some(Scaffold::FormAuth), "{}", prompt);
            assert_eq!(outcome.report.field_rule.as_deref(), Some("auth-template"), "{}", prompt);
            let names: Vec<&str> = outcome.dsl.fields.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, vec!["email", "password"], "{}", prompt);
        }
    }

    #[test]
    fn test_conjunction_list_keeps_known_fields() {
        let outcome = parse_prompt_with_report("I want phone and email");
        assert_eq!(outcome.report.field_rule.as_deref(), Some("conjunction-list"));
        let names: Vec<&str> = outcome.dsl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["phone", "email"]);
    }

    #[test]
    fn test_sanitize_strips_fences_and_lead_ins() {
        let cleaned = sanitize(
            "Modify the existing component: add a phone field to the form\n```tsx\nexport default function A() {}\n```",
        );
        assert!(cleaned.stripped);
        assert!(!cleaned.code_like);
        assert_eq!(cleaned.text, "add a phone field to the form");
    }

    #[test]
    fn test_defaults_for_unrecognized_input() {
        let dsl = parse_prompt_to_ui_dsl("???");
        assert_eq!(dsl.doc_type, DocumentType::Form);
        assert_eq!(dsl.title, "Form");
        assert!(dsl.fields.is_empty());
        assert_eq!(dsl.actions.len(), 1);
        assert_eq!(dsl.actions[0].label, "Submit");
    }

    #[test]
    fn test_helpers() {
        assert_eq!(title_case("user  profile settings"), "User Profile Settings");
        assert_eq!(identifier_for("date of birth"), "dateOfBirth");
        assert_eq!(identifier_for("hasło"), "haslo");
        assert_eq!(identifier_for("2nd line"), "field2ndLine");
        assert_eq!(identifier_for("new"), "newField");
        assert_eq!(split_field_list("the email, your password and phone"), vec!["email", "password", "phone"]);
        assert_eq!(split_field_list("e-mail / submit button"), vec!["email"]);
        assert_eq!(split_field_list("imię i nazwisko"), vec!["imię", "nazwisko"]);
        assert_eq!(split_field_list("Name I Email"), vec!["name i email"]);
    }

    #[test]
    fn test_duplicate_names_get_suffixes() {
        let dsl = parse_prompt_to_ui_dsl("form with: name, Name!, first name, first-name");
        let names: Vec<&str> = dsl.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["name", "firstName", "firstName2"]);
    }

    proptest! {
        #[test]
        fn prop_parser_never_panics_and_names_are_identifiers(text in "\\PC{0,120}") {
            let dsl = parse_prompt_to_ui_dsl(&text);
            prop_assert!(!dsl.title.is_empty());
            for field in &dsl.fields {
                prop_assert!(crate::escape::is_js_identifier(&field.name));
            }
            prop_assert!(dsl.actions.len() <= 2);
        }
    }
}
