//! Prompt Parser
//!
//! Turns a free-text request into a form-level `UiDsl` document through an
//! ordered heuristic pipeline: sanitize, classify document type and scaffold,
//! extract title, fields and actions. The parser never fails; unrecognized
//! input degrades to defaults and the `ParseReport` says which rules fired.

#[cfg(feature = "napi")]
use napi_derive::napi;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::dsl::{
    Action, DocumentType, Field, FieldComponent, Scaffold, UiDsl, ValidationRule,
};
use crate::escape::is_js_identifier;
use crate::lexicon::{
    classify, detect_language, match_keywords, select_options, FieldProfile,
    Language, COMPONENT_KEYWORDS, DEFAULT_SUBMIT, DOCUMENT_RULES, FIELD_DICTIONARY_RULES,
    LIST_SEPARATOR, MAX_LENGTH_QUALIFIER, MIN_LENGTH_QUALIFIER, NON_FIELD_TOKEN,
    NUMERIC_PATTERN, PHONE_PATTERN, PRIMARY_ACTION_RULES, PROFILE_KEYWORDS,
    QUOTED_BUTTON_LABEL, REGISTER_HINT, REQUIRED_QUALIFIER, SCAFFOLD_RULES,
    SECONDARY_ACTION_RULES, TOKEN_NOISE, URL_PATTERN,
};

/// Plain-language words required before a code marker for the prompt to still
/// count as a request.
const MIN_PROSE_WORDS: usize = 4;
const MAX_TOKEN_WORDS: usize = 4;

// ═══════════════════════════════════════════════════════════════════════════════
// REPORT
// ═══════════════════════════════════════════════════════════════════════════════

/// What the heuristics decided. Output from a parse should be treated as low
/// confidence; the report tells a reviewer where it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseReport {
    pub language: Language,
    /// Fenced code or an edit lead-in was stripped.
    pub sanitized: bool,
    /// The prompt was mostly source code; fields and actions were left empty.
    pub code_like: bool,
    pub document_rule: Option<String>,
    pub scaffold_rule: Option<String>,
    pub title_rule: String,
    /// Rule that produced the fields, `None` when there are none.
    pub field_rule: Option<String>,
    pub action_rule: String,
    pub qualifiers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub dsl: UiDsl,
    pub report: ParseReport,
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

pub fn parse_prompt_to_ui_dsl(text: &str) -> UiDsl {
    parse_prompt_with_report(text).dsl
}

pub fn parse_prompt_with_report(text: &str) -> ParseOutcome {
    let sanitized = sanitize(text);
    let body = sanitized.text.as_str();
    let language = detect_language(body);

    let document = classify(&DOCUMENT_RULES, body);
    let doc_type = document.map(|r| r.value).unwrap_or(DocumentType::Form);
    let scaffold_rule = classify(&SCAFFOLD_RULES, body);
    let scaffold = scaffold_rule.map(|r| r.value);

    let mut report = ParseReport {
        language,
        sanitized: sanitized.stripped,
        code_like: sanitized.code_like,
        document_rule: document.map(|r| r.name.to_string()),
        scaffold_rule: scaffold_rule.map(|r| r.name.to_string()),
        title_rule: String::new(),
        field_rule: None,
        action_rule: String::new(),
        qualifiers: Vec::new(),
    };

    if sanitized.code_like {
        tracing::debug!("prompt looks like source code; returning an empty document");
        let mut dsl = UiDsl::new(doc_type, default_title(doc_type, language));
        dsl.scaffold = scaffold;
        report.title_rule = "document-default".to_string();
        report.action_rule = "none".to_string();
        return ParseOutcome { dsl, report };
    }

    let (title, title_rule) = extract_title(body, doc_type, scaffold, language);
    report.title_rule = title_rule.to_string();

    let (mut drafts, field_rule) = extract_fields(body, language);
    report.field_rule = field_rule.map(str::to_string);
    if drafts.is_empty() && scaffold == Some(Scaffold::FormAuth) {
        drafts = auth_template(language);
        report.field_rule = Some("auth-template".to_string());
    }
    if drafts.is_empty() {
        tracing::debug!("no fields recognized in prompt");
    }

    report.qualifiers = apply_qualifiers(body, &mut drafts);

    let (actions, action_rule) = extract_actions(body, language);
    report.action_rule = action_rule;

    let mut dsl = UiDsl::new(doc_type, title);
    dsl.scaffold = scaffold;
    dsl.description = description_for(scaffold, body, language);
    dsl.fields = drafts.into_iter().map(|d| d.field).collect();
    dsl.actions = actions;

    tracing::debug!(
        doc_type = doc_type.as_str(),
        fields = dsl.fields.len(),
        actions = dsl.actions.len(),
        field_rule = report.field_rule.as_deref().unwrap_or("none"),
        "parsed prompt"
    );
    ParseOutcome { dsl, report }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 1. SANITIZE
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    static ref FENCED_CODE: Regex = Regex::new(r"(?s)```.*?(?:```|\z)").unwrap();

    static ref EDIT_LEAD_INS: Vec<Regex> = vec![
        Regex::new(r"(?i)(?:please\s+)?(?:modify|update|change|edit)\s+(?:the\s+)?(?:existing|current)\s+component\s*[:.,]?").unwrap(),
        Regex::new(r"(?i)here\s+is\s+(?:the\s+)?(?:current|existing)\s+code\s*[:.]?").unwrap(),
        Regex::new(r"(?i)\b(?:current|existing)\s+code\s*:").unwrap(),
        Regex::new(r"(?i)zmodyfikuj\s+(?:istniejący|istniejacy|obecny|aktualny)\s+komponent\s*[:.,]?").unwrap(),
        Regex::new(r"(?i)oto\s+(?:obecny|aktualny|istniejący|istniejacy)\s+kod\s*[:.]?").unwrap(),
        Regex::new(r"(?i)\b(?:obecny|aktualny)\s+kod\s*:").unwrap(),
    ];

    static ref CODE_MARKER: Regex = Regex::new(
        r#"(?m)(?:^|\s)(?:import\s+["']|import\s+[\w${}*,\s]+?\bfrom\s*["']|export\s+(?:default\s+)?(?:function|const|class)\b|function\s+\w+\s*\(|const\s+\w+\s*=\s*\()"#
    )
    .unwrap();

    static ref WORD: Regex = Regex::new(r"\p{L}+").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Sanitized {
    pub text: String,
    pub stripped: bool,
    pub code_like: bool,
}

pub(crate) fn sanitize(text: &str) -> Sanitized {
    let mut out = FENCED_CODE.replace_all(text, " ").into_owned();
    for lead_in in EDIT_LEAD_INS.iter() {
        out = lead_in.replace_all(&out, " ").into_owned();
    }
    let stripped = out != text;

    let mut code_like = false;
    if let Some(marker) = CODE_MARKER.find(&out) {
        let prose = &out[..marker.start()];
        if WORD.find_iter(prose).count() < MIN_PROSE_WORDS {
            code_like = true;
        } else {
            out.truncate(marker.start());
        }
    }

    Sanitized {
        text: out.split_whitespace().collect::<Vec<_>>().join(" "),
        stripped,
        code_like,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 4. TITLE
// ═══════════════════════════════════════════════════════════════════════════════

struct TitleRule {
    name: &'static str,
    pattern: Regex,
}

lazy_static! {
    static ref TITLE_RULES: Vec<TitleRule> = vec![
        TitleRule {
            name: "quoted",
            pattern: Regex::new(
                r#"(?i)\b(?:titled|called|named|title|tytuł\w*|tytul\w*|nazwan\w*)\s*:?\s*["“„']([^"”“'\n]{1,60})["”“']"#
            )
            .unwrap(),
        },
        TitleRule {
            name: "noun-phrase",
            pattern: Regex::new(
                r"(?i)\b(?:form|screen|app|page|formularz\w*|ekran\w*|aplikacj\w*|stron[aęy])\s+(?:for|to|dla|do)\s+(?:a |an |the )?([\p{L}\p{N}' -]{2,40}?)(?:\s+(?:with|that|containing|including|which|where|z|ze|zawieraj\w*|który|która|które)\b|[,.;:!?]|$)"
            )
            .unwrap(),
        },
        TitleRule {
            name: "verb-phrase",
            pattern: Regex::new(
                r"(?i)\b(?:create|build|make|generate|design|stwórz|stworz|utwórz|utworz|zbuduj|zrób|zrob|wygeneruj|zaprojektuj)\s+(?:me\s+)?(?:(?:a|an|the|new|nowy|nową|nowa|nowe)\s+)*([\p{L}\p{N}' -]{2,40}?)(?:\s+(?:with|that|for|containing|including|z|ze|dla|zawieraj\w*)\b|[,.;:!?]|$)"
            )
            .unwrap(),
        },
        TitleRule {
            name: "leading-noun",
            pattern: Regex::new(
                r"(?i)^\s*(?:(?:a|an|the|simple|basic|prosty|prosta)\s+)*([\p{L}\p{N}' -]{0,30}?\b(?:form|screen|app|page|formularz\w*|ekran\w*|aplikacj\w*))\b"
            )
            .unwrap(),
        },
    ];
}

fn extract_title(
    text: &str,
    doc_type: DocumentType,
    scaffold: Option<Scaffold>,
    language: Language,
) -> (String, &'static str) {
    for rule in TITLE_RULES.iter() {
        let candidate = rule
            .pattern
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| title_case(m.as_str()))
            .unwrap_or_default();
        if !candidate.is_empty() {
            return (candidate, rule.name);
        }
    }

    let scaffold_title = match scaffold {
        Some(Scaffold::FormAuth) if REGISTER_HINT.is_match(text) => {
            Some(language.pick("Create Account", "Rejestracja"))
        }
        Some(Scaffold::FormAuth) => Some(language.pick("Sign In", "Logowanie")),
        Some(Scaffold::SettingsPage) => Some(language.pick("Settings", "Ustawienia")),
        Some(Scaffold::Dashboard) => Some(language.pick("Dashboard", "Pulpit")),
        Some(Scaffold::TwoColumn) | None => None,
    };
    match scaffold_title {
        Some(title) => (title.to_string(), "scaffold-default"),
        None => (default_title(doc_type, language).to_string(), "document-default"),
    }
}

fn default_title(doc_type: DocumentType, language: Language) -> &'static str {
    match doc_type {
        DocumentType::Form => language.pick("Form", "Formularz"),
        DocumentType::Screen => language.pick("Screen", "Ekran"),
        DocumentType::App => language.pick("App", "Aplikacja"),
    }
}

/// Collapses whitespace and upper-cases the first letter of every word.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn description_for(scaffold: Option<Scaffold>, text: &str, language: Language) -> Option<String> {
    match scaffold {
        Some(Scaffold::FormAuth) if REGISTER_HINT.is_match(text) => Some(
            language
                .pick("Create an account to get started.", "Utwórz konto, aby rozpocząć.")
                .to_string(),
        ),
        Some(Scaffold::FormAuth) => Some(
            language
                .pick("Enter your credentials to continue.", "Podaj dane logowania, aby kontynuować.")
                .to_string(),
        ),
        Some(Scaffold::SettingsPage) => Some(
            language
                .pick("Manage your account preferences.", "Zarządzaj ustawieniami konta.")
                .to_string(),
        ),
        _ => None,
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// 5. FIELDS
// ═══════════════════════════════════════════════════════════════════════════════

/// A field under construction together with its semantic profile.
#[derive(Debug, Clone)]
pub(crate) struct Draft {
    pub field: Field,
    pub profile: FieldProfile,
}

struct ListRule {
    name: &'static str,
    pattern: Regex,
    /// Keep only tokens that name a known kind of field.
    recognized_only: bool,
}

lazy_static! {
    static ref FIELD_LIST_RULES: Vec<ListRule> = vec![
        ListRule {
            name: "colon-list",
            pattern: Regex::new(
                r"(?i)(?:\bfields?|\binputs?|\bpola|\bpól|\bpole|\bcontaining|\bincluding|\bwith|\bz polami|\bzawieraj\w*)\s*:\s*([^.\n;]+)"
            )
            .unwrap(),
            recognized_only: false,
        },
        ListRule {
            name: "with-list",
            pattern: Regex::new(
                r"(?i)\b(?:with|containing|including|having|asking for|asks for|collects?|z polami|zawieraj\w*|ze|z)\s+(?:(?:the\s+)?fields?\s+|pola(?:mi)?\s+)?([^.\n;:]+)"
            )
            .unwrap(),
            recognized_only: false,
        },
        ListRule {
            name: "conjunction-list",
            // Polish `i` only in lower case, so English "I" never joins a list.
            pattern: Regex::new(r"((?:[\p{L}-]+\s*,\s*)*[\p{L}-]+\s+(?:(?i:and|oraz)|i)\s+[\p{L}-]+)").unwrap(),
            recognized_only: true,
        },
    ];
}

fn extract_fields(text: &str, language: Language) -> (Vec<Draft>, Option<&'static str>) {
    for rule in FIELD_LIST_RULES.iter() {
        let Some(list) = rule.pattern.captures(text).and_then(|c| c.get(1)) else {
            continue;
        };
        let mut tokens = split_field_list(list.as_str());
        if rule.recognized_only {
            tokens.retain(|t| is_known_field(t));
        }
        if !tokens.is_empty() {
            tracing::trace!(rule = rule.name, ?tokens, "field list matched");
            return (build_drafts(&tokens, language), Some(rule.name));
        }
    }

    let tokens = dictionary_scan(text);
    if tokens.is_empty() {
        (Vec::new(), None)
    } else {
        (build_drafts(&tokens, language), Some("dictionary"))
    }
}

pub(crate) fn split_field_list(list: &str) -> Vec<String> {
    // Quoted text after a list is a button or title label, never a field.
    let list = list.split(['"', '“', '„']).next().unwrap_or_default();
    LIST_SEPARATOR
        .split(list)
        .filter_map(clean_token)
        .collect()
}

fn clean_token(raw: &str) -> Option<String> {
    let lowered = raw.trim().to_lowercase();
    if lowered.is_empty() || NON_FIELD_TOKEN.is_match(&lowered) || MIN_LENGTH_QUALIFIER.is_match(&lowered) {
        return None;
    }
    let cleaned = TOKEN_NOISE.replace_all(&lowered, " ");
    let words: Vec<&str> = cleaned
        .split(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == '(' || c == ')')
        .filter(|w| !w.is_empty())
        .collect();
    if words.is_empty() || words.len() > MAX_TOKEN_WORDS {
        return None;
    }
    let token = words
        .join(" ")
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string();
    if token.is_empty() {
        return None;
    }
    if token == "e-mail" || token == "e mail" {
        return Some("email".to_string());
    }
    Some(token)
}

/// "login and registration" joins words, not fields; only keyword hits count.
fn is_known_field(token: &str) -> bool {
    match_keywords(COMPONENT_KEYWORDS, token).is_some()
        || match_keywords(PROFILE_KEYWORDS, token).is_some()
        || FIELD_DICTIONARY_RULES.iter().any(|re| re.is_match(token))
}

fn dictionary_scan(text: &str) -> Vec<String> {
    let mut hits: Vec<(usize, String)> = FIELD_DICTIONARY_RULES
        .iter()
        .filter_map(|re| re.find(text))
        .map(|m| (m.start(), m.as_str().to_lowercase()))
        .collect();
    hits.sort_by_key(|(pos, _)| *pos);
    hits.into_iter()
        .filter_map(|(_, token)| clean_token(&token))
        .collect()
}

fn auth_template(language: Language) -> Vec<Draft> {
    let tokens = [
        "email".to_string(),
        language.pick("password", "hasło").to_string(),
    ];
    build_drafts(&tokens, language)
}

fn build_drafts(tokens: &[String], language: Language) -> Vec<Draft> {
    let mut seen_tokens = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut drafts = Vec::new();
    for token in tokens {
        if !seen_tokens.insert(token.clone()) {
            continue;
        }
        let mut name = identifier_for(token);
        if seen_names.contains(&name) {
            let mut n = 2;
            while seen_names.contains(&format!("{}{}", name, n)) {
                n += 1;
            }
            name = format!("{}{}", name, n);
        }
        seen_names.insert(name.clone());
        drafts.push(build_draft(token, name, language));
    }
    drafts
}

fn build_draft(token: &str, name: String, language: Language) -> Draft {
    let component = match_keywords(COMPONENT_KEYWORDS, token).unwrap_or(FieldComponent::Input);
    let profile = match_keywords(PROFILE_KEYWORDS, token).unwrap_or(FieldProfile::Generic);
    let label = if token == "email" {
        "Email".to_string()
    } else {
        sentence_case(token)
    };
    let lower = label.to_lowercase();

    let mut field = Field::new(name, label, component);
    match component {
        FieldComponent::Input => match profile {
            FieldProfile::Email => {
                field.placeholder = Some(language.pick("you@example.com", "ty@przyklad.pl").to_string());
                field.helper_text = Some(
                    language
                        .pick("We'll never share your email.", "Nie udostępnimy Twojego adresu e-mail.")
                        .to_string(),
                );
                field.validation = vec![ValidationRule::required(), ValidationRule::email()];
            }
            FieldProfile::Password => {
                field.placeholder = Some(language.pick("Enter your password", "Wpisz hasło").to_string());
                field.helper_text = Some(language.pick("At least 8 characters.", "Co najmniej 8 znaków.").to_string());
                field.validation = vec![ValidationRule::required(), ValidationRule::min_length(8)];
            }
            FieldProfile::Phone => {
                field.placeholder = Some(language.pick("+1 555 000 0000", "+48 600 000 000").to_string());
                field.validation = vec![ValidationRule::pattern(PHONE_PATTERN)];
            }
            FieldProfile::Url => {
                field.placeholder = Some("https://example.com".to_string());
                field.validation = vec![ValidationRule::pattern(URL_PATTERN)];
            }
            FieldProfile::Numeric => {
                field.placeholder = Some("0".to_string());
                field.validation = vec![ValidationRule::pattern(NUMERIC_PATTERN)];
            }
            FieldProfile::Consent | FieldProfile::Generic => {
                field.placeholder = Some(match language {
                    Language::En => format!("Enter {}", lower),
                    Language::Pl => format!("Wpisz: {}", lower),
                });
            }
        },
        FieldComponent::Textarea => {
            field.placeholder = Some(match language {
                Language::En => format!("Type your {} here...", lower),
                Language::Pl => format!("Wpisz treść: {}...", lower),
            });
        }
        FieldComponent::Select => {
            field.placeholder = Some(match language {
                Language::En => format!("Select {}", lower),
                Language::Pl => format!("Wybierz: {}", lower),
            });
            field.options = select_options(token, language);
        }
        FieldComponent::Checkbox => {
            if profile == FieldProfile::Consent {
                field.validation = vec![ValidationRule::required()];
            }
        }
        FieldComponent::DatePicker => {
            field.placeholder = Some(language.pick("Pick a date", "Wybierz datę").to_string());
        }
        FieldComponent::FileUpload => {
            field.helper_text = Some(
                language
                    .pick("Maximum file size: 10 MB.", "Maksymalny rozmiar pliku: 10 MB.")
                    .to_string(),
            );
        }
    }

    Draft { field, profile }
}

fn sentence_case(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn fold_diacritic(c: char) -> char {
    match c {
        'ą' => 'a',
        'ć' => 'c',
        'ę' => 'e',
        'ł' => 'l',
        'ń' => 'n',
        'ó' => 'o',
        'ś' => 's',
        'ź' | 'ż' => 'z',
        other => other,
    }
}

/// camelCase ASCII identifier for a field token, e.g. `phone number` →
/// `phoneNumber`, `hasło` → `haslo`.
pub fn identifier_for(token: &str) -> String {
    let folded: String = token.to_lowercase().chars().map(fold_diacritic).collect();
    let mut ident = String::new();
    for (i, word) in folded
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .enumerate()
    {
        if i == 0 {
            ident.push_str(word);
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                ident.push(first.to_ascii_uppercase());
                ident.push_str(chars.as_str());
            }
        }
    }
    if ident.is_empty() {
        return "field".to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("field{}", ident);
    }
    if !is_js_identifier(&ident) {
        return format!("{}Field", ident);
    }
    ident
}

/// Applies prompt-wide qualifiers to every draft. Returns the qualifiers found.
fn apply_qualifiers(text: &str, drafts: &mut [Draft]) -> Vec<String> {
    let mut found = Vec::new();

    if REQUIRED_QUALIFIER.is_match(text) {
        found.push("required".to_string());
        for draft in drafts.iter_mut() {
            if !draft.field.is_required() {
                draft.field.validation.insert(0, ValidationRule::required());
            }
        }
    }

    if let Some(min) = capture_number(&MIN_LENGTH_QUALIFIER, text) {
        found.push(format!("minLength:{}", min));
        // A length mention usually concerns the password when there is one.
        let has_password = drafts.iter().any(|d| d.profile == FieldProfile::Password);
        for draft in drafts.iter_mut() {
            let targeted = if has_password {
                draft.profile == FieldProfile::Password
            } else {
                draft.field.component.is_textual()
            };
            if targeted {
                draft
                    .field
                    .validation
                    .retain(|r| !matches!(r, ValidationRule::MinLength { .. }));
                draft.field.validation.push(ValidationRule::min_length(min));
            }
        }
    }

    if let Some(max) = capture_number(&MAX_LENGTH_QUALIFIER, text) {
        found.push(format!("maxLength:{}", max));
        for draft in drafts.iter_mut().filter(|d| d.field.component.is_textual()) {
            draft
                .field
                .validation
                .retain(|r| !matches!(r, ValidationRule::MaxLength { .. }));
            draft.field.validation.push(ValidationRule::max_length(max));
        }
    }

    found
}

fn capture_number(pattern: &Regex, text: &str) -> Option<u32> {
    pattern
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

// ═══════════════════════════════════════════════════════════════════════════════
// 6. ACTIONS
// ═══════════════════════════════════════════════════════════════════════════════

fn extract_actions(text: &str, language: Language) -> (Vec<Action>, String) {
    let quoted = QUOTED_BUTTON_LABEL
        .iter()
        .find_map(|re| re.captures(text).and_then(|c| c.get(1)))
        .map(|m| m.as_str().trim().to_string())
        .filter(|label| !label.is_empty());

    let (label, rule) = match quoted {
        Some(label) => (label, "quoted".to_string()),
        None => match PRIMARY_ACTION_RULES.iter().find(|r| r.pattern.is_match(text)) {
            Some(r) => (r.label(language).to_string(), r.name.to_string()),
            None => (
                language.pick(DEFAULT_SUBMIT.0, DEFAULT_SUBMIT.1).to_string(),
                "default".to_string(),
            ),
        },
    };

    let mut actions = vec![Action::submit(label)];
    if let Some(secondary) = SECONDARY_ACTION_RULES.iter().find(|r| r.pattern.is_match(text)) {
        actions.push(Action::secondary(
            format!("action-{}", secondary.name),
            secondary.label(language),
        ));
    }
    (actions, rule)
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI ENTRY POINT
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn parse_prompt_native(text: String) -> serde_json::Value {
    serde_json::to_value(parse_prompt_with_report(&text)).unwrap_or(serde_json::Value::Null)
}
