//! Bilingual (English / Polish) keyword tables used by the prompt parser.
//!
//! Every heuristic is an ordered table of named rules so the fallback order is
//! data, not control flow. Tables are scanned top to bottom; first match wins.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dsl::{DocumentType, FieldComponent, Scaffold, SelectOption};

// ═══════════════════════════════════════════════════════════════════════════════
// LANGUAGE
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Pl,
}

impl Language {
    pub fn pick(self, en: &'static str, pl: &'static str) -> &'static str {
        match self {
            Language::En => en,
            Language::Pl => pl,
        }
    }
}

lazy_static! {
    static ref POLISH_MARKERS: Regex = Regex::new(
        r"(?i)[ąćęłńśźż]|\b(?:formularz\w*|ekran\w*|aplikacj\w*|pol[ea]\b|polami|przycisk\w*|hasło|haslo|imi[eę]|nazwisko|zaloguj\w*|rejestracj\w*|ustawieni\w*|stwórz|utwórz|stworz|utworz|dodaj|wiadomo\w*|oraz)\b"
    )
    .unwrap();
}

pub fn detect_language(text: &str) -> Language {
    if POLISH_MARKERS.is_match(text) {
        Language::Pl
    } else {
        Language::En
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFIERS
// ═══════════════════════════════════════════════════════════════════════════════

pub struct ClassifyRule<T> {
    pub name: &'static str,
    pub value: T,
    pub pattern: Regex,
}

fn rule<T>(name: &'static str, value: T, pattern: &str) -> ClassifyRule<T> {
    ClassifyRule {
        name,
        value,
        pattern: Regex::new(pattern).unwrap(),
    }
}

/// First rule whose pattern matches `text`.
pub fn classify<'r, T>(rules: &'r [ClassifyRule<T>], text: &str) -> Option<&'r ClassifyRule<T>> {
    rules.iter().find(|r| r.pattern.is_match(text))
}

lazy_static! {
    pub static ref DOCUMENT_RULES: Vec<ClassifyRule<DocumentType>> = vec![
        rule("form", DocumentType::Form, r"(?i)\b(?:forms?\b|formularz\w*)"),
        rule(
            "screen",
            DocumentType::Screen,
            r"(?i)\b(?:screens?\b|pages?\b|views?\b|dashboard|ekran\w*|stron[aęy]\b|widok\w*|pulpit\w*)"
        ),
        rule("app", DocumentType::App, r"(?i)\b(?:apps?\b|application|aplikacj\w*)"),
    ];

    pub static ref SCAFFOLD_RULES: Vec<ClassifyRule<Scaffold>> = vec![
        rule(
            "form-auth",
            Scaffold::FormAuth,
            r"(?i)\b(?:log ?in\b|sign ?in\b|sign ?up\b|register|registration|auth\w*|logowani\w*|zaloguj\w*|rejestracj\w*|zarejestruj\w*|uwierzytelni\w*)"
        ),
        rule(
            "settings-page",
            Scaffold::SettingsPage,
            r"(?i)\b(?:settings|preferences|ustawieni\w*|preferencj\w*)"
        ),
        rule(
            "dashboard",
            Scaffold::Dashboard,
            r"(?i)\b(?:dashboard|analytics|overview|metrics|pulpit\w*|statystyk\w*)"
        ),
        rule(
            "two-column",
            Scaffold::TwoColumn,
            r"(?i)(?:\btwo[- ]columns?\b|\b2[- ]columns?\b|\bside by side\b|\bdwie kolumny\b|\bdwukolumnow\w*)"
        ),
    ];

    /// Registration-flavoured auth prompts get a sign-up title and button.
    pub static ref REGISTER_HINT: Regex = Regex::new(
        r"(?i)\b(?:sign ?up|register|registration|create (?:an )?account|rejestracj\w*|zarejestruj\w*|załóż konto|zaloz konto)"
    )
    .unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIELD KINDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Word-prefix keyword table: a keyword matches when it starts a word.
pub struct KeywordRule<T: 'static> {
    pub value: T,
    pub keywords: &'static [&'static str],
}

/// True when `keyword` occurs in `token` at the start of a word.
pub fn starts_word(token: &str, keyword: &str) -> bool {
    let mut from = 0;
    while let Some(pos) = token[from..].find(keyword) {
        let at = from + pos;
        let boundary = token[..at]
            .chars()
            .next_back()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        if boundary {
            return true;
        }
        from = at + keyword.len();
    }
    false
}

pub fn match_keywords<T: Copy>(rules: &[KeywordRule<T>], token: &str) -> Option<T> {
    rules
        .iter()
        .find(|r| r.keywords.iter().any(|k| starts_word(token, k)))
        .map(|r| r.value)
}

pub const COMPONENT_KEYWORDS: &[KeywordRule<FieldComponent>] = &[
    KeywordRule {
        value: FieldComponent::Checkbox,
        keywords: &[
            "terms", "agree", "accept", "consent", "newsletter", "subscribe", "remember", "opt-in",
            "opt in", "zgod", "akcept", "regulamin", "zapamiętaj", "zapamietaj", "subskryp",
        ],
    },
    KeywordRule {
        value: FieldComponent::DatePicker,
        keywords: &[
            "date", "birthday", "birth", "dob", "deadline", "data", "urodzin", "termin",
        ],
    },
    KeywordRule {
        value: FieldComponent::FileUpload,
        keywords: &[
            "file", "upload", "attachment", "avatar", "photo", "image", "resume", "cv",
            "document", "plik", "załącznik", "zalacznik", "zdjęci", "zdjeci", "dokument",
        ],
    },
    KeywordRule {
        value: FieldComponent::Select,
        keywords: &[
            "country", "select", "choose", "category", "gender", "role", "type", "state",
            "province", "size", "kraj", "wybierz", "kategori", "płeć", "plec", "rola",
            "województw", "wojewodztw", "rozmiar",
        ],
    },
    KeywordRule {
        value: FieldComponent::Textarea,
        keywords: &[
            "message", "comment", "description", "bio", "notes", "feedback", "details",
            "about", "wiadomo", "komentarz", "opis", "uwagi", "treść", "tresc",
        ],
    },
];

/// Semantic flavour of a field, driving placeholders and default rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProfile {
    Email,
    Password,
    Phone,
    Url,
    Numeric,
    Consent,
    Generic,
}

pub const PROFILE_KEYWORDS: &[KeywordRule<FieldProfile>] = &[
    KeywordRule {
        value: FieldProfile::Email,
        keywords: &["email", "e-mail", "mail"],
    },
    KeywordRule {
        value: FieldProfile::Password,
        keywords: &["password", "passcode", "hasło", "haslo"],
    },
    KeywordRule {
        value: FieldProfile::Phone,
        keywords: &["phone", "telephone", "tel", "mobile", "telefon", "komórk", "komork"],
    },
    KeywordRule {
        value: FieldProfile::Url,
        keywords: &["website", "url", "homepage", "www", "link"],
    },
    KeywordRule {
        value: FieldProfile::Numeric,
        keywords: &["age", "quantity", "amount", "zip", "postal", "wiek", "ilość", "ilosc", "liczba", "kod pocztowy"],
    },
    KeywordRule {
        value: FieldProfile::Consent,
        keywords: &["terms", "agree", "accept", "consent", "zgod", "akcept", "regulamin"],
    },
];

pub const PHONE_PATTERN: &str = r"^\+?[0-9\s()-]{7,}$";
pub const URL_PATTERN: &str = r"^https?://\S+$";
pub const NUMERIC_PATTERN: &str = r"^\d+$";

pub fn select_options(token: &str, language: Language) -> Vec<SelectOption> {
    let table: &[(&str, &str)] = if starts_word(token, "country") || starts_word(token, "kraj") {
        match language {
            Language::En => &[
                ("United States", "us"),
                ("United Kingdom", "uk"),
                ("Germany", "de"),
                ("Poland", "pl"),
            ],
            Language::Pl => &[
                ("Polska", "pl"),
                ("Niemcy", "de"),
                ("Wielka Brytania", "uk"),
                ("Stany Zjednoczone", "us"),
            ],
        }
    } else if starts_word(token, "gender") || starts_word(token, "płeć") || starts_word(token, "plec") {
        match language {
            Language::En => &[("Female", "female"), ("Male", "male"), ("Other", "other")],
            Language::Pl => &[("Kobieta", "female"), ("Mężczyzna", "male"), ("Inna", "other")],
        }
    } else if starts_word(token, "role") || starts_word(token, "rola") {
        match language {
            Language::En => &[("Admin", "admin"), ("Editor", "editor"), ("Viewer", "viewer")],
            Language::Pl => &[("Administrator", "admin"), ("Edytor", "editor"), ("Czytelnik", "viewer")],
        }
    } else {
        match language {
            Language::En => &[("Option 1", "option-1"), ("Option 2", "option-2"), ("Option 3", "option-3")],
            Language::Pl => &[("Opcja 1", "option-1"), ("Opcja 2", "option-2"), ("Opcja 3", "option-3")],
        }
    };
    table
        .iter()
        .map(|(label, value)| SelectOption::new(*label, *value))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// FIELD LIST NOISE
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    /// Separators inside an extracted field list. Polish `i` only in lower case.
    pub static ref LIST_SEPARATOR: Regex =
        Regex::new(r"\s*(?:,|;|/|&|\+|(?i:\band\b|\boraz\b)|\bi\b)\s*").unwrap();

    /// Leading determiners and trailing "field" words stripped from tokens.
    pub static ref TOKEN_NOISE: Regex = Regex::new(
        r"(?i)\b(?:a|an|the|your|their|user'?s?|optional|required|mandatory|wymagan\w*|opcjonaln\w*|fields?|inputs?|pol[ea]|polami|pól)\b"
    )
    .unwrap();

    /// Tokens describing actions or qualifiers rather than fields.
    pub static ref NON_FIELD_TOKEN: Regex = Regex::new(
        r"(?i)\b(?:button|buttons|przycisk\w*|submit|cancel|anuluj\w*|back|wstecz|link|layout|style|theme|color|colour|background|all|every|wszystkie)\b|\d"
    )
    .unwrap();
}

/// Canonical field tokens scanned for when no list rule matched.
pub const FIELD_DICTIONARY: &[&str] = &[
    r"(?i)\be-?mail\b",
    r"(?i)\b(?:password|hasło|hasla|haslo)\b",
    r"(?i)\b(?:phone(?: number)?|telephone|numer telefonu|telefon\w*)\b",
    r"(?i)\b(?:full name|first name|last name|username|name|imię|imie|nazwisko)\b",
    r"(?i)\b(?:message|wiadomość|wiadomosc)\b",
    r"(?i)\b(?:address|adres)\b",
    r"(?i)\b(?:city|miasto)\b",
    r"(?i)\b(?:country|kraj)\b",
    r"(?i)\b(?:date of birth|birth ?date|birthday|data urodzenia)\b",
    r"(?i)\b(?:company|firma)\b",
    r"(?i)\b(?:subject|temat)\b",
    r"(?i)\b(?:website|url)\b",
    r"(?i)\b(?:comments?|komentarz)\b",
    r"(?i)\b(?:terms|regulamin)\b",
    r"(?i)\bnewsletter\b",
    r"(?i)\b(?:attachment|file|plik|załącznik)\b",
];

lazy_static! {
    pub static ref FIELD_DICTIONARY_RULES: Vec<Regex> = FIELD_DICTIONARY
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect();
}

// ═══════════════════════════════════════════════════════════════════════════════
// QUALIFIERS
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    pub static ref REQUIRED_QUALIFIER: Regex = Regex::new(
        r"(?i)\b(?:required|mandatory|wymagan\w*|obowiązkow\w*|obowiazkow\w*)\b"
    )
    .unwrap();

    pub static ref MIN_LENGTH_QUALIFIER: Regex = Regex::new(
        r"(?i)(?:\bmin(?:imum)?\.?\s*(?:length\s*)?(?:of\s*)?|\bat least\s+|\bco najmniej\s+|\bminimum\s+)(\d{1,4})\s*(?:char\w*|letters|znak\w*)"
    )
    .unwrap();

    pub static ref MAX_LENGTH_QUALIFIER: Regex = Regex::new(
        r"(?i)(?:\bmax(?:imum)?\.?\s*(?:length\s*)?(?:of\s*)?|\bat most\s+|\bup to\s+|\bmaksymalnie\s+|\bnajwyżej\s+|\bnajwyzej\s+)(\d{1,5})\s*(?:char\w*|letters|znak\w*)"
    )
    .unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// ACTIONS
// ═══════════════════════════════════════════════════════════════════════════════

pub struct LabelRule {
    pub name: &'static str,
    pub pattern: Regex,
    pub en: &'static str,
    pub pl: &'static str,
}

fn label_rule(name: &'static str, pattern: &str, en: &'static str, pl: &'static str) -> LabelRule {
    LabelRule {
        name,
        pattern: Regex::new(pattern).unwrap(),
        en,
        pl,
    }
}

impl LabelRule {
    pub fn label(&self, language: Language) -> &'static str {
        language.pick(self.en, self.pl)
    }
}

lazy_static! {
    /// `button "Label"` / `"Label" button`, both languages.
    pub static ref QUOTED_BUTTON_LABEL: Vec<Regex> = vec![
        Regex::new(
            r#"(?i)\b(?:button|przycisk\w*)\s+(?:labell?ed\s+|saying\s+|with (?:the )?text\s+|called\s+|named\s+|z napisem\s+|z tekstem\s+|o treści\s+)?["“„']([^"”“'\n]{1,40})["”“']"#
        )
        .unwrap(),
        Regex::new(r#"(?i)["“„']([^"”“'\n]{1,40})["”“']\s+(?:button|przycisk)"#).unwrap(),
    ];

    pub static ref PRIMARY_ACTION_RULES: Vec<LabelRule> = vec![
        label_rule("login", r"(?i)\b(?:log ?in|sign ?in|zaloguj\w*|logowani\w*)", "Sign In", "Zaloguj się"),
        label_rule(
            "register",
            r"(?i)\b(?:sign ?up|register|registration|create (?:an )?account|rejestracj\w*|zarejestruj\w*|załóż konto)",
            "Create Account",
            "Zarejestruj się"
        ),
        label_rule("subscribe", r"(?i)\b(?:newsletter|subscribe|subskryb\w*|subskrypcj\w*)", "Subscribe", "Subskrybuj"),
        label_rule("contact", r"(?i)\b(?:contact|kontakt\w*)", "Send Message", "Wyślij wiadomość"),
        label_rule("search", r"(?i)\b(?:search|filter|szukaj|wyszukaj\w*|filtr\w*)", "Search", "Szukaj"),
        label_rule(
            "save",
            r"(?i)\b(?:save|settings|update|edit|profile|zapisz|ustawieni\w*|edytuj|profil\w*)",
            "Save Changes",
            "Zapisz zmiany"
        ),
        label_rule(
            "checkout",
            r"(?i)\b(?:checkout|pay|payment|order|zamów\w*|zamow\w*|zapłać|zaplac|płatnoś\w*)",
            "Place Order",
            "Złóż zamówienie"
        ),
        label_rule("send", r"(?i)\b(?:send|wyślij|wyslij)", "Send", "Wyślij"),
        label_rule("submit", r"(?i)\b(?:submit|zatwierdź|zatwierdz)", "Submit", "Zatwierdź"),
    ];

    pub static ref SECONDARY_ACTION_RULES: Vec<LabelRule> = vec![
        label_rule("cancel", r"(?i)\b(?:cancel|anuluj\w*)", "Cancel", "Anuluj"),
        label_rule("back", r"(?i)\b(?:go back|back|previous|wstecz|powrót|powrot|cofnij)\b", "Back", "Wstecz"),
    ];
}

pub const DEFAULT_SUBMIT: (&str, &str) = ("Submit", "Wyślij");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_word() {
        assert!(starts_word("phone number", "phone"));
        assert!(starts_word("mobile phone", "phone"));
        assert!(!starts_word("hotel name", "tel"));
        assert!(!starts_word("update", "date"));
        assert!(starts_word("start date", "date"));
    }

    #[test]
    fn test_component_keywords_in_order() {
        assert_eq!(match_keywords(COMPONENT_KEYWORDS, "accept terms"), Some(FieldComponent::Checkbox));
        assert_eq!(match_keywords(COMPONENT_KEYWORDS, "birth date"), Some(FieldComponent::DatePicker));
        assert_eq!(match_keywords(COMPONENT_KEYWORDS, "country"), Some(FieldComponent::Select));
        assert_eq!(match_keywords(COMPONENT_KEYWORDS, "wiadomość"), Some(FieldComponent::Textarea));
        assert_eq!(match_keywords(COMPONENT_KEYWORDS, "email"), None);
    }

    #[test]
    fn test_language_detection() {
        assert_eq!(detect_language("formularz rejestracji z polami email i hasło"), Language::Pl);
        assert_eq!(detect_language("registration form with email and password"), Language::En);
    }

    #[test]
    fn test_first_scaffold_rule_wins() {
        let rule = classify(&SCAFFOLD_RULES, "login settings").unwrap();
        assert_eq!(rule.value, Scaffold::FormAuth);
        assert!(classify(&SCAFFOLD_RULES, "contact us").is_none());
    }
}
