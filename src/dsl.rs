//! Form-level UI-DSL document
//!
//! The document the prompt parser produces and the code generator consumes:
//! a `form` / `screen` / `app` with a flat list of fields and actions.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Form,
    Screen,
    App,
}

impl DocumentType {
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Form => "form",
            DocumentType::Screen => "screen",
            DocumentType::App => "app",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Scaffold {
    FormAuth,
    SettingsPage,
    Dashboard,
    TwoColumn,
}

impl Scaffold {
    pub fn as_str(self) -> &'static str {
        match self {
            Scaffold::FormAuth => "form-auth",
            Scaffold::SettingsPage => "settings-page",
            Scaffold::Dashboard => "dashboard",
            Scaffold::TwoColumn => "two-column",
        }
    }
}

/// Control kind of a form field. Names match registry components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldComponent {
    Input,
    Textarea,
    Select,
    Checkbox,
    DatePicker,
    FileUpload,
}

impl FieldComponent {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldComponent::Input => "Input",
            FieldComponent::Textarea => "Textarea",
            FieldComponent::Select => "Select",
            FieldComponent::Checkbox => "Checkbox",
            FieldComponent::DatePicker => "DatePicker",
            FieldComponent::FileUpload => "FileUpload",
        }
    }

    /// Text-valued controls, the ones length rules make sense for.
    pub fn is_textual(self) -> bool {
        matches!(self, FieldComponent::Input | FieldComponent::Textarea)
    }
}

impl fmt::Display for FieldComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One validation rule attached to a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ValidationRule {
    Required {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Email {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    MinLength {
        value: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    MaxLength {
        value: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// `value` is regex source text, not a literal.
    Pattern {
        value: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl ValidationRule {
    pub fn required() -> Self {
        ValidationRule::Required { message: None }
    }

    pub fn email() -> Self {
        ValidationRule::Email { message: None }
    }

    pub fn min_length(value: u32) -> Self {
        ValidationRule::MinLength { value, message: None }
    }

    pub fn max_length(value: u32) -> Self {
        ValidationRule::MaxLength { value, message: None }
    }

    pub fn pattern(value: impl Into<String>) -> Self {
        ValidationRule::Pattern {
            value: value.into(),
            message: None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ValidationRule::Required { .. } => "required",
            ValidationRule::Email { .. } => "email",
            ValidationRule::MinLength { .. } => "minLength",
            ValidationRule::MaxLength { .. } => "maxLength",
            ValidationRule::Pattern { .. } => "pattern",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationRule::Required { message }
            | ValidationRule::Email { message }
            | ValidationRule::MinLength { message, .. }
            | ValidationRule::MaxLength { message, .. }
            | ValidationRule::Pattern { message, .. } => message.as_deref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    /// Form-state key; a valid identifier.
    pub name: String,
    pub label: String,
    pub component: FieldComponent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helper_text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation: Vec<ValidationRule>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl Field {
    pub fn new(name: impl Into<String>, label: impl Into<String>, component: FieldComponent) -> Self {
        let name = name.into();
        Self {
            id: format!("field-{}", name),
            name,
            label: label.into(),
            component,
            placeholder: None,
            helper_text: None,
            validation: Vec::new(),
            options: Vec::new(),
            default_value: None,
        }
    }

    pub fn is_required(&self) -> bool {
        self.validation
            .iter()
            .any(|r| matches!(r, ValidationRule::Required { .. }))
    }

    pub fn has_rule(&self, type_name: &str) -> bool {
        self.validation.iter().any(|r| r.type_name() == type_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionType {
    Submit,
    Button,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionVariant {
    Primary,
    Secondary,
    Outline,
    Ghost,
    Destructive,
    Link,
}

impl ActionVariant {
    /// Registry variant name of the `Button` component.
    pub fn button_variant(self) -> &'static str {
        match self {
            ActionVariant::Primary => "default",
            ActionVariant::Secondary => "secondary",
            ActionVariant::Outline => "outline",
            ActionVariant::Ghost => "ghost",
            ActionVariant::Destructive => "destructive",
            ActionVariant::Link => "link",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub variant: ActionVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Action {
    pub fn submit(label: impl Into<String>) -> Self {
        Self {
            id: "action-submit".to_string(),
            label: label.into(),
            action_type: ActionType::Submit,
            variant: ActionVariant::Primary,
            href: None,
        }
    }

    pub fn secondary(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            action_type: ActionType::Button,
            variant: ActionVariant::Outline,
            href: None,
        }
    }
}

/// The form-level document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiDsl {
    #[serde(rename = "type")]
    pub doc_type: DocumentType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scaffold: Option<Scaffold>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl UiDsl {
    pub fn new(doc_type: DocumentType, title: impl Into<String>) -> Self {
        Self {
            doc_type,
            title: title.into(),
            description: None,
            scaffold: None,
            fields: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}
