//! Diagnostic taxonomy shared by the validator, the patch checker and the
//! pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const SCHEMA_VALIDATION_ERROR: &str = "SCHEMA_VALIDATION_ERROR";
pub const INVALID_TYPE: &str = "INVALID_TYPE";
pub const INVALID_COMPONENT: &str = "INVALID_COMPONENT";
pub const INVALID_VARIANT: &str = "INVALID_VARIANT";
pub const INVALID_SLOT: &str = "INVALID_SLOT";
pub const UNKNOWN_PROP: &str = "UNKNOWN_PROP";
pub const PATCH_VALIDATION_ERROR: &str = "PATCH_VALIDATION_ERROR";
pub const UNKNOWN_ERROR: &str = "UNKNOWN_ERROR";
pub const CODEGEN_SYNTAX_ERROR: &str = "CODEGEN_SYNTAX_ERROR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn error(code: &str, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
            path: Some(path.into()),
            code: Some(code.to_string()),
        }
    }

    pub fn warning(code: &str, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
            path: Some(path.into()),
            code: Some(code.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == Level::Error
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level)?;
        if let Some(code) = &self.code {
            write!(f, " {}", code)?;
        }
        if let Some(path) = &self.path {
            write!(f, " at {}", if path.is_empty() { "/" } else { path })?;
        }
        write!(f, ": {}", self.message)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// VALIDATION RESULT
// ═══════════════════════════════════════════════════════════════════════════════

/// Outcome of a validation pass. `valid` is true iff no diagnostic is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        let valid = !diagnostics.iter().any(Diagnostic::is_error);
        Self { valid, diagnostics }
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == Level::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.level == Level::Warning)
    }

    pub fn with_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics.iter().filter(move |d| d.has_code(code))
    }

    /// Merges another result into this one, recomputing validity.
    pub fn merge(mut self, other: ValidationResult) -> Self {
        self.diagnostics.extend(other.diagnostics);
        Self::from_diagnostics(self.diagnostics)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// JSON POINTERS
// ═══════════════════════════════════════════════════════════════════════════════

/// Appends one reference token to a JSON pointer (RFC 6901 escaping).
/// The document root is the empty pointer.
pub fn pointer_push(base: &str, segment: &str) -> String {
    let escaped = segment.replace('~', "~0").replace('/', "~1");
    format!("{}/{}", base, escaped)
}

pub fn pointer_index(base: &str, index: usize) -> String {
    format!("{}/{}", base, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_escaping() {
        assert_eq!(pointer_push("", "children"), "/children");
        assert_eq!(pointer_push("/slots", "a/b~c"), "/slots/a~1b~0c");
        assert_eq!(pointer_index("/children", 2), "/children/2");
    }

    #[test]
    fn test_warnings_do_not_block() {
        let result = ValidationResult::from_diagnostics(vec![Diagnostic::warning(
            UNKNOWN_PROP,
            "unknown",
            "/props/x",
        )]);
        assert!(result.valid);
        assert_eq!(result.warnings().count(), 1);
    }

    #[test]
    fn test_display_root_path() {
        let d = Diagnostic::error(INVALID_TYPE, "expected an object", "");
        assert_eq!(d.to_string(), "[error] INVALID_TYPE at /: expected an object");
    }
}
