//! End-to-end pipeline: prompt → `UiDsl` → node tree → validation → TSX.
//!
//! Code is only generated for documents whose lowered tree validates, so hosts
//! never receive source built from an unchecked parse.

#[cfg(feature = "napi")]
use napi_derive::napi;
use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use serde::{Deserialize, Serialize};

use crate::codegen::{generate_code_with_options, GeneratorOptions};
use crate::diagnostics::{Diagnostic, ValidationResult, CODEGEN_SYNTAX_ERROR, UNKNOWN_ERROR};
use crate::dsl::UiDsl;
use crate::lower::lower_to_page;
use crate::node::Node;
use crate::prompt::{parse_prompt_with_report, ParseReport};
use crate::registry::ComponentRegistry;
use crate::validate::validate_page;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    pub generator: GeneratorOptions,
    /// Re-parse generated source and report syntax errors.
    pub verify_syntax: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            generator: GeneratorOptions::default(),
            verify_syntax: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileOutput {
    pub dsl: UiDsl,
    pub page: Node,
    pub validation: ValidationResult,
    /// Present iff `validation.valid`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub report: ParseReport,
}

pub fn compile_prompt(text: &str, registry: &ComponentRegistry, options: &CompileOptions) -> CompileOutput {
    let outcome = parse_prompt_with_report(text);
    let (page, validation, code) = compile_dsl(&outcome.dsl, registry, options);
    CompileOutput {
        dsl: outcome.dsl,
        page,
        validation,
        code,
        report: outcome.report,
    }
}

/// Lowers, validates and, when valid, generates a document.
pub fn compile_dsl(
    dsl: &UiDsl,
    registry: &ComponentRegistry,
    options: &CompileOptions,
) -> (Node, ValidationResult, Option<String>) {
    let page = lower_to_page(dsl);
    let mut validation = match serde_json::to_value(&page) {
        Ok(value) => validate_page(&value, registry),
        Err(e) => ValidationResult::from_diagnostics(vec![Diagnostic::error(
            UNKNOWN_ERROR,
            format!("Failed to serialize lowered page: {}", e),
            "",
        )]),
    };

    if !validation.valid {
        tracing::debug!(
            errors = validation.errors().count(),
            "lowered page failed validation; skipping codegen"
        );
        return (page, validation, None);
    }

    let code = generate_code_with_options(dsl, &options.generator);
    if options.verify_syntax {
        let syntax = verify_generated_source(&code);
        if !syntax.is_empty() {
            tracing::warn!(errors = syntax.len(), "generated source does not parse");
            validation = validation.merge(ValidationResult::from_diagnostics(syntax));
            return (page, validation, None);
        }
    }
    (page, validation, Some(code))
}

/// Parses TSX source and reports every syntax error as a diagnostic.
pub fn verify_generated_source(code: &str) -> Vec<Diagnostic> {
    let allocator = Allocator::default();
    let source_type = SourceType::default()
        .with_module(true)
        .with_typescript(true)
        .with_jsx(true);
    let ret = Parser::new(&allocator, code, source_type).parse();
    ret.errors
        .iter()
        .map(|e| Diagnostic::error(CODEGEN_SYNTAX_ERROR, e.to_string(), ""))
        .collect()
}

#[cfg(feature = "napi")]
#[napi]
pub fn compile_prompt_native(text: String, options: Option<serde_json::Value>) -> napi::Result<serde_json::Value> {
    let options: CompileOptions = match options {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| napi::Error::from_reason(format!("Invalid compile options: {}", e)))?,
        None => CompileOptions::default(),
    };
    let output = compile_prompt(&text, &ComponentRegistry::design_system(), &options);
    serde_json::to_value(output).map_err(|e| napi::Error::from_reason(e.to_string()))
}
