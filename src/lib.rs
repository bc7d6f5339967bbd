//! # UI-DSL Compiler
//!
//! Turns a natural-language UI request into a validated, typed document and
//! then into React (TSX) source.
//!
//! ## Pipeline
//!
//! 1. **Parse**: `parse_prompt_to_ui_dsl` runs ordered, bilingual (English and
//!    Polish) heuristics over the prompt and produces a form-level `UiDsl`.
//!    It never fails; unrecognized input degrades to defaults.
//! 2. **Lower**: `lower_to_page` converts a `UiDsl` into the node taxonomy
//!    (`page › section › layout › component`).
//! 3. **Validate**: `validate_node` / `validate_page` check a JSON tree for
//!    structure and against an explicit `ComponentRegistry`. Problems are
//!    returned as `Diagnostic`s with JSON-pointer paths, never as errors.
//! 4. **Generate**: `generate_code_from_ui_dsl` emits a single React component.
//!
//! `compile_prompt` chains all four and only generates code for documents that
//! validate. Incremental edits are described by `Patch` documents, which
//! `validate_patch` checks for shape; applying them is up to the host through
//! `PatchApplier`.

#[cfg(feature = "napi")]
use napi_derive::napi;

pub mod cache;
pub mod codegen;
pub mod compile;
pub mod diagnostics;
pub mod dsl;
pub mod error;
pub mod escape;
pub mod lexicon;
pub mod lower;
pub mod node;
pub mod patch;
pub mod prompt;
pub mod registry;
mod schema;
pub mod validate;

#[cfg(test)]
mod codegen_tests;
#[cfg(test)]
mod patch_tests;
#[cfg(test)]
mod pipeline_tests;
#[cfg(test)]
mod prompt_tests;

pub use cache::{fingerprint, generate_cached, CodegenCache};
pub use codegen::{generate_code_from_ui_dsl, generate_code_with_options, GeneratorOptions};
pub use compile::{compile_dsl, compile_prompt, verify_generated_source, CompileOptions, CompileOutput};
pub use diagnostics::{Diagnostic, Level, ValidationResult};
pub use dsl::UiDsl;
pub use error::{DslError, Result};
pub use lower::lower_to_page;
pub use node::{Node, NodeId, NodeKind};
pub use patch::{locate_target, validate_patch, Patch, PatchApplier, PatchFailure, PatchOp};
pub use prompt::{parse_prompt_to_ui_dsl, parse_prompt_with_report, ParseOutcome, ParseReport};
pub use registry::{ComponentRegistry, RegistryEntry};
pub use validate::{validate_batch, validate_node, validate_page, validate_tree};

#[cfg(feature = "napi")]
pub use codegen::generate_code_native;
#[cfg(feature = "napi")]
pub use compile::compile_prompt_native;
#[cfg(feature = "napi")]
pub use patch::validate_patch_native;
#[cfg(feature = "napi")]
pub use prompt::parse_prompt_native;
#[cfg(feature = "napi")]
pub use validate::{validate_node_native, validate_page_native};

#[cfg(feature = "napi")]
#[napi]
pub fn compile_bridge() -> String {
    "UI-DSL Native Bridge Connected".to_string()
}
