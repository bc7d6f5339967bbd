//! Patch Protocol
//!
//! Vocabulary and shape checks for incremental edits to a node tree. Applying a
//! patch belongs to the host; `PatchApplier` is the seam it plugs into.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::diagnostics::{Diagnostic, ValidationResult, PATCH_VALIDATION_ERROR};
use crate::node::{is_uuid_v4, Node, NodeId};
use crate::schema::type_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PatchOp {
    SetProp,
    SetCopy,
    ToggleVariant,
    AddNode,
    RemoveNode,
    MoveNode,
    WrapWith,
    Reorder,
    Rename,
    SetToken,
    SetBinding,
    SetDataSource,
}

impl PatchOp {
    pub const ALL: [PatchOp; 12] = [
        PatchOp::SetProp,
        PatchOp::SetCopy,
        PatchOp::ToggleVariant,
        PatchOp::AddNode,
        PatchOp::RemoveNode,
        PatchOp::MoveNode,
        PatchOp::WrapWith,
        PatchOp::Reorder,
        PatchOp::Rename,
        PatchOp::SetToken,
        PatchOp::SetBinding,
        PatchOp::SetDataSource,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PatchOp::SetProp => "setProp",
            PatchOp::SetCopy => "setCopy",
            PatchOp::ToggleVariant => "toggleVariant",
            PatchOp::AddNode => "addNode",
            PatchOp::RemoveNode => "removeNode",
            PatchOp::MoveNode => "moveNode",
            PatchOp::WrapWith => "wrapWith",
            PatchOp::Reorder => "reorder",
            PatchOp::Rename => "rename",
            PatchOp::SetToken => "setToken",
            PatchOp::SetBinding => "setBinding",
            PatchOp::SetDataSource => "setDataSource",
        }
    }
}

impl fmt::Display for PatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PatchOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PatchOp::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| format!("unknown patch op '{}'", s))
    }
}

/// One atomic edit intent targeting a single node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patch {
    pub target_id: NodeId,
    pub op: PatchOp,
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl Patch {
    pub fn new(target_id: NodeId, op: PatchOp) -> Self {
        Self {
            target_id,
            op,
            args: Map::new(),
        }
    }

    pub fn arg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.args.insert(key.into(), value.into());
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SHAPE VALIDATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Shape-only check of a patch document. Does not look at any tree.
pub fn validate_patch(patch: &Value) -> ValidationResult {
    let Some(obj) = patch.as_object() else {
        return ValidationResult::from_diagnostics(vec![Diagnostic::error(
            PATCH_VALIDATION_ERROR,
            format!("Expected a patch object, received {}", type_name(patch)),
            "",
        )]);
    };

    let mut diagnostics = Vec::new();

    match obj.get("targetId") {
        None => diagnostics.push(Diagnostic::error(
            PATCH_VALIDATION_ERROR,
            "Required field \"targetId\" is missing",
            "/targetId",
        )),
        Some(Value::String(id)) if is_uuid_v4(id) => {}
        Some(Value::String(id)) => diagnostics.push(Diagnostic::error(
            PATCH_VALIDATION_ERROR,
            format!("Invalid uuid: '{}'", id),
            "/targetId",
        )),
        Some(other) => diagnostics.push(Diagnostic::error(
            PATCH_VALIDATION_ERROR,
            format!("Expected string, received {}", type_name(other)),
            "/targetId",
        )),
    }

    match obj.get("op") {
        None => diagnostics.push(Diagnostic::error(
            PATCH_VALIDATION_ERROR,
            "Required field \"op\" is missing",
            "/op",
        )),
        Some(Value::String(op)) if op.parse::<PatchOp>().is_ok() => {}
        Some(other) => diagnostics.push(Diagnostic::error(
            PATCH_VALIDATION_ERROR,
            format!(
                "Invalid enum value. Expected one of {}, received {}",
                PatchOp::ALL.map(PatchOp::as_str).join(", "),
                other
            ),
            "/op",
        )),
    }

    match obj.get("args") {
        None => diagnostics.push(Diagnostic::error(
            PATCH_VALIDATION_ERROR,
            "Required field \"args\" is missing",
            "/args",
        )),
        Some(Value::Object(_)) => {}
        Some(other) => diagnostics.push(Diagnostic::error(
            PATCH_VALIDATION_ERROR,
            format!("Expected object, received {}", type_name(other)),
            "/args",
        )),
    }

    ValidationResult::from_diagnostics(diagnostics)
}

// ═══════════════════════════════════════════════════════════════════════════════
// APPLICATION SEAM
// ═══════════════════════════════════════════════════════════════════════════════

/// Why an applier refused a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "reason", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum PatchFailure {
    #[error("target {target_id} not found")]
    TargetNotFound { target_id: NodeId },
    #[error("unsupported op {op}")]
    UnsupportedOp { op: PatchOp },
    #[error("invalid args: {message}")]
    InvalidArgs { message: String },
    /// The edited tree no longer validates.
    #[error("patched tree is invalid ({} diagnostics)", .diagnostics.len())]
    InvalidResult { diagnostics: Vec<Diagnostic> },
    #[error("conflict: {message}")]
    Conflict { message: String },
}

/// Host-provided patch application. Receives a validated tree and a validated
/// patch and returns a new tree; the input tree is never mutated.
pub trait PatchApplier {
    fn apply(&self, tree: &Node, patch: &Patch) -> Result<Node, PatchFailure>;
}

/// Read-only lookup of the node a patch targets.
pub fn locate_target<'a>(tree: &'a Node, patch: &Patch) -> Option<&'a Node> {
    tree.find(patch.target_id)
}

#[cfg(feature = "napi")]
#[napi]
pub fn validate_patch_native(patch: Value) -> Value {
    serde_json::to_value(validate_patch(&patch)).unwrap_or(Value::Null)
}
