//! Validator for UI-DSL node trees
//!
//! Two passes: a structural shape pass over the raw JSON (see `schema`), then,
//! only if the shape is sound, a registry pass over the typed tree. Neither pass
//! fails; every problem becomes a diagnostic in the returned result.

#[cfg(feature = "napi")]
use napi_derive::napi;
use rayon::prelude::*;
use serde_json::Value;

use crate::diagnostics::{
    pointer_index, pointer_push, Diagnostic, ValidationResult, INVALID_COMPONENT,
    INVALID_SLOT, INVALID_TYPE, INVALID_VARIANT, SCHEMA_VALIDATION_ERROR, UNKNOWN_ERROR,
    UNKNOWN_PROP,
};
use crate::node::{ComponentNode, Node};
use crate::registry::ComponentRegistry;
use crate::schema::{type_name, ShapeChecker};

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════════

/// Validates any node document against the taxonomy and the registry.
pub fn validate_node(node: &Value, registry: &ComponentRegistry) -> ValidationResult {
    let result = ValidationResult::from_diagnostics(check_document(node, registry, ""));
    tracing::debug!(
        valid = result.valid,
        diagnostics = result.diagnostics.len(),
        "validated node"
    );
    result
}

/// Validates a document that must be rooted at a `page` node.
pub fn validate_page(page: &Value, registry: &ComponentRegistry) -> ValidationResult {
    let Some(obj) = page.as_object() else {
        return ValidationResult::from_diagnostics(vec![Diagnostic::error(
            INVALID_TYPE,
            format!("Expected a page object, received {}", type_name(page)),
            "",
        )]);
    };

    let mut diagnostics = Vec::new();
    match obj.get("type").and_then(Value::as_str) {
        Some("page") => {}
        Some(other) => diagnostics.push(Diagnostic::error(
            SCHEMA_VALIDATION_ERROR,
            format!("Document root must be a page, received '{}'", other),
            "/type",
        )),
        // A missing or non-string discriminant is reported by the shape pass.
        None => {}
    }
    diagnostics.extend(check_document(page, registry, ""));

    let result = ValidationResult::from_diagnostics(diagnostics);
    tracing::debug!(
        valid = result.valid,
        diagnostics = result.diagnostics.len(),
        "validated page"
    );
    result
}

/// Registry checks for a tree that is already typed. Shape is guaranteed by the
/// type system, so only the registry pass runs.
pub fn validate_tree(node: &Node, registry: &ComponentRegistry) -> ValidationResult {
    let mut diagnostics = Vec::new();
    check_registry(node, registry, "", &mut diagnostics);
    ValidationResult::from_diagnostics(diagnostics)
}

/// Validates many documents in parallel. Results keep input order.
pub fn validate_batch(nodes: &[Value], registry: &ComponentRegistry) -> Vec<ValidationResult> {
    nodes
        .par_iter()
        .map(|node| validate_node(node, registry))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════════
// PASSES
// ═══════════════════════════════════════════════════════════════════════════════

fn check_document(value: &Value, registry: &ComponentRegistry, path: &str) -> Vec<Diagnostic> {
    let mut shape = ShapeChecker::new();
    shape.check_node(value, path);
    if !shape.diagnostics.is_empty() {
        return shape.diagnostics;
    }

    let node: Node = match serde_json::from_value(value.clone()) {
        Ok(node) => node,
        Err(e) => {
            tracing::warn!(error = %e, "shape pass accepted a document serde rejected");
            return vec![Diagnostic::error(
                UNKNOWN_ERROR,
                format!("Failed to read node tree: {}", e),
                path,
            )];
        }
    };

    let mut diagnostics = Vec::new();
    check_registry(&node, registry, path, &mut diagnostics);
    diagnostics
}

fn check_registry(node: &Node, registry: &ComponentRegistry, path: &str, out: &mut Vec<Diagnostic>) {
    if let Node::Component(component) = node {
        if !check_component(component, registry, path, out) {
            // Identity unknown: nothing below can be checked against it.
            return;
        }
    }

    for region in node.child_regions() {
        let region_path = region.pointer(path);
        for (i, child) in region.nodes.iter().enumerate() {
            check_registry(child, registry, &pointer_index(&region_path, i), out);
        }
    }
}

/// Returns false when the component is not in the registry.
fn check_component(
    component: &ComponentNode,
    registry: &ComponentRegistry,
    path: &str,
    out: &mut Vec<Diagnostic>,
) -> bool {
    let Some(entry) = registry.get(&component.component) else {
        out.push(Diagnostic::error(
            INVALID_COMPONENT,
            format!("Unknown component \"{}\".", component.component),
            pointer_push(path, "component"),
        ));
        return false;
    };

    if let Some(variant) = &component.variant {
        if !entry.allows_variant(variant) {
            out.push(Diagnostic::error(
                INVALID_VARIANT,
                format!(
                    "Variant \"{}\" is not defined for component \"{}\". Allowed: {}.",
                    variant,
                    component.component,
                    entry.variants.as_deref().unwrap_or_default().join(", ")
                ),
                pointer_push(path, "variant"),
            ));
        }
    }

    for slot in component.slots.keys() {
        if !entry.allows_slot(slot) {
            out.push(Diagnostic::error(
                INVALID_SLOT,
                format!(
                    "Slot \"{}\" is not defined for component \"{}\".",
                    slot, component.component
                ),
                pointer_push(&pointer_push(path, "slots"), slot),
            ));
        }
    }

    for prop in component.props.keys() {
        if entry.knows_prop(prop) == Some(false) {
            out.push(Diagnostic::warning(
                UNKNOWN_PROP,
                format!(
                    "Prop \"{}\" is not documented for component \"{}\".",
                    prop, component.component
                ),
                pointer_push(&pointer_push(path, "props"), prop),
            ));
        }
    }

    true
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI ENTRY POINTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
fn registry_from_value(registry: Value) -> Result<ComponentRegistry, ValidationResult> {
    serde_json::from_value(registry).map_err(|e| {
        ValidationResult::from_diagnostics(vec![Diagnostic::error(
            UNKNOWN_ERROR,
            format!("Failed to read registry: {}", e),
            "",
        )])
    })
}

#[cfg(feature = "napi")]
#[napi]
pub fn validate_node_native(node: Value, registry: Value) -> Value {
    let result = match registry_from_value(registry) {
        Ok(registry) => validate_node(&node, &registry),
        Err(result) => result,
    };
    serde_json::to_value(result).unwrap_or(Value::Null)
}

#[cfg(feature = "napi")]
#[napi]
pub fn validate_page_native(page: Value, registry: Value) -> Value {
    let result = match registry_from_value(registry) {
        Ok(registry) => validate_page(&page, &registry),
        Err(result) => result,
    };
    serde_json::to_value(result).unwrap_or(Value::Null)
}
