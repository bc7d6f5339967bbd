//! Structural shape checks over raw JSON node documents.
//!
//! Runs before any typed deserialization so every shape problem in a document
//! is reported at once, each with a JSON pointer. Unknown keys are ignored.

use serde_json::{Map, Value};

use crate::diagnostics::{pointer_index, pointer_push, Diagnostic, SCHEMA_VALIDATION_ERROR};
use crate::node::{
    is_uuid_v4, Align, ChartType, DataSource, Direction, Justify, NodeKind,
    SectionPayload, Side, Spacing, TWO_COLUMN_RATIOS,
};

const ARIA_LIVE: &[&str] = &["off", "polite", "assertive"];
const HTTP_METHODS: &[&str] = &["GET", "POST"];

pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Collects shape diagnostics for a node subtree.
#[derive(Default)]
pub(crate) struct ShapeChecker {
    pub diagnostics: Vec<Diagnostic>,
}

impl ShapeChecker {
    pub fn new() -> Self {
        Self::default()
    }

    fn fail(&mut self, path: &str, message: String) {
        self.diagnostics
            .push(Diagnostic::error(SCHEMA_VALIDATION_ERROR, message, path));
    }

    fn expected(&mut self, path: &str, expected: &str, got: &Value) {
        self.fail(
            path,
            format!("Expected {}, received {}", expected, type_name(got)),
        );
    }

    fn required<'v>(&mut self, obj: &'v Map<String, Value>, key: &str, path: &str) -> Option<&'v Value> {
        let value = obj.get(key);
        if value.is_none() {
            self.fail(&pointer_push(path, key), format!("Required field \"{}\" is missing", key));
        }
        value
    }

    fn optional_string(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        if let Some(v) = obj.get(key) {
            if !v.is_string() {
                self.expected(&pointer_push(path, key), "string", v);
            }
        }
    }

    fn required_string(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        if let Some(v) = self.required(obj, key, path) {
            match v.as_str() {
                Some(s) if !s.trim().is_empty() => {}
                Some(_) => self.fail(&pointer_push(path, key), "String must not be empty".to_string()),
                None => self.expected(&pointer_push(path, key), "string", v),
            }
        }
    }

    fn optional_bool(&mut self, obj: &Map<String, Value>, key: &str, path: &str) {
        if let Some(v) = obj.get(key) {
            if !v.is_boolean() {
                self.expected(&pointer_push(path, key), "boolean", v);
            }
        }
    }

    fn optional_enum(&mut self, obj: &Map<String, Value>, key: &str, allowed: &[&str], path: &str) {
        if let Some(v) = obj.get(key) {
            self.enum_value(v, allowed, &pointer_push(path, key));
        }
    }

    fn enum_value(&mut self, value: &Value, allowed: &[&str], path: &str) -> bool {
        match value.as_str() {
            Some(s) if allowed.contains(&s) => true,
            Some(s) => {
                self.fail(
                    path,
                    format!(
                        "Invalid enum value. Expected {}, received '{}'",
                        allowed
                            .iter()
                            .map(|a| format!("'{}'", a))
                            .collect::<Vec<_>>()
                            .join(" | "),
                        s
                    ),
                );
                false
            }
            None => {
                self.expected(path, "string", value);
                false
            }
        }
    }

    fn optional_object<'v>(&mut self, obj: &'v Map<String, Value>, key: &str, path: &str) -> Option<&'v Map<String, Value>> {
        let v = obj.get(key)?;
        match v.as_object() {
            Some(o) => Some(o),
            None => {
                self.expected(&pointer_push(path, key), "object", v);
                None
            }
        }
    }

    fn optional_array<'v>(&mut self, obj: &'v Map<String, Value>, key: &str, path: &str) -> Option<&'v Vec<Value>> {
        let v = obj.get(key)?;
        match v.as_array() {
            Some(a) => Some(a),
            None => {
                self.expected(&pointer_push(path, key), "array", v);
                None
            }
        }
    }

    // ───────────────────────────────────────────────────────────────────────────
    // Nodes
    // ───────────────────────────────────────────────────────────────────────────

    /// Checks one node and everything below it. Returns the node kind when the
    /// discriminant itself was readable.
    pub fn check_node(&mut self, value: &Value, path: &str) -> Option<NodeKind> {
        let Some(obj) = value.as_object() else {
            self.expected(path, "node object", value);
            return None;
        };

        let type_path = pointer_push(path, "type");
        let kind = match obj.get("type") {
            None => {
                self.fail(&type_path, "Required field \"type\" is missing".to_string());
                None
            }
            Some(Value::String(tag)) => {
                let kind = NodeKind::from_tag(tag);
                if kind.is_none() {
                    let names: Vec<&str> = NodeKind::ALL.iter().map(|k| k.as_str()).collect();
                    self.enum_value(&Value::String(tag.clone()), &names, &type_path);
                }
                kind
            }
            Some(other) => {
                self.expected(&type_path, "string", other);
                None
            }
        };

        self.check_envelope(obj, path);

        // Without a discriminant the variant-specific fields are unknowable.
        let kind = kind?;
        match kind {
            NodeKind::Page => {
                self.optional_string(obj, "title", path);
                if let Some(sources) = self.optional_array(obj, "dataSources", path) {
                    let base = pointer_push(path, "dataSources");
                    for (i, source) in sources.iter().enumerate() {
                        self.check_data_source(source, &pointer_index(&base, i));
                    }
                }
            }
            NodeKind::Section => {
                self.optional_string(obj, "title", path);
                if let Some(payload) = self.optional_object(obj, "payload", path) {
                    self.check_payload(payload, &pointer_push(path, "payload"));
                }
            }
            NodeKind::Grid => {
                if let Some(columns) = self.required(obj, "columns", path) {
                    let columns_path = pointer_push(path, "columns");
                    match columns.as_u64() {
                        Some(n) if (1..=12).contains(&n) => {}
                        Some(n) => self.fail(
                            &columns_path,
                            format!("Grid columns must be between 1 and 12, received {}", n),
                        ),
                        None => self.expected(&columns_path, "integer", columns),
                    }
                }
            }
            NodeKind::Stack => self.optional_enum(obj, "direction", Direction::NAMES, path),
            NodeKind::TwoColumn => self.optional_enum(obj, "ratio", TWO_COLUMN_RATIOS, path),
            NodeKind::Sidebar => {
                self.optional_enum(obj, "side", Side::NAMES, path);
                self.optional_string(obj, "width", path);
            }
            NodeKind::ThreeColumn | NodeKind::Block => {}
            NodeKind::Component => self.check_component(obj, path),
        }

        if kind.is_container() {
            if let Some(children) = self.optional_array(obj, "children", path) {
                let base = pointer_push(path, "children");
                for (i, child) in children.iter().enumerate() {
                    self.check_node(child, &pointer_index(&base, i));
                }
            }
        }

        Some(kind)
    }

    fn check_envelope(&mut self, obj: &Map<String, Value>, path: &str) {
        if let Some(id) = self.required(obj, "id", path) {
            let id_path = pointer_push(path, "id");
            match id.as_str() {
                Some(s) if is_uuid_v4(s) => {}
                Some(s) => self.fail(&id_path, format!("Invalid uuid: '{}'", s)),
                None => self.expected(&id_path, "string", id),
            }
        }

        self.optional_string(obj, "name", path);
        self.optional_string(obj, "testId", path);
        self.optional_string(obj, "dataUiId", path);

        if let Some(a11y) = self.optional_object(obj, "a11y", path) {
            let a11y_path = pointer_push(path, "a11y");
            for key in ["role", "label", "labelledBy", "describedBy"] {
                self.optional_string(a11y, key, &a11y_path);
            }
            self.optional_enum(a11y, "live", ARIA_LIVE, &a11y_path);
            self.optional_bool(a11y, "hidden", &a11y_path);
        }

        if let Some(layout) = self.optional_object(obj, "layout", path) {
            let layout_path = pointer_push(path, "layout");
            for key in ["width", "height", "maxWidth"] {
                self.optional_string(layout, key, &layout_path);
            }
            for key in ["padding", "margin", "gap"] {
                self.optional_enum(layout, key, Spacing::NAMES, &layout_path);
            }
            self.optional_enum(layout, "align", Align::NAMES, &layout_path);
            self.optional_enum(layout, "justify", Justify::NAMES, &layout_path);
        }
    }

    fn check_component(&mut self, obj: &Map<String, Value>, path: &str) {
        self.required_string(obj, "component", path);
        self.optional_object(obj, "props", path);
        self.optional_string(obj, "variant", path);

        if let Some(slots) = self.optional_object(obj, "slots", path) {
            let slots_path = pointer_push(path, "slots");
            for (slot, nodes) in slots {
                let slot_path = pointer_push(&slots_path, slot);
                match nodes.as_array() {
                    Some(nodes) => {
                        for (i, child) in nodes.iter().enumerate() {
                            self.check_node(child, &pointer_index(&slot_path, i));
                        }
                    }
                    None => self.expected(&slot_path, "array", nodes),
                }
            }
        }

        if let Some(bindings) = self.optional_array(obj, "bind", path) {
            let bind_path = pointer_push(path, "bind");
            for (i, binding) in bindings.iter().enumerate() {
                let binding_path = pointer_index(&bind_path, i);
                match binding.as_object() {
                    Some(b) => {
                        for key in ["sourceId", "path", "prop"] {
                            self.required_string(b, key, &binding_path);
                        }
                    }
                    None => self.expected(&binding_path, "object", binding),
                }
            }
        }
    }

    fn check_payload(&mut self, payload: &Map<String, Value>, path: &str) {
        let Some(kind) = self.required(payload, "kind", path) else {
            return;
        };
        if !self.enum_value(kind, SectionPayload::KINDS, &pointer_push(path, "kind")) {
            return;
        }
        self.required_string(payload, "dataSourceId", path);
        match kind.as_str() {
            Some("dataTable") => {
                if let Some(columns) = self.optional_array(payload, "columns", path) {
                    let columns_path = pointer_push(path, "columns");
                    for (i, column) in columns.iter().enumerate() {
                        if !column.is_string() {
                            self.expected(&pointer_index(&columns_path, i), "string", column);
                        }
                    }
                }
            }
            Some("chart") => {
                if let Some(chart) = self.required(payload, "chartType", path) {
                    self.enum_value(chart, ChartType::NAMES, &pointer_push(path, "chartType"));
                }
            }
            _ => {}
        }
    }

    fn check_data_source(&mut self, value: &Value, path: &str) {
        let Some(obj) = value.as_object() else {
            self.expected(path, "object", value);
            return;
        };
        self.required_string(obj, "id", path);
        let Some(kind) = self.required(obj, "type", path) else {
            return;
        };
        if !self.enum_value(kind, DataSource::KINDS, &pointer_push(path, "type")) {
            return;
        }
        match kind.as_str() {
            Some("placeholder") => self.optional_string(obj, "description", path),
            Some("static") => {
                self.required(obj, "data", path);
            }
            Some("url") => {
                self.required_string(obj, "url", path);
                self.optional_enum(obj, "method", HTTP_METHODS, path);
                if let Some(refresh) = obj.get("refreshMs") {
                    if refresh.as_u64().is_none() {
                        self.expected(&pointer_push(path, "refreshMs"), "non-negative integer", refresh);
                    }
                }
            }
            _ => {}
        }
    }
}
