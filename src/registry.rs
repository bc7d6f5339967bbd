//! Component Registry
//!
//! Read-only catalog of the design-system components a tree may reference.
//! The registry is always passed explicitly; nothing in this crate keeps one
//! in a global.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::error::{DslError, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryA11y {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One registry component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub import: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<String>>,
    /// Known props, name to type description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub props: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a11y: Option<RegistryA11y>,
}

impl RegistryEntry {
    pub fn new(import: impl Into<String>) -> Self {
        Self {
            import: import.into(),
            ..Self::default()
        }
    }

    pub fn variants(mut self, variants: &[&str]) -> Self {
        self.variants = Some(variants.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn props(mut self, props: &[(&str, &str)]) -> Self {
        self.props = Some(
            props
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        );
        self
    }

    pub fn slots(mut self, slots: &[&str]) -> Self {
        self.slots = Some(slots.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn role(mut self, role: &str) -> Self {
        self.a11y = Some(RegistryA11y {
            role: Some(role.to_string()),
            notes: None,
        });
        self
    }

    /// A variant list restricts variants only when it is non-empty.
    pub fn allows_variant(&self, variant: &str) -> bool {
        match &self.variants {
            Some(list) if !list.is_empty() => list.iter().any(|v| v == variant),
            _ => true,
        }
    }

    /// Slots must be declared; an entry without a slot list accepts none.
    pub fn allows_slot(&self, slot: &str) -> bool {
        self.slots
            .as_ref()
            .map(|list| list.iter().any(|s| s == slot))
            .unwrap_or(false)
    }

    /// `None` when the entry does not describe its props at all.
    pub fn knows_prop(&self, prop: &str) -> Option<bool> {
        self.props.as_ref().map(|props| props.contains_key(prop))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRegistry {
    #[serde(default)]
    pub components: BTreeMap<String, RegistryEntry>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_component(mut self, name: impl Into<String>, entry: RegistryEntry) -> Self {
        self.components.insert(name.into(), entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<&RegistryEntry> {
        self.components.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads every `*.json` file below `dir`.
    ///
    /// A file with a top-level `components` object is merged as a whole
    /// registry; any other object is a single entry named after the file stem.
    /// Files that fail to parse are skipped with a warning.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(DslError::Registry(format!(
                "registry directory {} does not exist",
                dir.display()
            )));
        }

        let mut registry = ComponentRegistry::new();
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if path.is_file() && path.extension().map(|e| e == "json").unwrap_or(false) {
                files.push(path.to_path_buf());
            }
        }
        // Later files win on name clashes; sort for a stable winner.
        files.sort();

        for path in files {
            let source = fs::read_to_string(&path)?;
            let value: serde_json::Value = match serde_json::from_str(&source) {
                Ok(v) => v,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping malformed registry file");
                    continue;
                }
            };

            if value.get("components").map(|c| c.is_object()).unwrap_or(false) {
                match serde_json::from_value::<ComponentRegistry>(value) {
                    Ok(part) => registry.components.extend(part.components),
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "skipping malformed registry document")
                    }
                }
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            match serde_json::from_value::<RegistryEntry>(value) {
                Ok(entry) => {
                    registry.components.insert(name, entry);
                }
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "skipping malformed registry entry")
                }
            }
        }

        tracing::debug!(components = registry.len(), dir = %dir.display(), "loaded component registry");
        Ok(registry)
    }

    /// Catalog of the components the parser, lowering and generator emit.
    pub fn design_system() -> Self {
        const FIELD_PROPS: &[(&str, &str)] = &[
            ("name", "string"),
            ("label", "string"),
            ("placeholder", "string"),
            ("helperText", "string"),
            ("required", "boolean"),
            ("disabled", "boolean"),
            ("defaultValue", "unknown"),
        ];

        fn field(import: &str, extra: &[(&str, &str)]) -> RegistryEntry {
            let mut props: Vec<(&str, &str)> = FIELD_PROPS.to_vec();
            props.extend_from_slice(extra);
            RegistryEntry::new(import).props(&props)
        }

        ComponentRegistry::new()
            .with_component(
                "Button",
                RegistryEntry::new("@/components/ui/button")
                    .variants(&["default", "secondary", "outline", "ghost", "destructive", "link"])
                    .props(&[
                        ("label", "string"),
                        ("type", "\"submit\" | \"button\" | \"reset\""),
                        ("href", "string"),
                        ("disabled", "boolean"),
                        ("size", "\"default\" | \"sm\" | \"lg\" | \"icon\""),
                    ])
                    .role("button"),
            )
            .with_component(
                "Input",
                field("@/components/ui/input", &[("type", "string"), ("minLength", "number"), ("maxLength", "number"), ("pattern", "string")]),
            )
            .with_component(
                "Textarea",
                field("@/components/ui/textarea", &[("rows", "number"), ("minLength", "number"), ("maxLength", "number")]),
            )
            .with_component(
                "Select",
                field("@/components/ui/select", &[("options", "{ label: string; value: string }[]")]).role("combobox"),
            )
            .with_component("Checkbox", field("@/components/ui/checkbox", &[]).role("checkbox"))
            .with_component("DatePicker", field("@/components/ui/date-picker", &[]))
            .with_component("FileUpload", field("@/components/ui/file-upload", &[("accept", "string"), ("multiple", "boolean")]))
            .with_component(
                "Label",
                RegistryEntry::new("@/components/ui/label").props(&[("text", "string"), ("htmlFor", "string")]),
            )
            .with_component(
                "Heading",
                RegistryEntry::new("@/components/ui/heading")
                    .variants(&["h1", "h2", "h3"])
                    .props(&[("text", "string")])
                    .role("heading"),
            )
            .with_component(
                "Text",
                RegistryEntry::new("@/components/ui/text")
                    .variants(&["default", "muted"])
                    .props(&[("text", "string")]),
            )
            .with_component(
                "Card",
                RegistryEntry::new("@/components/ui/card")
                    .variants(&["default", "outline"])
                    .props(&[("title", "string"), ("description", "string")])
                    .slots(&["header", "content", "footer"]),
            )
            .with_component("Separator", RegistryEntry::new("@/components/ui/separator").props(&[]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_variant_restriction_requires_non_empty_list() {
        let open = RegistryEntry::new("x");
        assert!(open.allows_variant("anything"));

        let empty = RegistryEntry::new("x").variants(&[]);
        assert!(empty.allows_variant("anything"));

        let closed = RegistryEntry::new("x").variants(&["primary"]);
        assert!(closed.allows_variant("primary"));
        assert!(!closed.allows_variant("ghost"));
    }

    #[test]
    fn test_slot_list_is_required() {
        assert!(!RegistryEntry::new("x").allows_slot("footer"));
        assert!(RegistryEntry::new("x").slots(&["footer"]).allows_slot("footer"));
    }

    #[test]
    fn test_parse_registry_contract() {
        let json = r#"{
            "components": {
                "Button": {
                    "import": "@/components/ui/button",
                    "variants": ["default", "outline"],
                    "props": { "label": "string" },
                    "a11y": { "role": "button" }
                }
            }
        }"#;
        let registry = ComponentRegistry::from_json_str(json).unwrap();
        let button = registry.get("Button").unwrap();
        assert_eq!(button.knows_prop("label"), Some(true));
        assert_eq!(button.knows_prop("icon"), Some(false));
        assert_eq!(button.a11y.as_ref().unwrap().role.as_deref(), Some("button"));
    }

    #[test]
    fn test_load_dir_merges_documents_and_entries() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("core.json"),
            r#"{ "components": { "Button": { "import": "@/ui/button" } } }"#,
        )
        .unwrap();
        fs::create_dir(dir.path().join("forms")).unwrap();
        fs::write(
            dir.path().join("forms").join("Input.json"),
            r#"{ "import": "@/ui/input", "props": { "value": "string" } }"#,
        )
        .unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        fs::write(dir.path().join("README.md"), "ignored").unwrap();

        let registry = ComponentRegistry::load_dir(dir.path()).unwrap();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("Button"));
        assert_eq!(registry.get("Input").unwrap().import, "@/ui/input");
    }

    #[test]
    fn test_load_dir_missing_root_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            ComponentRegistry::load_dir(&missing),
            Err(DslError::Registry(_))
        ));
    }

    #[test]
    fn test_design_system_covers_field_components() {
        let registry = ComponentRegistry::design_system();
        for name in ["Input", "Textarea", "Select", "Checkbox", "DatePicker", "FileUpload", "Button", "Card"] {
            assert!(registry.contains(name), "missing {}", name);
        }
    }
}
