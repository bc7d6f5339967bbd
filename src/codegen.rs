//! Codegen module for the UI-DSL compiler
//!
//! Generates a React (TSX) form component from a `UiDsl` document. Generation
//! is pure and deterministic: the same document and options always produce the
//! same source text. The input is assumed to be valid; nothing here reports
//! errors.

#[cfg(feature = "napi")]
use napi_derive::napi;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::dsl::{
    Action, ActionType, ActionVariant, DocumentType, Field, FieldComponent, Scaffold, UiDsl,
    ValidationRule,
};
use crate::escape::{
    escape_jsx_attribute, is_js_identifier, jsx_text, js_member, js_object_key,
    js_string_literal, kebab_case, pascal_case, regex_constructor,
};

// ═══════════════════════════════════════════════════════════════════════════════
// OPTIONS
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratorOptions {
    /// Exported component name. Derived from the title when absent.
    pub component_name: Option<String>,
    /// Module prefix of the design-system components.
    pub ui_import_base: String,
    pub use_client_directive: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            component_name: None,
            ui_import_base: "@/components/ui".to_string(),
            use_client_directive: true,
        }
    }
}

/// One `import { ... } from "..."` line of the generated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiImport {
    pub module: String,
    pub names: Vec<String>,
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLIC API
// ═══════════════════════════════════════════════════════════════════════════════

pub fn generate_code_from_ui_dsl(ir: &UiDsl) -> String {
    generate_code_with_options(ir, &GeneratorOptions::default())
}

pub fn generate_code_with_options(ir: &UiDsl, options: &GeneratorOptions) -> String {
    let mut w = Writer::default();

    if options.use_client_directive {
        w.line("\"use client\";");
        w.blank();
    }
    w.line("import { useState, type FormEvent } from \"react\";");
    for import in ui_imports(ir, options) {
        w.line(format!(
            "import {{ {} }} from {};",
            import.names.join(", "),
            js_string_literal(&import.module)
        ));
    }
    w.blank();

    emit_rule_types(&mut w);
    w.blank();
    emit_rule_table(&mut w, &ir.fields);
    w.blank();
    emit_validate_field(&mut w);
    w.blank();

    let name = component_name(ir, options);
    w.open(format!(
        "export default function {}({{ onSubmit }}: {{ onSubmit?: (values: FormValues) => void }}) {{",
        name
    ));
    emit_state(&mut w, &ir.fields);
    w.blank();
    emit_handlers(&mut w);
    w.blank();
    w.open("return (");
    emit_body(&mut w, ir);
    w.close(");");
    w.close("}");

    tracing::debug!(component = %name, fields = ir.fields.len(), "generated component source");
    w.finish()
}

/// Imports of design-system components, one entry per module, sorted by
/// module path with sorted, deduplicated names.
pub fn ui_imports(ir: &UiDsl, options: &GeneratorOptions) -> Vec<UiImport> {
    let mut names: BTreeSet<&'static str> = BTreeSet::new();

    for field in &ir.fields {
        names.insert("Label");
        names.extend(component_imports(field.component));
    }
    if !ir.actions.is_empty() {
        names.insert("Button");
    }
    match ir.scaffold {
        Some(Scaffold::FormAuth) => {
            names.extend(["Card", "CardContent", "CardFooter", "CardHeader", "CardTitle"]);
            if ir.description.is_some() {
                names.insert("CardDescription");
            }
        }
        Some(Scaffold::SettingsPage) => {
            names.insert("Separator");
        }
        _ => {}
    }

    let mut by_module: BTreeMap<String, BTreeSet<&'static str>> = BTreeMap::new();
    for name in names {
        let module = format!("{}/{}", options.ui_import_base.trim_end_matches('/'), module_of(name));
        by_module.entry(module).or_default().insert(name);
    }
    by_module
        .into_iter()
        .map(|(module, names)| UiImport {
            module,
            names: names.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

fn component_imports(component: FieldComponent) -> &'static [&'static str] {
    match component {
        FieldComponent::Input => &["Input"],
        FieldComponent::Textarea => &["Textarea"],
        FieldComponent::Select => &["Select", "SelectContent", "SelectItem", "SelectTrigger", "SelectValue"],
        FieldComponent::Checkbox => &["Checkbox"],
        FieldComponent::DatePicker => &["DatePicker"],
        FieldComponent::FileUpload => &["FileUpload"],
    }
}

/// Compound components live in their root's module: `SelectItem` → `select`.
fn module_of(name: &str) -> String {
    for root in ["Select", "Card"] {
        if name.starts_with(root) {
            return kebab_case(root);
        }
    }
    kebab_case(name)
}

pub fn component_name(ir: &UiDsl, options: &GeneratorOptions) -> String {
    if let Some(name) = &options.component_name {
        if is_js_identifier(name) {
            return name.clone();
        }
        let pascal = pascal_case(name);
        if !pascal.is_empty() {
            return pascal;
        }
    }

    let suffix = match ir.doc_type {
        DocumentType::Form => "Form",
        DocumentType::Screen => "Screen",
        DocumentType::App => "App",
    };
    let base = pascal_case(&ir.title);
    if base.is_empty() {
        format!("Generated{}", suffix)
    } else if base.ends_with(suffix) {
        base
    } else {
        format!("{}{}", base, suffix)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODULE SCOPE
// ═══════════════════════════════════════════════════════════════════════════════

fn emit_rule_types(w: &mut Writer) {
    w.line("type FormValues = Record<string, unknown>;");
    w.blank();
    w.line("type ValidationRule =");
    w.line("  | { type: \"required\"; message: string }");
    w.line("  | { type: \"email\"; message: string }");
    w.line("  | { type: \"minLength\"; value: number; message: string }");
    w.line("  | { type: \"maxLength\"; value: number; message: string }");
    w.line("  | { type: \"pattern\"; value: RegExp; message: string };");
}

fn emit_rule_table(w: &mut Writer, fields: &[Field]) {
    let with_rules: Vec<&Field> = fields.iter().filter(|f| !f.validation.is_empty()).collect();
    if with_rules.is_empty() {
        w.line("const validationRules: Record<string, ValidationRule[]> = {};");
        return;
    }

    w.open("const validationRules: Record<string, ValidationRule[]> = {");
    for field in with_rules {
        w.open(format!("{}: [", js_object_key(&field.name)));
        for rule in &field.validation {
            w.line(format!("{},", rule_literal(rule, &field.label)));
        }
        w.close("],");
    }
    w.close("};");
}

/// Object literal for one rule. Rules without a message get an English default.
pub fn rule_literal(rule: &ValidationRule, label: &str) -> String {
    let message = rule
        .message()
        .map(str::to_string)
        .unwrap_or_else(|| default_message(rule, label));
    let message = js_string_literal(&message);
    match rule {
        ValidationRule::Required { .. } => format!("{{ type: \"required\", message: {} }}", message),
        ValidationRule::Email { .. } => format!("{{ type: \"email\", message: {} }}", message),
        ValidationRule::MinLength { value, .. } => {
            format!("{{ type: \"minLength\", value: {}, message: {} }}", value, message)
        }
        ValidationRule::MaxLength { value, .. } => {
            format!("{{ type: \"maxLength\", value: {}, message: {} }}", value, message)
        }
        ValidationRule::Pattern { value, .. } => format!(
            "{{ type: \"pattern\", value: {}, message: {} }}",
            regex_constructor(value),
            message
        ),
    }
}

fn default_message(rule: &ValidationRule, label: &str) -> String {
    match rule {
        ValidationRule::Required { .. } => format!("{} is required.", label),
        ValidationRule::Email { .. } => "Enter a valid email address.".to_string(),
        ValidationRule::MinLength { value, .. } => {
            format!("{} must be at least {} characters.", label, value)
        }
        ValidationRule::MaxLength { value, .. } => {
            format!("{} must be at most {} characters.", label, value)
        }
        ValidationRule::Pattern { .. } => format!("{} has an invalid format.", label),
    }
}

fn emit_validate_field(w: &mut Writer) {
    const VALIDATE_FIELD: &[&str] = &[
        "function validateField(name: string, value: unknown): string | undefined {",
        "  const text = typeof value === \"string\" ? value : \"\";",
        "  for (const rule of validationRules[name] ?? []) {",
        "    switch (rule.type) {",
        "      case \"required\":",
        "        if (value === undefined || value === null || value === \"\" || value === false) return rule.message;",
        "        break;",
        "      case \"email\":",
        "        if (text && !/^[^\\s@]+@[^\\s@]+\\.[^\\s@]+$/.test(text)) return rule.message;",
        "        break;",
        "      case \"minLength\":",
        "        if (text && text.length < rule.value) return rule.message;",
        "        break;",
        "      case \"maxLength\":",
        "        if (text.length > rule.value) return rule.message;",
        "        break;",
        "      case \"pattern\":",
        "        if (text && !rule.value.test(text)) return rule.message;",
        "        break;",
        "    }",
        "  }",
        "  return undefined;",
        "}",
    ];
    for line in VALIDATE_FIELD {
        w.line(*line);
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPONENT SCOPE
// ═══════════════════════════════════════════════════════════════════════════════

/// Initial form-state expression for a field.
pub fn initial_value(field: &Field) -> String {
    if let Some(value) = &field.default_value {
        return serde_json::to_string(value).unwrap_or_else(|_| "undefined".to_string());
    }
    match field.component {
        FieldComponent::Checkbox => "false".to_string(),
        FieldComponent::DatePicker => "undefined".to_string(),
        _ => "\"\"".to_string(),
    }
}

fn emit_state(w: &mut Writer, fields: &[Field]) {
    if fields.is_empty() {
        w.line("const [values, setValues] = useState<FormValues>({});");
    } else {
        w.open("const [values, setValues] = useState<FormValues>({");
        for field in fields {
            w.line(format!("{}: {},", js_object_key(&field.name), initial_value(field)));
        }
        w.close("});");
    }
    w.line("const [errors, setErrors] = useState<Record<string, string | undefined>>({});");
}

fn emit_handlers(w: &mut Writer) {
    w.open("const handleChange = (name: string, value: unknown) => {");
    w.line("setValues((prev) => ({ ...prev, [name]: value }));");
    w.line("setErrors((prev) => ({ ...prev, [name]: validateField(name, value) }));");
    w.close("};");
    w.blank();
    w.open("const handleSubmit = (event: FormEvent<HTMLFormElement>) => {");
    w.line("event.preventDefault();");
    w.line("const nextErrors: Record<string, string | undefined> = {};");
    w.open("for (const name of Object.keys(validationRules)) {");
    w.line("nextErrors[name] = validateField(name, values[name]);");
    w.close("}");
    w.line("setErrors(nextErrors);");
    w.line("if (Object.values(nextErrors).some(Boolean)) return;");
    w.line("onSubmit?.(values);");
    w.close("};");
}

// ═══════════════════════════════════════════════════════════════════════════════
// MARKUP
// ═══════════════════════════════════════════════════════════════════════════════

fn emit_body(w: &mut Writer, ir: &UiDsl) {
    match ir.scaffold {
        Some(Scaffold::FormAuth) => emit_auth_card(w, ir),
        Some(Scaffold::SettingsPage) => emit_page(w, ir, "max-w-3xl", true, None),
        Some(Scaffold::Dashboard) => emit_page(w, ir, "max-w-6xl", false, Some("grid gap-4 md:grid-cols-2 lg:grid-cols-3")),
        Some(Scaffold::TwoColumn) => emit_page(w, ir, "max-w-4xl", false, Some("grid gap-4 md:grid-cols-2")),
        None => emit_page(w, ir, "max-w-2xl", false, None),
    }
}

fn emit_auth_card(w: &mut Writer, ir: &UiDsl) {
    w.open("<div className=\"flex min-h-screen items-center justify-center p-4\">");
    w.open("<Card className=\"w-full max-w-md\">");
    w.open("<form onSubmit={handleSubmit} noValidate>");

    w.open("<CardHeader>");
    w.line(format!("<CardTitle>{}</CardTitle>", jsx_text(&ir.title)));
    if let Some(description) = &ir.description {
        w.line(format!("<CardDescription>{}</CardDescription>", jsx_text(description)));
    }
    w.close("</CardHeader>");

    w.open("<CardContent className=\"space-y-4\">");
    for field in &ir.fields {
        emit_field(w, field);
    }
    w.close("</CardContent>");

    if !ir.actions.is_empty() {
        w.open("<CardFooter className=\"flex justify-end gap-2\">");
        for action in &ir.actions {
            emit_action(w, action);
        }
        w.close("</CardFooter>");
    }

    w.close("</form>");
    w.close("</Card>");
    w.close("</div>");
}

fn emit_page(w: &mut Writer, ir: &UiDsl, max_width: &str, separator: bool, field_grid: Option<&str>) {
    w.open(format!("<div className=\"mx-auto {} p-6\">", max_width));
    w.line(format!(
        "<h1 className=\"text-2xl font-semibold tracking-tight\">{}</h1>",
        jsx_text(&ir.title)
    ));
    if let Some(description) = &ir.description {
        w.line(format!("<p className=\"text-muted-foreground\">{}</p>", jsx_text(description)));
    }
    if separator {
        w.line("<Separator className=\"my-6\" />");
    }

    w.open("<form onSubmit={handleSubmit} noValidate className=\"mt-6 space-y-4\">");
    match field_grid {
        Some(class) if !ir.fields.is_empty() => {
            w.open(format!("<div className=\"{}\">", class));
            for field in &ir.fields {
                emit_field(w, field);
            }
            w.close("</div>");
        }
        _ => {
            for field in &ir.fields {
                emit_field(w, field);
            }
        }
    }
    if !ir.actions.is_empty() {
        w.open("<div className=\"flex justify-end gap-2\">");
        for action in &ir.actions {
            emit_action(w, action);
        }
        w.close("</div>");
    }
    w.close("</form>");
    w.close("</div>");
}

/// `type` attribute of an `Input`, inferred from the field name.
pub fn input_type(name: &str) -> &'static str {
    let lower = name.to_ascii_lowercase();
    if lower.contains("email") {
        "email"
    } else if lower.contains("password") || lower.contains("haslo") {
        "password"
    } else if lower.contains("phone") || lower.starts_with("tel") || lower.contains("mobile") {
        "tel"
    } else {
        "text"
    }
}

fn emit_field(w: &mut Writer, field: &Field) {
    let id = escape_jsx_attribute(&field.id);
    let key = js_string_literal(&field.name);
    let value = js_member("values", &field.name);
    let error = js_member("errors", &field.name);
    let placeholder = field
        .placeholder
        .as_deref()
        .map(|p| format!(" placeholder=\"{}\"", escape_jsx_attribute(p)))
        .unwrap_or_default();

    w.open("<div className=\"space-y-2\">");
    match field.component {
        FieldComponent::Checkbox => {
            w.open("<div className=\"flex items-center space-x-2\">");
            w.line(format!(
                "<Checkbox id=\"{}\" checked={{Boolean({})}} onCheckedChange={{(checked) => handleChange({}, checked === true)}} />",
                id, value, key
            ));
            w.line(format!("<Label htmlFor=\"{}\">{}</Label>", id, jsx_text(&field.label)));
            w.close("</div>");
        }
        _ => {
            w.line(format!("<Label htmlFor=\"{}\">{}</Label>", id, jsx_text(&field.label)));
            match field.component {
                FieldComponent::Input => {
                    w.open("<Input");
                    w.line(format!("id=\"{}\"", id));
                    w.line(format!("name=\"{}\"", escape_jsx_attribute(&field.name)));
                    w.line(format!("type=\"{}\"", input_type(&field.name)));
                    if let Some(p) = &field.placeholder {
                        w.line(format!("placeholder=\"{}\"", escape_jsx_attribute(p)));
                    }
                    w.line(format!("value={{String({} ?? \"\")}}", value));
                    w.line(format!("onChange={{(e) => handleChange({}, e.target.value)}}", key));
                    w.close("/>");
                }
                FieldComponent::Textarea => {
                    w.open("<Textarea");
                    w.line(format!("id=\"{}\"", id));
                    w.line(format!("name=\"{}\"", escape_jsx_attribute(&field.name)));
                    if let Some(p) = &field.placeholder {
                        w.line(format!("placeholder=\"{}\"", escape_jsx_attribute(p)));
                    }
                    w.line(format!("value={{String({} ?? \"\")}}", value));
                    w.line(format!("onChange={{(e) => handleChange({}, e.target.value)}}", key));
                    w.close("/>");
                }
                FieldComponent::Select => {
                    w.open(format!(
                        "<Select value={{String({} ?? \"\")}} onValueChange={{(value) => handleChange({}, value)}}>",
                        value, key
                    ));
                    w.open(format!("<SelectTrigger id=\"{}\">", id));
                    w.line(format!("<SelectValue{} />", placeholder));
                    w.close("</SelectTrigger>");
                    w.open("<SelectContent>");
                    for option in &field.options {
                        w.line(format!(
                            "<SelectItem value=\"{}\">{}</SelectItem>",
                            escape_jsx_attribute(&option.value),
                            jsx_text(&option.label)
                        ));
                    }
                    w.close("</SelectContent>");
                    w.close("</Select>");
                }
                FieldComponent::DatePicker => {
                    w.line(format!(
                        "<DatePicker id=\"{}\"{} value={{{} as Date | undefined}} onChange={{(date) => handleChange({}, date)}} />",
                        id, placeholder, value, key
                    ));
                }
                FieldComponent::FileUpload => {
                    w.line(format!(
                        "<FileUpload id=\"{}\" onChange={{(files) => handleChange({}, files)}} />",
                        id, key
                    ));
                }
                FieldComponent::Checkbox => {}
            }
        }
    }
    if let Some(helper) = &field.helper_text {
        w.line(format!("<p className=\"text-sm text-muted-foreground\">{}</p>", jsx_text(helper)));
    }
    w.line(format!(
        "{{{} && <p className=\"text-sm text-destructive\">{{{}}}</p>}}",
        error, error
    ));
    w.close("</div>");
}

fn emit_action(w: &mut Writer, action: &Action) {
    let label = jsx_text(&action.label);
    let variant = match action.variant {
        ActionVariant::Primary => String::new(),
        other => format!(" variant=\"{}\"", other.button_variant()),
    };
    match action.action_type {
        ActionType::Submit => w.line(format!("<Button type=\"submit\"{}>{}</Button>", variant, label)),
        ActionType::Button => w.line(format!("<Button type=\"button\"{}>{}</Button>", variant, label)),
        ActionType::Link => {
            let href = escape_jsx_attribute(action.href.as_deref().unwrap_or("#"));
            w.open("<Button variant=\"link\" asChild>");
            w.line(format!("<a href=\"{}\">{}</a>", href, label));
            w.close("</Button>");
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// WRITER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
struct Writer {
    buf: String,
    depth: usize,
}

impl Writer {
    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.buf.push_str("  ");
        }
        self.buf.push_str(text.as_ref());
        self.buf.push('\n');
    }

    fn blank(&mut self) {
        self.buf.push('\n');
    }

    fn open(&mut self, text: impl AsRef<str>) {
        self.line(text);
        self.depth += 1;
    }

    fn close(&mut self, text: impl AsRef<str>) {
        self.depth = self.depth.saturating_sub(1);
        self.line(text);
    }

    fn finish(self) -> String {
        self.buf
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORT
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn generate_code_native(ir: serde_json::Value, options: Option<serde_json::Value>) -> napi::Result<String> {
    let ir: UiDsl = serde_json::from_value(ir)
        .map_err(|e| napi::Error::from_reason(format!("Invalid UI-DSL document: {}", e)))?;
    let options: GeneratorOptions = match options {
        Some(value) => serde_json::from_value(value)
            .map_err(|e| napi::Error::from_reason(format!("Invalid generator options: {}", e)))?,
        None => GeneratorOptions::default(),
    };
    Ok(generate_code_with_options(&ir, &options))
}
