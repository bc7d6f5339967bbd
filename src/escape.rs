//! Escaping helpers for emitted TSX.
//!
//! User text reaches generated source in three places: JSX attribute values,
//! JSX text children and JS string literals. Each has its own rules.

/// Escapes a value placed inside a double-quoted JSX attribute.
pub fn escape_jsx_attribute(s: &str) -> String {
    s.replace('&', "&amp;").replace('"', "&quot;")
}

/// Double-quoted JS string literal, quotes included. JSON string syntax is a
/// subset of JS string syntax.
pub fn js_string_literal(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| format!("\"{}\"", escape_js_string(s)))
}

fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}

/// JSX child text. Plain text is emitted as is; anything JSX would interpret
/// becomes a string expression.
pub fn jsx_text(s: &str) -> String {
    let unsafe_char = |c: char| matches!(c, '{' | '}' | '<' | '>' | '&' | '\n' | '\r');
    if s.chars().any(unsafe_char) || s.trim() != s {
        format!("{{{}}}", js_string_literal(s))
    } else {
        s.to_string()
    }
}

/// `new RegExp("...")` for a pattern given as regex source text.
pub fn regex_constructor(pattern: &str) -> String {
    format!("new RegExp({})", js_string_literal(pattern))
}

/// True when `s` can be used bare as a JS object key or binding name.
pub fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') && !is_reserved_word(s)
}

fn is_reserved_word(s: &str) -> bool {
    matches!(
        s,
        "break" | "case" | "catch" | "class" | "const" | "continue" | "debugger" | "default"
            | "delete" | "do" | "else" | "export" | "extends" | "false" | "finally" | "for"
            | "function" | "if" | "import" | "in" | "instanceof" | "new" | "null" | "return"
            | "super" | "switch" | "this" | "throw" | "true" | "try" | "typeof" | "var"
            | "void" | "while" | "with" | "yield" | "let" | "static" | "enum" | "await"
    )
}

/// Object key for `s`: bare when it is an identifier, quoted otherwise.
pub fn js_object_key(s: &str) -> String {
    if is_js_identifier(s) {
        s.to_string()
    } else {
        js_string_literal(s)
    }
}

/// Member access on `object` for key `s`: `object.s` or `object["s"]`.
pub fn js_member(object: &str, s: &str) -> String {
    if is_js_identifier(s) {
        format!("{}.{}", object, s)
    } else {
        format!("{}[{}]", object, js_string_literal(s))
    }
}

/// PascalCase identifier built from the ASCII alphanumeric words of `s`.
pub fn pascal_case(s: &str) -> String {
    let mut out = String::new();
    for word in s.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()) {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

/// `DatePicker` → `date-picker`.
pub fn kebab_case(s: &str) -> String {
    let mut out = String::new();
    for (i, c) in s.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
