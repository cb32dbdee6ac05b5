//! Literal renderers for the SDK examples: quoted scalars plus nested
//! PHP arrays and JavaScript objects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use super::SdkLanguage;
use crate::slug::value_to_string;

static BARE_IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").expect("Failed to compile identifier regex")
});

/// Wrap text in single quotes, escaping backslashes and embedded quotes.
#[must_use]
pub fn single_quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        if c == '\\' || c == '\'' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('\'');
    out
}

/// Render a value as a positional call argument.
///
/// Numbers and booleans are emitted bare; everything else is quoted.
#[must_use]
pub fn quote_value(value: &Value) -> String {
    match value {
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => single_quote(&value_to_string(other)),
    }
}

/// Render a mapping as a PHP array literal.
///
/// ```
/// use apidocs::snippets::php_array;
/// use serde_json::json;
///
/// let map = json!({"name": "example", "tags": ["a", 1]});
/// assert_eq!(
///     php_array(map.as_object().unwrap(), 0),
///     "[\n    'name' => 'example',\n    'tags' => ['a', 1],\n]"
/// );
/// ```
#[must_use]
pub fn php_array(map: &Map<String, Value>, indent: usize) -> String {
    format_map(SdkLanguage::Php, map, indent)
}

/// Render a mapping as a JavaScript object literal. Keys that are valid
/// identifiers are left bare.
#[must_use]
pub fn js_object(map: &Map<String, Value>, indent: usize) -> String {
    format_map(SdkLanguage::Js, map, indent)
}

/// Render a mapping in the literal syntax of `lang`.
#[must_use]
pub fn format_map(lang: SdkLanguage, map: &Map<String, Value>, indent: usize) -> String {
    let (open, close) = match lang {
        SdkLanguage::Php => ("[", "]"),
        SdkLanguage::Js => ("{", "}"),
    };
    if map.is_empty() {
        return format!("{open}{close}");
    }

    let inner_pad = " ".repeat(indent + 4);
    let mut lines = vec![open.to_string()];
    for (key, value) in map {
        let formatted = format_value(lang, value, indent + 4);
        let line = match lang {
            SdkLanguage::Php => format!("{inner_pad}{} => {formatted},", single_quote(key)),
            SdkLanguage::Js => format!("{inner_pad}{}: {formatted},", js_key(key)),
        };
        lines.push(line);
    }
    lines.push(format!("{}{close}", " ".repeat(indent)));
    lines.join("\n")
}

fn js_key(key: &str) -> String {
    if BARE_IDENTIFIER.is_match(key) {
        key.to_string()
    } else {
        single_quote(key)
    }
}

fn format_value(lang: SdkLanguage, value: &Value, indent: usize) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => single_quote(s),
        Value::Array(items) => {
            let items: Vec<String> = items
                .iter()
                .map(|item| format_value(lang, item, indent))
                .collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => format_map(lang, map, indent),
    }
}
