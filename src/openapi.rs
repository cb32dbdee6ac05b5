//! # OpenAPI Module
//!
//! Emits a minimal single-path OpenAPI 3.1 document per endpoint, shown in the
//! docs as a copyable fragment.
//!
//! The YAML is written line by line rather than through a serializer so the
//! layout stays fixed: two-space indentation, `in`/`required`/`schema` in a
//! stable order and quoted status keys (`'200':`).
//!
//! ```yaml
//! openapi: 3.1.0
//! info:
//!   title: List sites
//!   version: 1.0.0
//! paths:
//!   /api/v1/vector/sites:
//!     get:
//!       summary: List sites
//!       tags:
//!         - Sites
//!       responses:
//!         '200':
//!           description: Success
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::model::{is_mutating_method, Parameter};
use crate::slug::{uri_display, value_to_string};
use crate::source::{text_field, EndpointSource};

/// Title used when the scanner found none.
pub const UNTITLED: &str = "Untitled Endpoint";

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]+>").expect("Failed to compile HTML tag regex"));

const YAML_SPECIAL: &[char] = &[':', '#', '[', ']', '{', '}', '|', '>', '&', '*', '!', '?', '\'', '"'];

/// Normalized parameter lists for one operation.
#[derive(Debug, Clone, Copy)]
pub struct OperationParams<'a> {
    pub url: &'a [Parameter],
    pub query: &'a [Parameter],
    pub body: &'a [Parameter],
}

/// Build the OpenAPI fragment for one endpoint.
///
/// Title and description come from the raw metadata; responses come from the
/// raw response records (non-mappings skipped).
#[must_use]
pub fn build_fragment(
    endpoint: &EndpointSource<'_>,
    group: &str,
    method: &str,
    uri: &str,
    params: OperationParams<'_>,
) -> String {
    let metadata = endpoint.metadata();
    let title = metadata.title.as_deref().unwrap_or(UNTITLED);

    let mut lines = vec![
        "openapi: 3.1.0".to_string(),
        "info:".to_string(),
        format!("  title: {}", yaml_escape(title)),
        "  version: 1.0.0".to_string(),
        "paths:".to_string(),
        format!("  {}:", uri_display(uri)),
        format!("    {}:", method.to_lowercase()),
        format!("      summary: {}", yaml_escape(title)),
    ];
    if !metadata.description.is_empty() {
        lines.push(format!(
            "      description: {}",
            yaml_escape(&strip_html(&metadata.description))
        ));
    }
    lines.push("      tags:".to_string());
    lines.push(format!("        - {}", yaml_escape(group)));

    let parameters = parameter_lines(params.url, params.query);
    if !parameters.is_empty() {
        lines.push("      parameters:".to_string());
        lines.extend(parameters);
    }

    if is_mutating_method(method) && !params.body.is_empty() {
        lines.extend(request_body_lines(params.body));
    }

    lines.push("      responses:".to_string());
    let responses: Vec<_> = endpoint
        .responses()
        .iter()
        .filter_map(Value::as_object)
        .collect();
    if responses.is_empty() {
        lines.push("        '200':".to_string());
        lines.push("          description: Success".to_string());
    } else {
        for response in responses {
            let status = response.get("status").map(value_to_string).unwrap_or_default();
            let description =
                text_field(response, "description").unwrap_or_else(|| "Response".to_string());
            lines.push(format!("        '{status}':"));
            lines.push(format!("          description: {}", yaml_escape(&description)));
        }
    }

    lines.join("\n")
}

fn parameter_lines(url: &[Parameter], query: &[Parameter]) -> Vec<String> {
    let mut lines = Vec::new();

    for param in url {
        lines.push(format!("        - name: {}", param.name));
        lines.push("          in: path".to_string());
        lines.push("          required: true".to_string());
        lines.push("          schema:".to_string());
        lines.push(format!("            type: {}", openapi_type(&param.ty)));
        if !param.description.is_empty() {
            lines.push(format!("          description: {}", yaml_escape(&param.description)));
        }
    }

    for param in query {
        lines.push(format!("        - name: {}", param.name));
        lines.push("          in: query".to_string());
        lines.push(format!("          required: {}", param.required));
        lines.push("          schema:".to_string());
        lines.push(format!("            type: {}", openapi_type(&param.ty)));
        if !param.enum_values.is_empty() {
            lines.push("            enum:".to_string());
            for value in &param.enum_values {
                lines.push(format!("              - {}", yaml_escape(&value_to_string(value))));
            }
        }
        if !param.description.is_empty() {
            lines.push(format!("          description: {}", yaml_escape(&param.description)));
        }
    }

    lines
}

fn request_body_lines(body: &[Parameter]) -> Vec<String> {
    let mut lines: Vec<String> = [
        "      requestBody:",
        "        required: true",
        "        content:",
        "          application/json:",
        "            schema:",
        "              type: object",
        "              properties:",
    ]
    .iter()
    .map(|line| line.to_string())
    .collect();

    for param in body {
        lines.extend(property_lines(param, 16));
    }

    let required: Vec<&str> = body
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name.as_str())
        .collect();
    if !required.is_empty() {
        lines.push("              required:".to_string());
        lines.extend(required.iter().map(|name| format!("                - {name}")));
    }
    lines
}

fn property_lines(param: &Parameter, indent: usize) -> Vec<String> {
    let pad = " ".repeat(indent);
    let mut lines = vec![
        format!("{pad}{}:", param.name),
        format!("{pad}  type: {}", openapi_type(&param.ty)),
    ];
    if !param.description.is_empty() {
        lines.push(format!("{pad}  description: {}", yaml_escape(&param.description)));
    }
    if !param.enum_values.is_empty() {
        lines.push(format!("{pad}  enum:"));
        for value in &param.enum_values {
            lines.push(format!("{pad}    - {}", yaml_escape(&value_to_string(value))));
        }
    }
    if param.nullable {
        lines.push(format!("{pad}  nullable: true"));
    }
    if param.deprecated {
        lines.push(format!("{pad}  deprecated: true"));
    }
    lines
}

/// Map a scanner type name onto an OpenAPI schema type. Unknown names become
/// `string`.
#[must_use]
pub fn openapi_type(ty: &str) -> &'static str {
    match ty.to_lowercase().as_str() {
        "integer" | "int" => "integer",
        "number" | "float" | "double" => "number",
        "boolean" | "bool" => "boolean",
        "array" => "array",
        "object" => "object",
        _ => "string",
    }
}

/// Render text as a YAML scalar.
///
/// Line breaks fold into spaces and surrounding whitespace is trimmed. Text
/// containing YAML indicator characters, or starting with `-`, `@` or a
/// backtick, is double-quoted with `\` and `"` escaped. Empty text is `""`.
///
/// ```
/// use apidocs::openapi::yaml_escape;
///
/// assert_eq!(yaml_escape("List sites"), "List sites");
/// assert_eq!(yaml_escape("Note: slow"), "\"Note: slow\"");
/// assert_eq!(yaml_escape(""), "\"\"");
/// ```
#[must_use]
pub fn yaml_escape(text: &str) -> String {
    if text.is_empty() {
        return "\"\"".to_string();
    }
    let folded = text.replace('\n', " ").replace('\r', "");
    let folded = folded.trim();
    let needs_quotes = folded.contains(YAML_SPECIAL)
        || folded.starts_with('-')
        || folded.starts_with('@')
        || folded.starts_with('`');
    if needs_quotes {
        format!("\"{}\"", folded.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        folded.to_string()
    }
}

/// Remove HTML tags and trim.
#[must_use]
pub fn strip_html(text: &str) -> String {
    HTML_TAG.replace_all(text, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_type_table() {
        assert_eq!(openapi_type("int"), "integer");
        assert_eq!(openapi_type("Integer"), "integer");
        assert_eq!(openapi_type("double"), "number");
        assert_eq!(openapi_type("bool"), "boolean");
        assert_eq!(openapi_type("array"), "array");
        assert_eq!(openapi_type("object"), "object");
        assert_eq!(openapi_type("file"), "string");
        assert_eq!(openapi_type(""), "string");
    }

    #[test]
    fn test_yaml_escape() {
        assert_eq!(yaml_escape("plain text"), "plain text");
        assert_eq!(yaml_escape("line one\nline two\r\n"), "line one line two");
        assert_eq!(yaml_escape("- leading dash"), "\"- leading dash\"");
        assert_eq!(yaml_escape("@handle"), "\"@handle\"");
        assert_eq!(yaml_escape("`code`"), "\"`code`\"");
        assert_eq!(yaml_escape(r#"say "hi""#), r#""say \"hi\"""#);
        assert_eq!(yaml_escape(r"a\b: c"), r#""a\\b: c""#);
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("  <p>Hello <b>world</b></p>\n"), "Hello world");
        assert_eq!(strip_html("no tags"), "no tags");
    }
}
