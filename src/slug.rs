//! Slug and identifier helpers shared by every stage of the pipeline.
//!
//! All functions here are pure and total: any input string produces a
//! (possibly empty) slug, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// Route prefix every scanned endpoint carries. Stripped before building
/// identifiers, SDK method chains and snippet template keys.
pub const API_PREFIX: &str = "api/v1/vector/";

// ASCII whitespace only; Unicode spaces are treated like any other symbol.
static DISALLOWED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9 \t\r\n\x0B\x0C-]").expect("Failed to compile slug regex"));
static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[ \t\r\n\x0B\x0C]+").expect("Failed to compile slug regex"));
static HYPHENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("Failed to compile slug regex"));

/// Convert free text into a URL/anchor friendly slug.
///
/// Lower-cases, drops everything outside `[a-z0-9]`, whitespace and `-`,
/// turns whitespace runs into a single hyphen, collapses repeated hyphens and
/// trims hyphens from both ends.
///
/// ```
/// use apidocs::slug::slugify;
///
/// assert_eq!(slugify("Rate Limits / WAF!!"), "rate-limits-waf");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.to_lowercase();
    let kept = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE.replace_all(&kept, "-");
    let collapsed = HYPHENS.replace_all(&hyphenated, "-");
    collapsed.trim_matches('-').to_string()
}

/// Strip the fixed [`API_PREFIX`] from a route URI if present.
#[must_use]
pub fn strip_api_prefix(uri: &str) -> &str {
    uri.strip_prefix(API_PREFIX).unwrap_or(uri)
}

/// Build the anchor id for an endpoint: `{group}-{method}-{uri}` slugified,
/// with the API prefix removed and path separators turned into hyphens.
///
/// ```
/// use apidocs::slug::endpoint_id;
///
/// assert_eq!(
///     endpoint_id("Sites", "GET", "api/v1/vector/sites/{site}"),
///     "sites-get-sites-site"
/// );
/// ```
#[must_use]
pub fn endpoint_id(group: &str, method: &str, uri: &str) -> String {
    let clean_uri = strip_api_prefix(uri).replace('/', "-");
    slugify(&format!("{group}-{}-{clean_uri}", method.to_lowercase()))
}

/// URI as displayed to readers: always starts with `/`.
#[must_use]
pub fn uri_display(uri: &str) -> String {
    if uri.starts_with('/') {
        uri.to_string()
    } else {
        format!("/{uri}")
    }
}

/// Plain-text rendering of an opaque scalar, as it appears when interpolated
/// into URLs, slugs and YAML keys. `null` renders as the empty string and
/// composite values as compact JSON.
#[must_use]
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Rate Limits / WAF!!"), "rate-limits-waf");
        assert_eq!(slugify("API Keys"), "api-keys");
        assert_eq!(slugify("  --Leading and trailing--  "), "leading-and-trailing");
    }

    #[test]
    fn test_slugify_empty_and_symbols() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("a---b"), "a-b");
        assert_eq!(slugify("tab\tand\nnewline"), "tab-and-newline");
    }

    #[test]
    fn test_endpoint_id() {
        assert_eq!(
            endpoint_id("Sites", "GET", "api/v1/vector/sites/{site}"),
            "sites-get-sites-site"
        );
        assert_eq!(
            endpoint_id("WAF", "DELETE", "api/v1/vector/sites/{site}/waf/rate-limits/{rule}"),
            "waf-delete-sites-site-waf-rate-limits-rule"
        );
        // URIs without the prefix are used as-is
        assert_eq!(endpoint_id("Misc", "post", "ping"), "misc-post-ping");
    }

    #[test]
    fn test_uri_display() {
        assert_eq!(uri_display("api/v1/vector/sites"), "/api/v1/vector/sites");
        assert_eq!(uri_display("/already"), "/already");
        assert_eq!(uri_display(""), "/");
    }

    #[test]
    fn test_value_to_string() {
        assert_eq!(value_to_string(&json!(200)), "200");
        assert_eq!(value_to_string(&json!("201")), "201");
        assert_eq!(value_to_string(&json!(null)), "");
        assert_eq!(value_to_string(&json!(true)), "true");
        assert_eq!(value_to_string(&json!(1.5)), "1.5");
        assert_eq!(value_to_string(&json!(["a"])), r#"["a"]"#);
    }
}
