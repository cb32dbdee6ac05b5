use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::literal::{format_map, quote_value};
use super::{SdkLanguage, SnippetRequest};
use crate::slug::strip_api_prefix;

static CAMEL_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[-_]([a-z])").expect("Failed to compile camelize regex"));

/// Indent of a structured-literal argument in a fallback call.
const ARGUMENT_INDENT: usize = 8;

/// `rate-limits` → `rateLimits`, `reset_password` → `resetPassword`.
#[must_use]
pub fn camelize(segment: &str) -> String {
    CAMEL_BOUNDARY
        .replace_all(segment, |caps: &Captures<'_>| caps[1].to_uppercase())
        .into_owned()
}

fn is_param_segment(segment: &str) -> bool {
    segment.starts_with('{') && segment.ends_with('}')
}

/// SDK call chain for a route: every literal path segment after the API
/// prefix, camel-cased. Parameter segments are carried as call arguments and
/// never become chain links.
///
/// ```
/// use apidocs::snippets::method_chain;
///
/// assert_eq!(
///     method_chain("api/v1/vector/sites/{site}/waf/rate-limits/{rule}"),
///     vec!["sites", "waf", "rateLimits"]
/// );
/// ```
#[must_use]
pub fn method_chain(uri: &str) -> Vec<String> {
    strip_api_prefix(uri)
        .split('/')
        .filter(|segment| !segment.is_empty() && !is_param_segment(segment))
        .map(camelize)
        .collect()
}

/// Auto-generated SDK call used when no template covers a route.
///
/// Arguments are the URL parameter examples in order, then one structured
/// literal with the query (for `GET`) or body parameters when that map is not
/// empty.
#[must_use]
pub fn fallback_example(lang: SdkLanguage, client: &str, request: &SnippetRequest<'_>) -> String {
    let accessor = lang.accessor();
    let chain = method_chain(request.uri);

    let mut args: Vec<String> = request.url_params.values().map(quote_value).collect();
    let params = if request.method == "GET" {
        request.query_params
    } else {
        request.body_params
    };
    if !params.is_empty() {
        args.push(format_map(lang, params, ARGUMENT_INDENT));
    }

    let mut lines = vec![match lang {
        SdkLanguage::Php => format!("$response = ${client}"),
        SdkLanguage::Js => format!("const response = await {client}"),
    }];
    if !chain.is_empty() {
        lines.push(format!("    {accessor}{}", chain.join(accessor)));
    }
    lines.push(format!(
        "    {accessor}{}({});",
        request.method.to_lowercase(),
        args.join(", ")
    ));
    lines.join("\n")
}
