use serde_json::{Map, Value};
use url::form_urlencoded::byte_serialize;

use super::SnippetRequest;
use crate::model::is_mutating_method;
use crate::slug::value_to_string;

/// Replace every `{name}` placeholder with the example value for `name`.
#[must_use]
pub fn substitute_url_params(uri: &str, url_params: &Map<String, Value>) -> String {
    url_params
        .iter()
        .fold(uri.to_string(), |acc, (key, value)| {
            acc.replace(&format!("{{{key}}}"), &value_to_string(value))
        })
}

/// Form-encode a query value. Spaces become `+`; `~` stays literal and `*` is
/// percent-encoded.
#[must_use]
pub fn encode_query_value(value: &str) -> String {
    let encoded: String = byte_serialize(value.as_bytes()).collect();
    encoded.replace('*', "%2A").replace("%7E", "~")
}

/// Build the multi-line curl command for a request.
///
/// Query values are form-encoded, keys are emitted as-is. Mutating methods get
/// a `Content-Type` header ahead of `Accept`, plus a compact JSON `-d` payload
/// when there are body parameters.
#[must_use]
pub fn curl_example(base_url: &str, request: &SnippetRequest<'_>) -> String {
    let full_uri = substitute_url_params(request.uri, request.url_params);
    let path = full_uri.strip_prefix('/').unwrap_or(&full_uri);
    let mut url = format!("{}/{path}", base_url.trim_end_matches('/'));

    if !request.query_params.is_empty() {
        let query: Vec<String> = request
            .query_params
            .iter()
            .map(|(key, value)| {
                format!("{key}={}", encode_query_value(&value_to_string(value)))
            })
            .collect();
        url = format!("{url}?{}", query.join("&"));
    }

    let mut lines = vec![
        format!("curl -X {} \\", request.method),
        format!("  \"{url}\" \\"),
        "  -H \"Authorization: Bearer $API_KEY\" \\".to_string(),
    ];

    if is_mutating_method(request.method) {
        lines.push("  -H \"Content-Type: application/json\" \\".to_string());
        if request.body_params.is_empty() {
            lines.push("  -H \"Accept: application/json\"".to_string());
        } else {
            lines.push("  -H \"Accept: application/json\" \\".to_string());
            let payload = serde_json::to_string(request.body_params).unwrap_or_default();
            lines.push(format!("  -d '{}'", payload.replace('\'', r"'\''")));
        }
    } else {
        lines.push("  -H \"Accept: application/json\"".to_string());
    }

    lines.join("\n")
}
