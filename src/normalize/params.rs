use serde_json::Value;
use tracing::debug;

use crate::model::{Parameter, Response};
use crate::slug::{slugify, value_to_string};
use crate::source::{text_field, ParamShape};

/// Canonicalize a parameter map, keeping input order.
///
/// Entries whose descriptor is not a mapping are dropped; anything other than
/// a mapping yields no parameters.
#[must_use]
pub fn build_parameters(params: ParamShape<'_>) -> Vec<Parameter> {
    let Some(map) = params.as_mapping() else {
        return Vec::new();
    };

    map.iter()
        .filter_map(|(key, descriptor)| {
            let Some(fields) = descriptor.as_object() else {
                debug!(parameter = %key, "Skipping non-mapping parameter descriptor");
                return None;
            };
            Some(Parameter {
                name: text_field(fields, "name").unwrap_or_else(|| key.clone()),
                ty: text_field(fields, "type").unwrap_or_else(|| "string".to_string()),
                required: fields.get("required") == Some(&Value::Bool(true)),
                description: text_field(fields, "description").unwrap_or_default(),
                example: fields.get("example").cloned().unwrap_or(Value::Null),
                enum_values: fields
                    .get("enumValues")
                    .and_then(Value::as_array)
                    .cloned()
                    .unwrap_or_default(),
                nullable: fields.get("nullable") == Some(&Value::Bool(true)),
                deprecated: fields.get("deprecated") == Some(&Value::Bool(true)),
            })
        })
        .collect()
}

/// Canonicalize response records, dropping entries that are not mappings.
#[must_use]
pub fn build_responses(responses: &[Value]) -> Vec<Response> {
    responses
        .iter()
        .filter_map(Value::as_object)
        .map(|fields| {
            let status = fields.get("status").cloned().unwrap_or(Value::Null);
            let description = text_field(fields, "description").unwrap_or_default();
            let slug = slugify(&format!("{}-{description}", value_to_string(&status)));
            Response {
                status,
                description,
                slug,
                content: pretty_print_json(fields.get("content").unwrap_or(&Value::Null)),
            }
        })
        .collect()
}

/// Best-effort JSON pretty printing of a response body.
///
/// Empty or missing content renders as `""`. A string that parses as JSON is
/// re-rendered with two-space indentation; one that does not is returned
/// unchanged. Structured (already parsed) content is pretty-printed directly.
#[must_use]
pub fn pretty_print_json(content: &Value) -> String {
    match content {
        Value::Null => String::new(),
        Value::String(text) if text.is_empty() => String::new(),
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(parsed) => serde_json::to_string_pretty(&parsed).unwrap_or_else(|_| text.clone()),
            Err(_) => text.clone(),
        },
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}
