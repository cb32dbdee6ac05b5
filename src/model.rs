//! Normalized records produced by the pipeline and handed to the page
//! templating layer. Every type serializes to the field names templates use.

use serde::Serialize;
use serde_json::{Map, Value};

/// A request parameter with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    /// Scanner type name; `string` when absent
    #[serde(rename = "type")]
    pub ty: String,
    pub required: bool,
    pub description: String,
    /// Opaque example value (`null` when absent)
    pub example: Value,
    pub enum_values: Vec<Value>,
    pub nullable: bool,
    pub deprecated: bool,
}

/// A documented response.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    /// Opaque status, usually an integer
    pub status: Value,
    pub description: String,
    /// `slugify("{status}-{description}")`
    pub slug: String,
    /// Pretty-printed JSON when the body parses, otherwise the raw text
    pub content: String,
}

/// Generated code samples for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeSamples {
    /// Shell command
    pub curl: String,
    /// PHP SDK call
    pub php: String,
    /// JavaScript SDK call
    pub js: String,
}

/// One documented HTTP operation, fully normalized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Canonical method (first declared)
    pub method: String,
    pub methods: Vec<String>,
    pub uri: String,
    pub uri_display: String,
    pub group: String,
    pub subgroup: String,
    pub authenticated: bool,
    pub deprecated: bool,
    pub url_parameters: Vec<Parameter>,
    pub query_parameters: Vec<Parameter>,
    pub body_parameters: Vec<Parameter>,
    pub responses: Vec<Response>,
    pub examples: CodeSamples,
    pub openapi_yaml: String,
    /// The scanner record this endpoint was built from
    #[serde(rename = "_raw")]
    pub raw: Map<String, Value>,
}

/// Named sub-category within a group. The empty name means "ungrouped".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subgroup {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub endpoints: Vec<Endpoint>,
}

/// Top-level documentation category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Group {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub subgroups: Vec<Subgroup>,
}

impl Group {
    /// Number of endpoints across all subgroups.
    #[must_use]
    pub fn endpoint_count(&self) -> usize {
        self.subgroups.iter().map(|s| s.endpoints.len()).sum()
    }
}

/// Methods that carry a JSON request body in examples and fragments.
pub const MUTATING_METHODS: &[&str] = &["POST", "PUT", "PATCH"];

/// `true` for `POST`, `PUT` and `PATCH`.
#[must_use]
pub fn is_mutating_method(method: &str) -> bool {
    MUTATING_METHODS.contains(&method)
}
