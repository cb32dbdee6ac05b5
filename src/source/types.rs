use serde_json::{Map, Value};

use crate::slug::value_to_string;

/// Scanner output: file key → group record (`name`, `description`, `endpoints`).
///
/// Map order is whatever the producer emitted; the generator sorts keys before
/// iterating so the result does not depend on it.
pub type EndpointData = Map<String, Value>;

/// Where a parameter is carried in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// `{placeholder}` segment of the route URI
    Url,
    /// Query string
    Query,
    /// JSON request body
    Body,
}

impl ParamLocation {
    /// Key holding the full parameter descriptors.
    #[must_use]
    pub fn descriptor_key(self) -> &'static str {
        match self {
            ParamLocation::Url => "urlParameters",
            ParamLocation::Query => "queryParameters",
            ParamLocation::Body => "bodyParameters",
        }
    }

    /// Key holding the example-value-only ("clean") view.
    #[must_use]
    pub fn clean_key(self) -> &'static str {
        match self {
            ParamLocation::Url => "cleanUrlParameters",
            ParamLocation::Query => "cleanQueryParameters",
            ParamLocation::Body => "cleanBodyParameters",
        }
    }
}

impl std::fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamLocation::Url => write!(f, "url"),
            ParamLocation::Query => write!(f, "query"),
            ParamLocation::Body => write!(f, "body"),
        }
    }
}

/// Shape of a parameter field as found in the input.
///
/// The scanner writes "no parameters" as `[]` but "some parameters" as a
/// mapping, so both must be accepted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamShape<'a> {
    /// Key absent or `null`
    Missing,
    /// The expected name → value mapping
    Mapping(&'a Map<String, Value>),
    /// A list (in practice always empty)
    List(&'a [Value]),
    /// Any other scalar
    Scalar(&'a Value),
}

impl<'a> ParamShape<'a> {
    /// Classify an optional raw value.
    #[must_use]
    pub fn of(value: Option<&'a Value>) -> Self {
        match value {
            None | Some(Value::Null) => ParamShape::Missing,
            Some(Value::Object(map)) => ParamShape::Mapping(map),
            Some(Value::Array(items)) => ParamShape::List(items),
            Some(other) => ParamShape::Scalar(other),
        }
    }

    /// The mapping, if this shape carries one.
    #[must_use]
    pub fn as_mapping(self) -> Option<&'a Map<String, Value>> {
        match self {
            ParamShape::Mapping(map) => Some(map),
            _ => None,
        }
    }
}

/// Coerce a parameter field into a mapping. Lists, scalars and missing
/// values all become the empty mapping.
#[must_use]
pub fn normalize_to_mapping(value: Option<&Value>) -> Map<String, Value> {
    ParamShape::of(value)
        .as_mapping()
        .cloned()
        .unwrap_or_default()
}

/// Read `key` from a mapping as text. Missing and `null` yield `None`;
/// non-string scalars are stringified.
pub(crate) fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value_to_string(value)),
    }
}

/// One scanned controller file.
#[derive(Debug, Clone, Copy)]
pub struct GroupFile<'a> {
    /// Group name declared by the file
    pub name: &'a str,
    /// Group description (may be empty)
    pub description: &'a Value,
    /// Raw endpoint records
    pub endpoints: &'a [Value],
}

impl<'a> GroupFile<'a> {
    /// View a file record. Returns `None` for records the generator skips:
    /// non-mappings, records without an `endpoints` list, and records without
    /// a string `name`.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        let map = value.as_object()?;
        let endpoints = map.get("endpoints")?.as_array()?;
        let name = map.get("name")?.as_str()?;
        Some(GroupFile {
            name,
            description: map.get("description").unwrap_or(&Value::Null),
            endpoints,
        })
    }

    /// Description text, empty when absent.
    #[must_use]
    pub fn description_text(&self) -> String {
        value_to_string(self.description)
    }
}

/// Endpoint metadata block with every default applied.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EndpointMetadata {
    /// Display title, if the scanner found one
    pub title: Option<String>,
    /// Long description (may contain HTML)
    pub description: String,
    /// Subgroup name; empty means ungrouped
    pub subgroup: String,
    /// Subgroup description (may be empty)
    pub subgroup_description: String,
    /// `false` only when explicitly disabled
    pub authenticated: bool,
    /// `true` only when explicitly set
    pub deprecated: bool,
}

/// Borrowed, read-only view over one raw endpoint record.
#[derive(Debug, Clone, Copy)]
pub struct EndpointSource<'a> {
    raw: &'a Map<String, Value>,
}

impl<'a> EndpointSource<'a> {
    /// View a raw endpoint. Non-mapping values are not endpoints.
    #[must_use]
    pub fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object().map(|raw| EndpointSource { raw })
    }

    /// The raw record, as received.
    #[must_use]
    pub fn raw(&self) -> &'a Map<String, Value> {
        self.raw
    }

    /// Route template, empty when absent.
    #[must_use]
    pub fn uri(&self) -> String {
        text_field(self.raw, "uri").unwrap_or_default()
    }

    /// Declared HTTP methods in order; empty when absent.
    #[must_use]
    pub fn http_methods(&self) -> Vec<String> {
        self.raw
            .get("httpMethods")
            .and_then(Value::as_array)
            .map(|methods| methods.iter().map(value_to_string).collect())
            .unwrap_or_default()
    }

    /// Canonical method: the first declared one, `GET` when there are none.
    #[must_use]
    pub fn method(&self) -> String {
        self.http_methods()
            .into_iter()
            .next()
            .unwrap_or_else(|| "GET".to_string())
    }

    /// The metadata block with defaults applied.
    #[must_use]
    pub fn metadata(&self) -> EndpointMetadata {
        let empty = Map::new();
        let meta = self
            .raw
            .get("metadata")
            .and_then(Value::as_object)
            .unwrap_or(&empty);
        EndpointMetadata {
            title: text_field(meta, "title"),
            description: text_field(meta, "description").unwrap_or_default(),
            subgroup: text_field(meta, "subgroup").unwrap_or_default(),
            subgroup_description: text_field(meta, "subgroupDescription").unwrap_or_default(),
            authenticated: meta.get("authenticated") != Some(&Value::Bool(false)),
            deprecated: meta.get("deprecated") == Some(&Value::Bool(true)),
        }
    }

    /// Full parameter descriptors for a location.
    #[must_use]
    pub fn parameters(&self, location: ParamLocation) -> ParamShape<'a> {
        ParamShape::of(self.raw.get(location.descriptor_key()))
    }

    /// Example values for a location, coerced to a mapping.
    #[must_use]
    pub fn clean_parameters(&self, location: ParamLocation) -> Map<String, Value> {
        normalize_to_mapping(self.raw.get(location.clean_key()))
    }

    /// Raw response records; empty when absent or not a list.
    #[must_use]
    pub fn responses(&self) -> &'a [Value] {
        self.raw
            .get("responses")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
