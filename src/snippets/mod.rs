//! # Snippets Module
//!
//! Code examples shown next to every endpoint: a curl command and two SDK
//! calls (PHP and JavaScript).
//!
//! ## Strategy
//!
//! - **curl** is always generated from the request data.
//! - **SDK** examples use a hand-written template when the route is registered
//!   in [`TEMPLATE_MAP`] and the template file exists; otherwise a call is
//!   generated from the route's path segments (see [`fallback_example`]).
//!
//! Inputs are the *clean* parameter maps (name → example value), not the full
//! parameter descriptors.
//!
//! ```
//! use apidocs::config::SnippetConfig;
//! use apidocs::snippets::CodeExamples;
//! use serde_json::{json, Map};
//!
//! let mut examples = CodeExamples::new(&SnippetConfig::default());
//! let url = json!({"site": "site-123"}).as_object().cloned().unwrap();
//! let samples = examples.build_examples("GET", "api/v1/vector/sites/{site}/logs", &url, &Map::new(), &Map::new());
//! assert!(samples.curl.contains("https://api.builtfast.com/api/v1/vector/sites/site-123/logs"));
//! assert_eq!(samples.js, "const response = await vectorPro\n    .sites.logs\n    .get('site-123');");
//! ```

mod curl;
mod literal;
mod sdk;
mod templates;


pub use curl::{curl_example, encode_query_value, substitute_url_params};
pub use literal::{format_map, js_object, php_array, quote_value, single_quote};
pub use sdk::{camelize, fallback_example, method_chain};
pub use templates::{template_name_for, template_path, TemplateStore, TEMPLATE_MAP};

use serde_json::{Map, Value};
use std::fmt;
use tracing::debug;

use crate::config::SnippetConfig;
use crate::model::CodeSamples;

/// Target language of an SDK example.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SdkLanguage {
    Php,
    Js,
}

impl SdkLanguage {
    /// Directory and file-extension name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SdkLanguage::Php => "php",
            SdkLanguage::Js => "js",
        }
    }

    /// Member access operator between chain links.
    #[must_use]
    pub fn accessor(self) -> &'static str {
        match self {
            SdkLanguage::Php => "->",
            SdkLanguage::Js => ".",
        }
    }
}

impl fmt::Display for SdkLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One request as seen by the snippet builders.
#[derive(Debug, Clone, Copy)]
pub struct SnippetRequest<'a> {
    pub method: &'a str,
    pub uri: &'a str,
    pub url_params: &'a Map<String, Value>,
    pub query_params: &'a Map<String, Value>,
    pub body_params: &'a Map<String, Value>,
}

/// Code-example generator for one build. Owns the template cache, so a fresh
/// value per build never sees stale templates.
#[derive(Debug)]
pub struct CodeExamples {
    base_url: String,
    sdk_client: String,
    templates: TemplateStore,
}

impl CodeExamples {
    #[must_use]
    pub fn new(config: &SnippetConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            sdk_client: config.sdk_client.clone(),
            templates: TemplateStore::new(config.templates_dir.clone()),
        }
    }

    /// Build the curl, PHP and JavaScript examples for one endpoint.
    pub fn build_examples(
        &mut self,
        method: &str,
        uri: &str,
        url_params: &Map<String, Value>,
        query_params: &Map<String, Value>,
        body_params: &Map<String, Value>,
    ) -> CodeSamples {
        let request = SnippetRequest {
            method,
            uri,
            url_params,
            query_params,
            body_params,
        };
        CodeSamples {
            curl: curl_example(&self.base_url, &request),
            php: self.sdk_example(SdkLanguage::Php, &request),
            js: self.sdk_example(SdkLanguage::Js, &request),
        }
    }

    fn sdk_example(&mut self, lang: SdkLanguage, request: &SnippetRequest<'_>) -> String {
        if let Some(rendered) = self.templates.render(lang, request) {
            return rendered;
        }
        debug!(lang = %lang, method = request.method, uri = request.uri, "Generating SDK example");
        fallback_example(lang, &self.sdk_client, request)
    }

    /// Template lookups cached so far in this build.
    #[must_use]
    pub fn cached_templates(&self) -> usize {
        self.templates.cached_len()
    }
}
