use tracing::trace;

use super::params::{build_parameters, build_responses};
use crate::model::Endpoint;
use crate::openapi::{build_fragment, OperationParams, UNTITLED};
use crate::slug::{endpoint_id, uri_display};
use crate::snippets::CodeExamples;
use crate::source::{EndpointSource, ParamLocation};

/// Builds normalized endpoints for one build. Holds the code-example
/// generator, and with it the per-build template cache.
#[derive(Debug)]
pub struct EndpointNormalizer {
    examples: CodeExamples,
}

impl EndpointNormalizer {
    #[must_use]
    pub fn new(examples: CodeExamples) -> Self {
        Self { examples }
    }

    /// The code-example generator in use.
    #[must_use]
    pub fn examples(&self) -> &CodeExamples {
        &self.examples
    }

    /// Normalize one raw endpoint belonging to `group`.
    pub fn normalize(&mut self, source: &EndpointSource<'_>, group: &str) -> Endpoint {
        let metadata = source.metadata();
        let method = source.method();
        let declared = source.http_methods();
        let methods = if declared.is_empty() {
            vec![method.clone()]
        } else {
            declared
        };
        let uri = source.uri();

        let url_parameters = build_parameters(source.parameters(ParamLocation::Url));
        let query_parameters = build_parameters(source.parameters(ParamLocation::Query));
        let body_parameters = build_parameters(source.parameters(ParamLocation::Body));

        let examples = self.examples.build_examples(
            &method,
            &uri,
            &source.clean_parameters(ParamLocation::Url),
            &source.clean_parameters(ParamLocation::Query),
            &source.clean_parameters(ParamLocation::Body),
        );

        let openapi_yaml = build_fragment(
            source,
            group,
            &method,
            &uri,
            OperationParams {
                url: &url_parameters,
                query: &query_parameters,
                body: &body_parameters,
            },
        );

        let id = endpoint_id(group, &method, &uri);
        trace!(id = %id, "Normalized endpoint");

        Endpoint {
            id,
            title: metadata.title.unwrap_or_else(|| UNTITLED.to_string()),
            description: metadata.description,
            method,
            methods,
            uri_display: uri_display(&uri),
            uri,
            group: group.to_string(),
            subgroup: metadata.subgroup,
            authenticated: metadata.authenticated,
            deprecated: metadata.deprecated,
            url_parameters,
            query_parameters,
            body_parameters,
            responses: build_responses(source.responses()),
            examples,
            openapi_yaml,
            raw: source.raw().clone(),
        }
    }
}
