//! # apidocs
//!
//! **apidocs** turns the endpoint data produced by a documentation-comment
//! scanner into the ordered, normalized tree an API reference site renders:
//! groups → subgroups → endpoints, each endpoint carrying curl and SDK code
//! examples and a self-contained OpenAPI 3.1 fragment.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`source`]** - Read-only views over the raw scanner output, plus loading from disk
//! - **[`slug`]** - Slugs, endpoint ids and display URIs
//! - **[`normalize`]** - Canonical parameters, responses and endpoints
//! - **[`snippets`]** - curl, PHP and JavaScript examples (templates with generated fallback)
//! - **[`openapi`]** - Per-endpoint OpenAPI fragments
//! - **[`ordering`]** - Explicit-order-with-wildcard sorting and `order_data`
//! - **[`generator`]** - The build: merge, normalize, sort
//! - **[`config`]** - Site configuration and environment overrides
//! - **[`error`]** - Build errors
//! - **[`logging`]** - Structured logging setup
//! - **[`cli`]** - The `apidocs-gen` command line
//!
//! ### Build Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(apidocs-gen)
//!     participant Source as source::load_endpoint_data
//!     participant Gen as generator::generate
//!     participant Norm as normalize::EndpointNormalizer
//!     participant Snip as snippets::CodeExamples
//!     participant OA as openapi::build_fragment
//!     participant Ord as ordering
//!
//!     User->>CLI: apidocs-gen build --input _data/endpoints
//!     CLI->>Source: load_endpoint_data(path)
//!     Source-->>CLI: EndpointData
//!     CLI->>Gen: generate(&data, &config)
//!     loop each file (sorted by key)
//!         Gen->>Gen: merge group / subgroup descriptions
//!         alt conflicting descriptions
//!             Gen-->>CLI: BuildError
//!         end
//!         loop each endpoint
//!             Gen->>Norm: normalize(endpoint, group)
//!             Norm->>Snip: build_examples(method, uri, clean params)
//!             Snip-->>Norm: curl / php / js
//!             Norm->>OA: build_fragment(endpoint, params)
//!             OA-->>Norm: YAML
//!             Norm-->>Gen: Endpoint
//!         end
//!     end
//!     Gen->>Ord: sort endpoints, subgroups, groups
//!     Gen-->>CLI: Vec<Group>
//!     CLI-->>User: JSON
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use apidocs::{generate, SiteConfig};
//! use serde_json::json;
//!
//! let data = json!({
//!     "sites": {
//!         "name": "Sites",
//!         "description": "Manage sites",
//!         "endpoints": [
//!             {
//!                 "uri": "api/v1/vector/sites",
//!                 "httpMethods": ["POST"],
//!                 "metadata": {"title": "Create a site"},
//!                 "bodyParameters": {"name": {"type": "string", "required": true}},
//!                 "cleanBodyParameters": {"name": "example"}
//!             }
//!         ]
//!     }
//! });
//!
//! let groups = generate(data.as_object().unwrap(), &SiteConfig::default()).unwrap();
//! let endpoint = &groups[0].subgroups[0].endpoints[0];
//! assert_eq!(endpoint.id, "sites-post-sites");
//! assert!(endpoint.examples.curl.ends_with(r#"-d '{"name":"example"}'"#));
//! assert!(endpoint.openapi_yaml.starts_with("openapi: 3.1.0"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;
pub mod normalize;
pub mod openapi;
pub mod ordering;
pub mod slug;
pub mod snippets;
pub mod source;

pub use config::{load_config, SiteConfig};
pub use error::BuildError;
pub use generator::generate;
pub use model::{CodeSamples, Endpoint, Group, Parameter, Response, Subgroup};
pub use ordering::{order_data, sort_by_order};
pub use source::{load_endpoint_data, EndpointData};
