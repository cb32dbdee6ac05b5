//! # Generator Module
//!
//! Top-level orchestration of a docs build: scanner output in, an ordered
//! tree of groups → subgroups → endpoints out.
//!
//! ## Pipeline
//!
//! ```text
//! EndpointData → build_groups → normalize each endpoint → sort → Vec<Group>
//!                                   │
//!                                   ├─ snippets (curl / PHP / JS)
//!                                   └─ openapi fragment
//! ```
//!
//! 1. **Merge** - files are visited in file-key order and merged into groups
//!    by `name`, endpoints into subgroups by `metadata.subgroup`. Group and
//!    subgroup descriptions follow a single rule: the first non-empty
//!    description wins, and a second, different non-empty one aborts the build
//!    with a [`BuildError`].
//! 2. **Normalize** - every endpoint becomes a [`crate::model::Endpoint`]
//!    with code examples and an OpenAPI fragment attached.
//! 3. **Sort** - endpoints by resource cluster and method, subgroups by the
//!    configured per-group order (or empty-first alphabetical), groups by the
//!    configured group order.
//!
//! ## Usage
//!
//! ```rust
//! use apidocs::config::SiteConfig;
//! use apidocs::generator::generate;
//! use serde_json::json;
//!
//! let data = json!({
//!     "sites": {
//!         "name": "Sites",
//!         "endpoints": [{"uri": "api/v1/vector/sites", "httpMethods": ["GET"]}]
//!     }
//! });
//! let groups = generate(data.as_object().unwrap(), &SiteConfig::default()).unwrap();
//! assert_eq!(groups[0].subgroups[0].endpoints[0].id, "sites-get-sites");
//! ```
//!
//! Each call builds with a fresh template cache and fresh group maps; nothing
//! is shared between builds.

mod groups;

#[cfg(test)]
mod tests;

pub use groups::{build_groups, merge_description};

use tracing::info;

use crate::config::SiteConfig;
use crate::error::BuildError;
use crate::model::Group;
use crate::normalize::EndpointNormalizer;
use crate::ordering::sort_by_order;
use crate::snippets::CodeExamples;
use crate::source::EndpointData;

/// Run a full build and return the ordered group tree.
///
/// # Errors
///
/// Returns [`BuildError`] when two inputs give the same group or subgroup
/// different non-empty descriptions. No partial tree is returned.
pub fn generate(data: &EndpointData, config: &SiteConfig) -> Result<Vec<Group>, BuildError> {
    let mut normalizer = EndpointNormalizer::new(CodeExamples::new(&config.snippets));
    let groups = build_groups(data, &config.api_docs, &mut normalizer)?;
    let groups = sort_by_order(groups, &config.api_docs.order, |g| g.name.as_str());

    info!(
        files = data.len(),
        groups = groups.len(),
        templates_cached = normalizer.examples().cached_templates(),
        "API docs build complete"
    );
    Ok(groups)
}
