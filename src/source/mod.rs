//! # Source Module
//!
//! Read-only views over the endpoint data handed to the pipeline by the
//! upstream documentation scanner, plus helpers to load that data from disk.
//!
//! The scanner output is loosely typed: optional keys may be absent, and a
//! parameter map with no entries may be serialized as an empty list instead of
//! an empty mapping. Rather than deserializing into strict structs (which would
//! reject those shapes), the pipeline keeps the raw [`serde_json::Value`] and
//! reads it through the accessors in [`types`], each with an explicit default.
//!
//! ## Input shape
//!
//! ```yaml
//! # one record per scanned controller file, keyed by file name
//! sites:
//!   name: Sites
//!   description: Manage sites
//!   endpoints:
//!     - uri: api/v1/vector/sites/{site}
//!       httpMethods: [GET]
//!       metadata: { title: Get a site, subgroup: "", authenticated: true }
//!       urlParameters: { site: { type: string, required: true } }
//!       cleanUrlParameters: { site: site-123 }
//!       responses: [{ status: 200, description: OK, content: '{"id":1}' }]
//! ```

mod load;
mod types;

pub use load::*;
pub use types::*;
