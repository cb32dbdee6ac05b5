//! # Normalize Module
//!
//! Turns raw scanner records into the canonical [`crate::model`] types.
//!
//! - [`build_parameters`] / [`build_responses`] canonicalize parameter and
//!   response descriptors, dropping entries that are not mappings.
//! - [`EndpointNormalizer`] composes those with the code-example generator and
//!   the OpenAPI fragment builder into one [`crate::model::Endpoint`].

mod endpoint;
mod params;

pub use endpoint::*;
pub use params::*;
