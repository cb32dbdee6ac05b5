//! Error types for the docs pipeline.
//!
//! Only authoring mistakes the build cannot resolve are errors. Missing
//! templates, malformed response bodies, absent optional fields and records of
//! the wrong shape all have defaults and never surface here.

use thiserror::Error;

const CONFLICT_HINT: &str =
    "Fix: Use the same description in all controllers, or leave all but one blank.";

/// Errors that abort a build.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum BuildError {
    #[error(
        "Conflicting group descriptions for {group:?}:\n  Existing: {existing:?}\n  New:      {new:?}\n{}",
        CONFLICT_HINT
    )]
    ConflictingGroupDescription {
        group: String,
        existing: String,
        new: String,
    },

    #[error(
        "Conflicting subgroup descriptions for {subgroup:?} in group {group:?}:\n  Existing: {existing:?}\n  New:      {new:?}\n{}",
        CONFLICT_HINT
    )]
    ConflictingSubgroupDescription {
        group: String,
        subgroup: String,
        existing: String,
        new: String,
    },
}
