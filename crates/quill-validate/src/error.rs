use quill_tree::Refkey;
use thiserror::Error;

/// Structural and domain failures found after the whole tree is known.
///
/// These are collected, never thrown: one run reports every problem at once.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidateError {
    #[error("circular `implements` chain: {}", path.join(" -> "))]
    Cycle { path: Vec<String> },

    #[error("field `{field}` of one-of input `{owner}` must be nullable")]
    OneOfNotNullable { owner: String, field: String },

    #[error("field `{field}` of one-of input `{owner}` must not declare a default")]
    OneOfDefault { owner: String, field: String },

    /// An `implements` edge points at a refkey that never bound.
    #[error("`{owner}` implements {refkey}, which was never declared")]
    UnboundImplements { owner: String, refkey: Refkey },
}
