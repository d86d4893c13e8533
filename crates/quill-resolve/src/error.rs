use quill_naming::NamingError;
use quill_tree::{ElementKind, Refkey};
use thiserror::Error;

/// Errors of the declare pass. All of these are fatal and synchronous:
/// a broken declaration makes the rest of the tree unsafe to process.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    #[error(
        "duplicate {kind} `{name}` in {scope}: already declared as `{previous}`"
    )]
    DuplicateSymbol {
        name: String,
        kind: ElementKind,
        /// Final name of the declaration that got there first.
        previous: String,
        /// Human description of the scope, e.g. a file path or owner name.
        scope: String,
    },

    #[error("refkey {refkey} is already bound to `{bound_to}`")]
    RefkeyRebound { refkey: Refkey, bound_to: String },

    #[error(transparent)]
    Naming(#[from] NamingError),
}
