use quill_naming::NamingError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EmitError {
    /// Two different manual aliases were registered for the same include
    /// path. Last-write-wins would silently change earlier references, so
    /// this is an error instead.
    #[error("conflicting aliases for `{path}`: `{existing}` and `{requested}`")]
    ConflictingAlias {
        path: String,
        existing: String,
        requested: String,
    },

    /// A file was handed to a writer without going through the declare pass.
    #[error("no module was declared for `{path}`")]
    UnknownModule { path: String },

    #[error(transparent)]
    Naming(#[from] NamingError),
}
