use thiserror::Error;

/// Why a transformed name fails the identifier grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentifierFault {
    Empty,
    LeadingDigit,
    IllegalChar(char),
}

impl std::fmt::Display for IdentifierFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierFault::Empty => write!(f, "name is empty"),
            IdentifierFault::LeadingDigit => write!(f, "name starts with a digit"),
            IdentifierFault::IllegalChar(c) => write!(f, "name contains illegal character `{c}`"),
        }
    }
}

/// Naming errors are fatal and synchronous: a declaration whose name cannot
/// be finalized makes the rest of the tree unsafe to process.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NamingError {
    #[error("`{name}` is not a valid identifier: {fault}")]
    InvalidIdentifier { name: String, fault: IdentifierFault },

    #[error("`{name}` collides with a reserved word of the target language")]
    Reserved { name: String },

    #[error("`{name}` uses a double-underscore prefix reserved for the target runtime")]
    ReservedPrefix { name: String },
}
