//! Name policies: pure `(raw name, kind) -> final name` functions.
//!
//! A policy applies a casing transform keyed by the element kind, validates
//! the transformed name against the target's identifier grammar, and rejects
//! (or deterministically disambiguates) reserved spellings. Policies hold no
//! scope knowledge, so the same raw name and kind always map to the same
//! final name within one job.

pub mod case;
pub mod error;

mod graphql;
mod python;
mod thrift;

pub use error::{IdentifierFault, NamingError};
pub use graphql::GraphqlNames;
pub use python::PythonNames;
pub use thrift::ThriftNames;

use quill_tree::{ElementKind, Target};

pub trait NamePolicy {
    fn final_name(&self, raw: &str, kind: ElementKind) -> Result<String, NamingError>;
}

/// The default policy of a target.
pub fn policy_for(target: Target) -> Box<dyn NamePolicy> {
    match target {
        Target::Graphql => Box::new(GraphqlNames),
        Target::Python => Box::new(PythonNames),
        Target::Thrift => Box::new(ThriftNames),
    }
}

/// Checks a transformed name against the common identifier grammar
/// `[A-Za-z_][A-Za-z0-9_]*`.
fn check_identifier(name: &str) -> Result<(), NamingError> {
    let mut chars = name.chars();

    let Some(first) = chars.next() else {
        return Err(NamingError::InvalidIdentifier {
            name: name.to_owned(),
            fault: IdentifierFault::Empty,
        });
    };

    if first.is_ascii_digit() {
        return Err(NamingError::InvalidIdentifier {
            name: name.to_owned(),
            fault: IdentifierFault::LeadingDigit,
        });
    }

    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(NamingError::InvalidIdentifier {
            name: name.to_owned(),
            fault: IdentifierFault::IllegalChar(first),
        });
    }

    for c in chars {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            return Err(NamingError::InvalidIdentifier {
                name: name.to_owned(),
                fault: IdentifierFault::IllegalChar(c),
            });
        }
    }

    Ok(())
}

/// Double-underscore prefixes are reserved in every supported target
/// (introspection names in GraphQL, dunder names in Python), checked against
/// the original spelling before any transform runs.
fn check_reserved_prefix(raw: &str) -> Result<(), NamingError> {
    if raw.starts_with("__") {
        return Err(NamingError::ReservedPrefix {
            name: raw.to_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grammar_faults_are_specific() {
        assert_eq!(
            check_identifier(""),
            Err(NamingError::InvalidIdentifier {
                name: String::new(),
                fault: IdentifierFault::Empty,
            })
        );
        assert_eq!(
            check_identifier("1abc"),
            Err(NamingError::InvalidIdentifier {
                name: "1abc".to_owned(),
                fault: IdentifierFault::LeadingDigit,
            })
        );
        assert_eq!(
            check_identifier("ab-c"),
            Err(NamingError::InvalidIdentifier {
                name: "ab-c".to_owned(),
                fault: IdentifierFault::IllegalChar('-'),
            })
        );
        assert!(check_identifier("_abc9").is_ok());
    }

    #[test]
    fn same_input_same_output() {
        let policy = GraphqlNames;
        let a = policy.final_name("user_profile", ElementKind::Object).unwrap();
        let b = policy.final_name("user_profile", ElementKind::Object).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, "UserProfile");
    }
}
