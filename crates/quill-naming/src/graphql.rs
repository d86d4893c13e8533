use quill_tree::ElementKind;

use crate::error::NamingError;
use crate::{case, check_identifier, check_reserved_prefix, NamePolicy};

/// GraphQL has almost no reserved words, but a handful of spellings are
/// unusable in type position.
const RESERVED: &[&str] = &["on", "true", "false", "null"];

/// Name policy for the GraphQL schema-definition target.
///
/// Double-underscore names are rejected outright: that prefix is reserved
/// for the introspection system.
pub struct GraphqlNames;

impl NamePolicy for GraphqlNames {
    fn final_name(&self, raw: &str, kind: ElementKind) -> Result<String, NamingError> {
        check_reserved_prefix(raw)?;

        let name = case::apply(raw, kind.casing());
        check_identifier(&name)?;

        if RESERVED.contains(&name.as_str()) {
            return Err(NamingError::Reserved { name });
        }

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_select_casing() {
        let policy = GraphqlNames;

        assert_eq!(
            policy.final_name("user_profile", ElementKind::Object).unwrap(),
            "UserProfile"
        );
        assert_eq!(
            policy.final_name("created_at", ElementKind::Field).unwrap(),
            "createdAt"
        );
        assert_eq!(
            policy.final_name("notFound", ElementKind::EnumValue).unwrap(),
            "NOT_FOUND"
        );
    }

    #[test]
    fn introspection_prefix_is_rejected() {
        let policy = GraphqlNames;

        assert!(matches!(
            policy.final_name("__typename", ElementKind::Field),
            Err(NamingError::ReservedPrefix { .. })
        ));
    }

    #[test]
    fn single_underscore_is_kept() {
        let policy = GraphqlNames;

        assert_eq!(
            policy.final_name("_private", ElementKind::Field).unwrap(),
            "_private"
        );
    }

    #[test]
    fn reserved_spellings_fail() {
        let policy = GraphqlNames;

        assert_eq!(
            policy.final_name("on", ElementKind::Field),
            Err(NamingError::Reserved {
                name: "on".to_owned()
            })
        );
    }
}
