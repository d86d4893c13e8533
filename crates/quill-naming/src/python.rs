use quill_tree::{CasingClass, ElementKind};

use crate::error::NamingError;
use crate::{case, check_identifier, check_reserved_prefix, NamePolicy};

const KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield",
];

/// Name policy for the Python target.
///
/// Member names are snake_case rather than camelCase, and keyword collisions
/// are disambiguated with a trailing underscore (the PEP 8 convention)
/// instead of raised, since every transformed spelling has an unambiguous
/// escape. Dunder prefixes stay reserved.
pub struct PythonNames;

fn casing(kind: ElementKind) -> CasingClass {
    match kind.casing() {
        CasingClass::Camel => CasingClass::Snake,
        other => other,
    }
}

impl NamePolicy for PythonNames {
    fn final_name(&self, raw: &str, kind: ElementKind) -> Result<String, NamingError> {
        check_reserved_prefix(raw)?;

        let mut name = case::apply(raw, casing(kind));
        check_identifier(&name)?;

        if KEYWORDS.contains(&name.as_str()) {
            name.push('_');
        }

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_snake_cased() {
        let policy = PythonNames;

        assert_eq!(
            policy.final_name("createdAt", ElementKind::Field).unwrap(),
            "created_at"
        );
        assert_eq!(
            policy.final_name("user_profile", ElementKind::Object).unwrap(),
            "UserProfile"
        );
    }

    #[test]
    fn keywords_get_a_suffix() {
        let policy = PythonNames;

        assert_eq!(
            policy.final_name("class", ElementKind::Field).unwrap(),
            "class_"
        );
        assert_eq!(
            policy.final_name("none", ElementKind::Object).unwrap(),
            "None_"
        );
    }

    #[test]
    fn dunder_names_are_rejected() {
        let policy = PythonNames;

        assert!(matches!(
            policy.final_name("__init__", ElementKind::Field),
            Err(NamingError::ReservedPrefix { .. })
        ));
    }

    #[test]
    fn leading_underscore_is_kept() {
        let policy = PythonNames;

        assert_eq!(
            policy.final_name("_internalId", ElementKind::Field).unwrap(),
            "_internal_id"
        );
    }
}
