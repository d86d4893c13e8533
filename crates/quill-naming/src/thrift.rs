use quill_tree::ElementKind;

use crate::error::NamingError;
use crate::{case, check_identifier, check_reserved_prefix, NamePolicy};

const RESERVED: &[&str] = &[
    "binary", "bool", "byte", "const", "double", "enum", "exception", "extends", "i16", "i32",
    "i64", "include", "list", "map", "namespace", "oneway", "optional", "required", "service",
    "set", "string", "struct", "throws", "typedef", "union", "void",
];

/// Name policy for the Thrift IDL target. Reserved words raise; Thrift has
/// no sanctioned escape spelling.
pub struct ThriftNames;

impl NamePolicy for ThriftNames {
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
    fn services_are_pascal_cased() {
        let policy = ThriftNames;

        assert_eq!(
            policy.final_name("user_service", ElementKind::Service).unwrap(),
            "UserService"
        );
        assert_eq!(
            policy.final_name("get_user", ElementKind::Function).unwrap(),
            "getUser"
        );
    }

    #[test]
    fn idl_keywords_are_rejected() {
        let policy = ThriftNames;

        assert_eq!(
            policy.final_name("struct", ElementKind::Field),
            Err(NamingError::Reserved {
                name: "struct".to_owned()
            })
        );
    }
}
