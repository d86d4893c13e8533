use derive_more::Display;
use serde::{Deserialize, Serialize};

/// The kind of a declared element.
///
/// Kinds are target-neutral: a GraphQL object and a Python dataclass are both
/// `Object`. The kind selects the casing class of the name policy and the
/// namespace used for duplicate detection within a scope.
#[derive(
    Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ElementKind {
    Object,
    Interface,
    InputObject,
    Enum,
    EnumValue,
    Union,
    Scalar,
    Directive,
    Field,
    InputField,
    Argument,
    Service,
    Function,
    Const,
}

/// How a raw name is cased before validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CasingClass {
    /// Type-like declarations: `PascalCase`.
    Pascal,
    /// Member-like declarations: `lowerCamelCase`.
    Camel,
    /// Member-like declarations for targets that prefer `lower_snake_case`.
    Snake,
    /// Enum values and constants: `UPPER_SNAKE_CASE`.
    UpperSnake,
}

impl ElementKind {
    pub fn casing(self) -> CasingClass {
        match self {
            ElementKind::Object
            | ElementKind::Interface
            | ElementKind::InputObject
            | ElementKind::Enum
            | ElementKind::Union
            | ElementKind::Scalar
            | ElementKind::Service => CasingClass::Pascal,
            ElementKind::Directive
            | ElementKind::Field
            | ElementKind::InputField
            | ElementKind::Argument
            | ElementKind::Function => CasingClass::Camel,
            ElementKind::EnumValue | ElementKind::Const => CasingClass::UpperSnake,
        }
    }
}
