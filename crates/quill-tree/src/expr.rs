use derive_more::{Display, From};

use crate::refkey::Refkey;

/// A builtin scalar type, mapped to a concrete spelling per target.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    #[display("string")]
    Str,
    #[display("int")]
    Int,
    #[display("float")]
    Float,
    #[display("bool")]
    Bool,
    #[display("id")]
    Id,
}

/// A type reference appearing in a field, argument or constant.
///
/// Nullability is an attribute of the declaring member, not of the type
/// expression, since the three targets spell it in incompatible positions.
#[derive(Debug, Clone, PartialEq, From)]
pub enum TypeExpr {
    /// Reference to another declaration, resolved at emission time.
    Named(Refkey),
    Builtin(Builtin),
    List(Box<TypeExpr>),
}

impl TypeExpr {
    pub fn list(inner: TypeExpr) -> Self {
        TypeExpr::List(Box::new(inner))
    }

    /// Refkeys mentioned anywhere in this expression, outermost first.
    pub fn refkeys(&self) -> Vec<Refkey> {
        match self {
            TypeExpr::Named(key) => vec![*key],
            TypeExpr::Builtin(_) => Vec::new(),
            TypeExpr::List(inner) => inner.refkeys(),
        }
    }
}

/// A constant value, used for defaults and `Const` declarations.
#[derive(Debug, Clone, PartialEq, From)]
pub enum ConstValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    #[from(String, &str)]
    Str(String),
    /// Reference to another declared constant or enum value. For targets
    /// that distinguish them, this is a *value* use, not a type use.
    Ref(Refkey),
    List(Vec<ConstValue>),
}

impl ConstValue {
    pub fn refkeys(&self) -> Vec<Refkey> {
        match self {
            ConstValue::Ref(key) => vec![*key],
            ConstValue::List(items) => items.iter().flat_map(ConstValue::refkeys).collect(),
            _ => Vec::new(),
        }
    }
}
