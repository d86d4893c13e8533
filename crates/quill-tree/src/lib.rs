//! The declarative input model of the generator.
//!
//! A [`Package`] is a set of output files, each holding a tree of [`Decl`]
//! nodes. Declarations may reference one another through [`Refkey`] handles,
//! which are minted before their target declaration needs to exist.

pub mod decl;
pub mod expr;
pub mod kind;
pub mod refkey;

pub use decl::{Decl, DeclMeta, FileDecl, Package};
pub use expr::{Builtin, ConstValue, TypeExpr};
pub use kind::{CasingClass, ElementKind};
pub use refkey::Refkey;

use derive_more::Display;

/// Output language of one generation job.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    #[display("graphql")]
    Graphql,
    #[display("python")]
    Python,
    #[display("thrift")]
    Thrift,
}
