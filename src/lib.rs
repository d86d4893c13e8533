//! Core engine of a multi-target source-code generator.
//!
//! Declarations are authored as an in-memory tree and may reference one
//! another through [`Refkey`] handles minted before their target exists.
//! [`render`] walks the tree twice: a declare pass registers every symbol
//! per output file, then emission writes the files while resolving
//! references lazily and synthesizing whatever import statements the target
//! needs. Validations that need the whole graph run last, and their
//! failures are collected rather than thrown.
//!
//! ```
//! use quill::{render, Decl, FileDecl, Package, Refkey, RenderOptions, Target, TypeExpr};
//!
//! let user = Refkey::new();
//! let package = Package::new()
//!     .file(FileDecl::new("models.py").decl(Decl::object("User").keyed(user)))
//!     .file(FileDecl::new("api.py").decl(
//!         Decl::object("Session").member(Decl::field("owner", TypeExpr::Named(user))),
//!     ));
//!
//! let output = render(&package, RenderOptions::new(Target::Python)).unwrap();
//! assert!(output.succeeded());
//! ```

pub mod render;

pub use render::{render, OutputFile, RenderError, RenderOptions, RenderOutput};

pub use quill_naming::{policy_for, GraphqlNames, NamePolicy, NamingError, PythonNames, ThriftNames};
pub use quill_resolve::{Resolution, Resolver, Session, Usage};
pub use quill_tree::{
    Builtin, ConstValue, Decl, DeclMeta, ElementKind, FileDecl, Package, Refkey, Target, TypeExpr,
};
pub use quill_utils::report::{Issue, Report, Severity};
pub use quill_validate::{ValidateError, ValidationRegistry};
