//! Scope tree, symbol table, the declare pass and the reference resolver.
//!
//! Resolution is two-phase by necessity: declarations are authored in an
//! arbitrary, possibly forward-referencing order, so a reference graph is
//! only knowable after the whole tree has been walked once. The declare pass
//! registers every symbol and binds refkeys; emission later resolves refkeys
//! lazily through [`resolver::Resolver`].

pub mod context;
pub mod declare;
pub mod error;
pub mod resolver;
pub mod scope;
pub mod symbol;

pub use context::Session;
pub use declare::declare;
pub use error::ResolveError;
pub use resolver::{ImportSink, Resolution, Resolver, Usage};
pub use scope::{ScopeData, ScopeId, ScopeKind, ScopeTree};
pub use symbol::{SymbolArena, SymbolData, SymbolId};
