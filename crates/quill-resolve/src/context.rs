use std::collections::HashMap;

use quill_tree::Refkey;
use quill_utils::interner::{PathInterner, StrInterner};

use crate::scope::{ScopeId, ScopeKind, ScopeTree};
use crate::symbol::{SymbolArena, SymbolId};

/// All mutable state of one generation job.
///
/// A session is created at the start of a job and dropped at its end;
/// nothing survives between jobs and nothing is process-global, so tests can
/// run many jobs in one process without interference.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub interner: StrInterner,
    pub paths: PathInterner,
    pub scopes: ScopeTree,
    pub symbols: SymbolArena,
    bindings: HashMap<Refkey, SymbolId>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a refkey to its declaration. At most one symbol may ever bind
    /// to a given refkey; the caller turns a second binding into an error.
    pub fn bind(&mut self, refkey: Refkey, symbol: SymbolId) -> Result<(), SymbolId> {
        if let Some(&existing) = self.bindings.get(&refkey) {
            return Err(existing);
        }
        self.bindings.insert(refkey, symbol);
        Ok(())
    }

    pub fn binding(&self, refkey: Refkey) -> Option<SymbolId> {
        self.bindings.get(&refkey).copied()
    }

    pub fn symbol_name(&self, symbol: SymbolId) -> &str {
        &self.interner[self.symbols[symbol].name]
    }

    /// Module scope owning the given symbol.
    pub fn module_of(&self, symbol: SymbolId) -> ScopeId {
        self.symbols[symbol].module
    }

    /// Module scope rooted at the given output path, if declared.
    pub fn module_scope(&self, path: &camino::Utf8Path) -> Option<ScopeId> {
        self.scopes.module_by_path(self.paths.lookup(path)?)
    }

    /// Human description of a scope for diagnostics.
    pub fn describe_scope(&self, scope: ScopeId) -> String {
        match self.scopes[scope].kind {
            ScopeKind::Module { path } => format!("file `{}`", &self.paths[path]),
            ScopeKind::Lexical => "argument list".to_owned(),
            ScopeKind::Member { owner } => {
                format!("`{}`", self.symbol_name(owner))
            }
        }
    }
}
