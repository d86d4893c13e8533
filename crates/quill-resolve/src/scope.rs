use std::ops::Index;

use quill_tree::ElementKind;
use quill_utils::bimap::BiMap;
use quill_utils::define_id;
use quill_utils::interner::{PathKey, StrKey};

use crate::symbol::SymbolId;

define_id!(ScopeId);

/// The three scope flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Root scope of one output file.
    Module { path: PathKey },
    /// Nested block with its own symbol table, e.g. an argument list.
    Lexical,
    /// Symbol table logically owned by a parent symbol, e.g. a type's
    /// fields. Uniqueness is relative to the owner, not global.
    Member { owner: SymbolId },
}

/// Name bindings of one scope, keyed by (final name, kind).
///
/// Two declarations conflict only when both the final name and the kind
/// match, so a field and a type may share a spelling.
#[derive(Debug, Clone, Default)]
pub struct Rib {
    binds: BiMap<(StrKey, ElementKind), SymbolId>,
}

impl Rib {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a binding, or reports the previously declared symbol.
    pub fn insert(
        &mut self,
        name: StrKey,
        kind: ElementKind,
        symbol: SymbolId,
    ) -> Result<(), SymbolId> {
        if let Some(&existing) = self.binds.get_by_key(&(name, kind)) {
            return Err(existing);
        }

        self.binds.insert((name, kind), symbol);
        Ok(())
    }

    pub fn contains(&self, name: StrKey, kind: ElementKind) -> bool {
        self.binds.contains_key(&(name, kind))
    }

    pub fn symbols(&self) -> impl Iterator<Item = SymbolId> + '_ {
        self.binds.iter().map(|(_, &symbol)| symbol)
    }

    pub fn len(&self) -> usize {
        self.binds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.binds.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ScopeData {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    pub rib: Rib,
}

/// The scope hierarchy of one generation job.
///
/// Every scope except module roots has exactly one parent. Module scopes are
/// additionally indexed by their file path, which is the deduplication key
/// of the import synthesizer.
#[derive(Debug, Clone, Default)]
pub struct ScopeTree {
    scopes: Vec<ScopeData>,
    modules: BiMap<PathKey, ScopeId>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self, data: ScopeData) -> ScopeId {
        let id = ScopeId::from_usize(self.scopes.len());
        self.scopes.push(data);
        id
    }

    pub fn create_module(&mut self, path: PathKey) -> ScopeId {
        let id = self.alloc(ScopeData {
            kind: ScopeKind::Module { path },
            parent: None,
            rib: Rib::new(),
        });
        self.modules.insert(path, id);
        id
    }

    pub fn create_lexical(&mut self, parent: ScopeId) -> ScopeId {
        self.alloc(ScopeData {
            kind: ScopeKind::Lexical,
            parent: Some(parent),
            rib: Rib::new(),
        })
    }

    pub fn create_member(&mut self, parent: ScopeId, owner: SymbolId) -> ScopeId {
        self.alloc(ScopeData {
            kind: ScopeKind::Member { owner },
            parent: Some(parent),
            rib: Rib::new(),
        })
    }

    pub fn get(&self, id: ScopeId) -> Option<&ScopeData> {
        self.scopes.get(id.as_usize())
    }

    pub fn get_mut(&mut self, id: ScopeId) -> Option<&mut ScopeData> {
        self.scopes.get_mut(id.as_usize())
    }

    pub fn module_by_path(&self, path: PathKey) -> Option<ScopeId> {
        self.modules.get_by_key(&path).copied()
    }

    /// The file path of a module scope.
    pub fn path_of(&self, module: ScopeId) -> Option<PathKey> {
        match self.get(module)?.kind {
            ScopeKind::Module { path } => Some(path),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl Index<ScopeId> for ScopeTree {
    type Output = ScopeData;

    fn index(&self, id: ScopeId) -> &Self::Output {
        &self.scopes[id.as_usize()]
    }
}
