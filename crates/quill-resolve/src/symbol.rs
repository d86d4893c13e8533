use std::ops::{Index, IndexMut};

use quill_tree::{DeclMeta, ElementKind, Refkey};
use quill_utils::define_id;
use quill_utils::interner::StrKey;

use crate::scope::ScopeId;

define_id!(SymbolId);

/// One named, emittable declaration after the declare pass.
///
/// The name is final (post name policy) and immutable except through
/// [`SymbolArena::rename`], which exists for import aliasing.
#[derive(Debug, Clone)]
pub struct SymbolData {
    pub name: StrKey,
    pub kind: ElementKind,
    /// Scope the symbol is declared in.
    pub scope: ScopeId,
    /// Module scope of the output file that owns this symbol.
    pub module: ScopeId,
    /// Set when this symbol is a local alias of a foreign symbol.
    pub alias_of: Option<SymbolId>,
    /// Scope holding this symbol's members, if it has any.
    pub member_scope: Option<ScopeId>,
    pub meta: DeclMeta,
    pub refkey: Option<Refkey>,
}

/// Arena of every symbol created during one generation job.
#[derive(Debug, Clone, Default)]
pub struct SymbolArena {
    symbols: Vec<SymbolData>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, data: SymbolData) -> SymbolId {
        let id = SymbolId::from_usize(self.symbols.len());
        self.symbols.push(data);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&SymbolData> {
        self.symbols.get(id.as_usize())
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut SymbolData> {
        self.symbols.get_mut(id.as_usize())
    }

    /// The rename hook used by aliasing; regular declarations never rename.
    pub fn rename(&mut self, id: SymbolId, name: StrKey) {
        if let Some(data) = self.get_mut(id) {
            data.name = name;
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &SymbolData)> {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, data)| (SymbolId::from_usize(i), data))
    }
}

impl Index<SymbolId> for SymbolArena {
    type Output = SymbolData;

    fn index(&self, id: SymbolId) -> &Self::Output {
        &self.symbols[id.as_usize()]
    }
}

impl IndexMut<SymbolId> for SymbolArena {
    fn index_mut(&mut self, id: SymbolId) -> &mut Self::Output {
        &mut self.symbols[id.as_usize()]
    }
}
