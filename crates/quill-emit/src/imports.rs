//! The three import synthesis policies.
//!
//! All three implement [`ImportSink`]: the resolver hands them every
//! cross-module use and prints whatever display name they return. None of
//! them fail at resolution time; a use of an undeclared module means the
//! refkey never bound, which the resolver already reports separately.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use camino::Utf8Path;
use log::debug;

use quill_resolve::{ImportSink, ScopeId, Session, SymbolData, SymbolId, Usage};
use quill_tree::DeclMeta;
use quill_utils::interner::PathKey;

use crate::error::EmitError;

/// Synthesizer for targets without a module system. Cross-file references
/// render the bare declared name and nothing is recorded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImports;

impl ImportSink for NoImports {
    fn record_foreign_use(
        &mut self,
        _consumer: ScopeId,
        symbol: SymbolId,
        _usage: Usage,
        sess: &mut Session,
    ) -> String {
        sess.symbol_name(symbol).to_owned()
    }
}

#[derive(Debug, Clone)]
struct AliasEntry {
    alias: String,
    manual: bool,
}

/// Synthesizer for include-based targets.
///
/// Aliases are per job: the first cross-file use of a target module mints a
/// deterministic alias from the file stem, unless a manual alias was
/// registered for that path beforehand. A manual alias upgrades an auto
/// record in place; a second, different manual alias for the same path is
/// an error. References render `alias.Name`.
#[derive(Debug, Default)]
pub struct IncludeTable {
    aliases: HashMap<PathKey, AliasEntry>,
    used: HashMap<ScopeId, BTreeSet<PathKey>>,
}

impl IncludeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a manual alias for an include path. Manual beats auto; two
    /// differing manual aliases for one path conflict.
    pub fn register_alias(
        &mut self,
        sess: &mut Session,
        path: impl AsRef<Utf8Path>,
        alias: impl Into<String>,
    ) -> Result<(), EmitError> {
        let path = path.as_ref();
        let key = sess.paths.intern(path);
        let alias = alias.into();

        match self.aliases.get_mut(&key) {
            Some(entry) if entry.manual && entry.alias != alias => {
                Err(EmitError::ConflictingAlias {
                    path: path.to_string(),
                    existing: entry.alias.clone(),
                    requested: alias,
                })
            }
            Some(entry) => {
                debug!("alias for {path} upgraded to manual `{alias}`");
                entry.alias = alias;
                entry.manual = true;
                Ok(())
            }
            None => {
                self.aliases.insert(
                    key,
                    AliasEntry {
                        alias,
                        manual: true,
                    },
                );
                Ok(())
            }
        }
    }

    pub fn alias_of(&self, path: PathKey) -> Option<&str> {
        self.aliases.get(&path).map(|entry| entry.alias.as_str())
    }

    /// Include statements the consuming module needs, in first-interned
    /// path order.
    pub fn includes(&self, consumer: ScopeId, sess: &Session) -> Vec<String> {
        self.used
            .get(&consumer)
            .into_iter()
            .flatten()
            .map(|&path| format!("include \"{}\"", &sess.paths[path]))
            .collect()
    }

    /// Number of target modules the consumer pulled in.
    pub fn record_count(&self, consumer: ScopeId) -> usize {
        self.used.get(&consumer).map_or(0, BTreeSet::len)
    }

    fn ensure_alias(&mut self, path: PathKey, sess: &Session) -> String {
        if let Some(entry) = self.aliases.get(&path) {
            return entry.alias.clone();
        }

        let stem = sess.paths[path].file_stem().unwrap_or("include");
        let base = sanitize_alias(stem);

        let mut candidate = base.clone();
        let mut n = 2;
        while self.aliases.values().any(|entry| entry.alias == candidate) {
            candidate = format!("{base}{n}");
            n += 1;
        }

        self.aliases.insert(
            path,
            AliasEntry {
                alias: candidate.clone(),
                manual: false,
            },
        );
        candidate
    }
}

impl ImportSink for IncludeTable {
    fn record_foreign_use(
        &mut self,
        consumer: ScopeId,
        symbol: SymbolId,
        _usage: Usage,
        sess: &mut Session,
    ) -> String {
        let target = sess.module_of(symbol);
        let Some(path) = sess.scopes.path_of(target) else {
            return sess.symbol_name(symbol).to_owned();
        };

        let alias = self.ensure_alias(path, sess);
        self.used.entry(consumer).or_default().insert(path);

        format!("{alias}.{}", sess.symbol_name(symbol))
    }
}

fn sanitize_alias(stem: &str) -> String {
    let mut alias: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if alias.starts_with(|c: char| c.is_ascii_digit()) {
        alias.insert(0, '_');
    }
    if alias.is_empty() {
        alias.push_str("include");
    }
    alias
}

#[derive(Debug)]
struct ImportedSymbol {
    alias: SymbolId,
    usage: Usage,
}

/// One consuming module's imports from one target module.
#[derive(Debug, Default)]
struct ModuleImport {
    symbols: BTreeMap<SymbolId, ImportedSymbol>,
}

/// Import statements rendered for one consuming module. Guarded lines go
/// under the conditional typing block.
#[derive(Debug, Default)]
pub struct ImportLines {
    pub plain: Vec<String>,
    pub guarded: Vec<String>,
}

/// Synthesizer for targets with a typing-only import guard.
///
/// Every foreign symbol is imported type-only by default; the first value
/// use upgrades the record in place, and a record is never downgraded. Each
/// imported symbol gets a local alias symbol in the consuming module scope,
/// so a name collision with a local declaration (or another import)
/// disambiguates with trailing underscores instead of shadowing.
#[derive(Debug, Default)]
pub struct ImportTable {
    records: HashMap<ScopeId, BTreeMap<ScopeId, ModuleImport>>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of (consumer, target module) records.
    pub fn record_count(&self, consumer: ScopeId) -> usize {
        self.records.get(&consumer).map_or(0, BTreeMap::len)
    }

    pub fn has_guarded(&self, consumer: ScopeId) -> bool {
        self.records.get(&consumer).is_some_and(|modules| {
            modules
                .values()
                .flat_map(|import| import.symbols.values())
                .any(|imported| imported.usage == Usage::Type)
        })
    }

    /// Renders the import statements of one consuming module, one line per
    /// target module, symbols in declaration order.
    pub fn statements(&self, consumer: ScopeId, sess: &Session) -> ImportLines {
        let mut lines = ImportLines::default();
        let Some(modules) = self.records.get(&consumer) else {
            return lines;
        };

        for (&module, import) in modules {
            let Some(path) = sess.scopes.path_of(module) else {
                continue;
            };
            let module_name = module_name(&sess.paths[path]);

            let mut typed = Vec::new();
            let mut valued = Vec::new();
            for (&symbol, imported) in &import.symbols {
                let original = sess.symbol_name(symbol).to_owned();
                let local = sess.symbol_name(imported.alias);
                let item = if original == local {
                    original
                } else {
                    format!("{original} as {local}")
                };
                match imported.usage {
                    Usage::Type => typed.push(item),
                    Usage::Value => valued.push(item),
                }
            }

            if !valued.is_empty() {
                lines
                    .plain
                    .push(format!("from {module_name} import {}", valued.join(", ")));
            }
            if !typed.is_empty() {
                lines
                    .guarded
                    .push(format!("from {module_name} import {}", typed.join(", ")));
            }
        }

        lines
    }

    fn mint_alias(consumer: ScopeId, symbol: SymbolId, sess: &mut Session) -> SymbolId {
        let kind = sess.symbols[symbol].kind;
        let mut name = sess.symbol_name(symbol).to_owned();

        loop {
            let key = sess.interner.intern(name.as_str());
            if sess.scopes[consumer].rib.contains(key, kind) {
                name.push('_');
                continue;
            }

            let alias = sess.symbols.alloc(SymbolData {
                name: key,
                kind,
                scope: consumer,
                module: consumer,
                alias_of: Some(symbol),
                member_scope: None,
                meta: DeclMeta::Plain,
                refkey: None,
            });
            if let Some(scope) = sess.scopes.get_mut(consumer) {
                let _ = scope.rib.insert(key, kind, alias);
            }
            return alias;
        }
    }
}

impl ImportSink for ImportTable {
    fn record_foreign_use(
        &mut self,
        consumer: ScopeId,
        symbol: SymbolId,
        usage: Usage,
        sess: &mut Session,
    ) -> String {
        let target = sess.module_of(symbol);
        let import = self
            .records
            .entry(consumer)
            .or_default()
            .entry(target)
            .or_default();

        if let Some(imported) = import.symbols.get_mut(&symbol) {
            if usage > imported.usage {
                debug!("import of {symbol} upgraded to a value use");
                imported.usage = usage;
            }
            return sess.symbol_name(imported.alias).to_owned();
        }

        let alias = Self::mint_alias(consumer, symbol, sess);
        import.symbols.insert(symbol, ImportedSymbol { alias, usage });
        sess.symbol_name(alias).to_owned()
    }
}

/// `models/user.py` imports as `models.user`.
fn module_name(path: &Utf8Path) -> String {
    path.with_extension("").as_str().replace('/', ".")
}
