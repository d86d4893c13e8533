use std::collections::{BTreeSet, HashMap};

use log::trace;

use quill_tree::Refkey;

use crate::context::Session;
use crate::scope::ScopeId;
use crate::symbol::SymbolId;

/// Placeholder printed for a reference that never bound. The surrounding
/// document is still produced; the failure surfaces as one collected
/// diagnostic instead of aborting generation.
pub const UNRESOLVED: &str = "<unresolved>";

/// Classification of a reference site. A type-only import may be guarded
/// behind a conditional typing block; a value use may not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Usage {
    Type,
    Value,
}

/// Where the resolver reports cross-module uses.
///
/// Implemented by the per-target import synthesizers: the return value is
/// the display name the consuming module must print for the symbol.
pub trait ImportSink {
    fn record_foreign_use(
        &mut self,
        consumer: ScopeId,
        symbol: SymbolId,
        usage: Usage,
        sess: &mut Session,
    ) -> String;
}

/// Outcome of resolving one refkey from one consuming module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved { symbol: SymbolId, display: String },
    Unresolved(Refkey),
}

impl Resolution {
    pub fn display(&self) -> &str {
        match self {
            Resolution::Resolved { display, .. } => display,
            Resolution::Unresolved(_) => UNRESOLVED,
        }
    }

    pub fn symbol(&self) -> Option<SymbolId> {
        match self {
            Resolution::Resolved { symbol, .. } => Some(*symbol),
            Resolution::Unresolved(_) => None,
        }
    }
}

/// Lazy, memoized refkey resolution.
///
/// A refkey is looked up the first time an emission site actually prints it,
/// never at creation time. Resolution is memoized per (consuming module,
/// refkey): repeated sites see the same display name, and the import
/// synthesizer is consulted once — plus once more if a later site upgrades
/// the usage from type-only to value, which upgrades the existing record in
/// place rather than creating another one.
#[derive(Debug, Default)]
pub struct Resolver {
    memo: HashMap<(ScopeId, Refkey), (Resolution, Usage)>,
    unresolved: BTreeSet<Refkey>,
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn resolve(
        &mut self,
        consumer: ScopeId,
        refkey: Refkey,
        usage: Usage,
        sess: &mut Session,
        imports: &mut dyn ImportSink,
    ) -> Resolution {
        if let Some((resolution, seen)) = self.memo.get(&(consumer, refkey)) {
            let resolution = resolution.clone();

            if usage > *seen {
                if let Resolution::Resolved { symbol, .. } = resolution {
                    if sess.module_of(symbol) != consumer {
                        imports.record_foreign_use(consumer, symbol, usage, sess);
                    }
                }
                self.memo.insert((consumer, refkey), (resolution.clone(), usage));
            }

            return resolution;
        }

        let resolution = match sess.binding(refkey) {
            Some(symbol) => {
                let display = if sess.module_of(symbol) == consumer {
                    sess.symbol_name(symbol).to_owned()
                } else {
                    imports.record_foreign_use(consumer, symbol, usage, sess)
                };
                Resolution::Resolved { symbol, display }
            }
            None => {
                trace!("refkey {refkey} rendered but never bound");
                self.unresolved.insert(refkey);
                Resolution::Unresolved(refkey)
            }
        };

        self.memo
            .insert((consumer, refkey), (resolution.clone(), usage));
        resolution
    }

    /// Every refkey that was rendered but never bound, in mint order.
    pub fn unresolved(&self) -> impl Iterator<Item = Refkey> + '_ {
        self.unresolved.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8Path;
    use quill_naming::GraphqlNames;
    use quill_tree::{Decl, FileDecl, Package};

    use crate::declare::declare;

    /// Sink that aliases nothing and counts how often it is consulted.
    struct CountingSink {
        calls: Vec<(ScopeId, SymbolId, Usage)>,
    }

    impl ImportSink for CountingSink {
        fn record_foreign_use(
            &mut self,
            consumer: ScopeId,
            symbol: SymbolId,
            usage: Usage,
            sess: &mut Session,
        ) -> String {
            self.calls.push((consumer, symbol, usage));
            sess.symbol_name(symbol).to_owned()
        }
    }

    fn session_with(package: Package) -> Session {
        let mut sess = Session::new();
        declare(&package, &GraphqlNames, &mut sess).unwrap();
        sess
    }

    #[test]
    fn foreign_use_is_recorded_once_per_consumer() {
        let user = Refkey::new();
        let mut sess = session_with(
            Package::new()
                .file(FileDecl::new("models.graphql").decl(Decl::object("User").keyed(user)))
                .file(FileDecl::new("api.graphql")),
        );

        let models = sess.scopes.module_by_path(sess.paths.lookup(Utf8Path::new("models.graphql")).unwrap()).unwrap();
        let api = sess.scopes.module_by_path(sess.paths.lookup(Utf8Path::new("api.graphql")).unwrap()).unwrap();

        let mut resolver = Resolver::new();
        let mut sink = CountingSink { calls: Vec::new() };

        let first = resolver.resolve(api, user, Usage::Type, &mut sess, &mut sink);
        let second = resolver.resolve(api, user, Usage::Type, &mut sess, &mut sink);

        assert_eq!(first, second);
        assert_eq!(first.display(), "User");
        assert_eq!(sink.calls.len(), 1);

        // A local use never consults the synthesizer.
        let local = resolver.resolve(models, user, Usage::Type, &mut sess, &mut sink);
        assert_eq!(local.display(), "User");
        assert_eq!(sink.calls.len(), 1);
    }

    #[test]
    fn usage_upgrade_consults_the_sink_once_more() {
        let user = Refkey::new();
        let mut sess = session_with(
            Package::new()
                .file(FileDecl::new("models.py").decl(Decl::object("User").keyed(user)))
                .file(FileDecl::new("api.py")),
        );

        let api = sess.scopes.module_by_path(sess.paths.lookup(Utf8Path::new("api.py")).unwrap()).unwrap();

        let mut resolver = Resolver::new();
        let mut sink = CountingSink { calls: Vec::new() };

        resolver.resolve(api, user, Usage::Type, &mut sess, &mut sink);
        resolver.resolve(api, user, Usage::Value, &mut sess, &mut sink);
        resolver.resolve(api, user, Usage::Value, &mut sess, &mut sink);
        resolver.resolve(api, user, Usage::Type, &mut sess, &mut sink);

        let usages: Vec<Usage> = sink.calls.iter().map(|(_, _, u)| *u).collect();
        assert_eq!(usages, vec![Usage::Type, Usage::Value]);
    }

    #[test]
    fn unbound_refkeys_resolve_to_the_sentinel() {
        let ghost = Refkey::new();
        let mut sess = session_with(Package::new().file(FileDecl::new("api.graphql")));

        let api = sess.scopes.module_by_path(sess.paths.lookup(Utf8Path::new("api.graphql")).unwrap()).unwrap();

        let mut resolver = Resolver::new();
        let mut sink = CountingSink { calls: Vec::new() };

        let resolution = resolver.resolve(api, ghost, Usage::Type, &mut sess, &mut sink);
        assert_eq!(resolution, Resolution::Unresolved(ghost));
        assert_eq!(resolution.display(), UNRESOLVED);
        assert_eq!(resolver.unresolved().collect::<Vec<_>>(), vec![ghost]);
        assert!(sink.calls.is_empty());
    }
}
