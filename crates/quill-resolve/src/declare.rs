use log::debug;

use quill_naming::NamePolicy;
use quill_tree::{Decl, ElementKind, Package};

use crate::context::Session;
use crate::error::ResolveError;
use crate::scope::ScopeId;
use crate::symbol::{SymbolData, SymbolId};

/// The declare pass: walks the package once, in document order, creating a
/// module scope per file and a symbol per declaration, binding refkeys as it
/// goes. Nothing is resolved here; references stay lazy until emission.
///
/// Declaration errors are fail-fast. The first duplicate name, invalid
/// identifier or rebound refkey aborts the pass.
pub fn declare(
    package: &Package,
    policy: &dyn NamePolicy,
    sess: &mut Session,
) -> Result<(), ResolveError> {
    for file in &package.files {
        let path = sess.paths.intern(&file.path);

        // Exactly one module scope per path: a repeated path reopens the
        // existing scope, so redeclarations across the two file entries
        // still collide in the same rib.
        let module = match sess.scopes.module_by_path(path) {
            Some(existing) => existing,
            None => sess.scopes.create_module(path),
        };

        debug!("declare module {} for {}", module, file.path);

        let mut declarer = Declarer {
            policy,
            sess,
            module,
        };

        for decl in &file.decls {
            declarer.declare_decl(decl, module)?;
        }
    }

    Ok(())
}

struct Declarer<'a> {
    policy: &'a dyn NamePolicy,
    sess: &'a mut Session,
    module: ScopeId,
}

impl Declarer<'_> {
    fn declare_decl(&mut self, decl: &Decl, scope: ScopeId) -> Result<SymbolId, ResolveError> {
        let name = self.policy.final_name(&decl.name, decl.kind)?;
        let name_key = self.sess.interner.intern(name.as_str());

        let symbol = self.sess.symbols.alloc(SymbolData {
            name: name_key,
            kind: decl.kind,
            scope,
            module: self.module,
            alias_of: None,
            member_scope: None,
            meta: decl.meta.clone(),
            refkey: decl.refkey,
        });

        let inserted = self
            .sess
            .scopes
            .get_mut(scope)
            .expect("declaring into an unknown scope")
            .rib
            .insert(name_key, decl.kind, symbol);

        if let Err(previous) = inserted {
            return Err(ResolveError::DuplicateSymbol {
                name,
                kind: decl.kind,
                previous: self.sess.symbol_name(previous).to_owned(),
                scope: self.sess.describe_scope(scope),
            });
        }

        debug!("declared {} `{}` in scope {}", decl.kind, name, scope);

        if let Some(refkey) = decl.refkey {
            if let Err(bound_to) = self.sess.bind(refkey, symbol) {
                return Err(ResolveError::RefkeyRebound {
                    refkey,
                    bound_to: self.sess.symbol_name(bound_to).to_owned(),
                });
            }
        }

        if !decl.members.is_empty() {
            // Functions get a lexical scope for their argument list; every
            // other container owns a member scope, so member names are
            // unique relative to the owner, never globally.
            let inner = match decl.kind {
                ElementKind::Function | ElementKind::Field => {
                    self.sess.scopes.create_lexical(scope)
                }
                _ => self.sess.scopes.create_member(scope, symbol),
            };
            self.sess.symbols[symbol].member_scope = Some(inner);

            for member in &decl.members {
                self.declare_decl(member, inner)?;
            }
        }

        Ok(symbol)
    }
}
