//! Transitive `implements` closure with cycle detection.

use quill_resolve::{Session, SymbolId};
use quill_tree::{DeclMeta, Refkey};
use quill_utils::visit::{VisitMap, VisitState};

use crate::error::ValidateError;

/// Computes the transitive closure of a symbol's `implements` edges.
///
/// Depth-first, pre-order and order-preserving: each supertype contributes
/// its name the first time it is reached, so a diamond includes the shared
/// ancestor exactly once. Revisiting a symbol that is still on the stack is
/// a cycle, reported with the full ordered path; a declaration naming itself
/// is simply the one-node case of the same rule.
pub fn implements_closure(target: SymbolId, sess: &Session) -> Result<Vec<String>, ValidateError> {
    let mut walk = Walk {
        sess,
        state: VisitMap::new(),
        stack: vec![sess.symbol_name(target).to_owned()],
        closure: Vec::new(),
    };
    walk.state.set(target, VisitState::Visiting);

    for &edge in implements_edges(&sess.symbols[target].meta) {
        walk.visit(edge, target)?;
    }

    Ok(walk.closure)
}

struct Walk<'a> {
    sess: &'a Session,
    state: VisitMap<SymbolId>,
    stack: Vec<String>,
    closure: Vec<String>,
}

impl Walk<'_> {
    fn visit(&mut self, edge: Refkey, owner: SymbolId) -> Result<(), ValidateError> {
        let Some(symbol) = self.sess.binding(edge) else {
            return Err(ValidateError::UnboundImplements {
                owner: self.sess.symbol_name(owner).to_owned(),
                refkey: edge,
            });
        };
        let name = self.sess.symbol_name(symbol).to_owned();

        match self.state.get(&symbol) {
            VisitState::Visiting => {
                let start = self.stack.iter().position(|n| *n == name).unwrap_or(0);
                let mut path = self.stack[start..].to_vec();
                path.push(name);
                Err(ValidateError::Cycle { path })
            }
            VisitState::Visited => Ok(()),
            VisitState::Unvisited => {
                self.state.set(symbol, VisitState::Visiting);
                self.stack.push(name.clone());
                if !self.closure.contains(&name) {
                    self.closure.push(name);
                }

                for &next in implements_edges(&self.sess.symbols[symbol].meta) {
                    self.visit(next, symbol)?;
                }

                self.stack.pop();
                self.state.set(symbol, VisitState::Visited);
                Ok(())
            }
        }
    }
}

fn implements_edges(meta: &DeclMeta) -> &[Refkey] {
    match meta {
        DeclMeta::Object { implements } | DeclMeta::Interface { implements } => implements,
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_naming::GraphqlNames;
    use quill_resolve::declare;
    use quill_tree::{Decl, FileDecl, Package};

    fn session_with(package: Package) -> Session {
        let mut sess = Session::new();
        declare(&package, &GraphqlNames, &mut sess).unwrap();
        sess
    }

    #[test]
    fn three_node_cycle_reports_the_ordered_path() {
        let a = Refkey::new();
        let b = Refkey::new();
        let c = Refkey::new();
        let sess = session_with(
            Package::new().file(
                FileDecl::new("schema.graphql")
                    .decl(Decl::interface("A").keyed(a).implements(b))
                    .decl(Decl::interface("B").keyed(b).implements(c))
                    .decl(Decl::interface("C").keyed(c).implements(a)),
            ),
        );

        let target = sess.binding(a).unwrap();
        let err = implements_closure(target, &sess).unwrap_err();
        assert_eq!(err.to_string(), "circular `implements` chain: A -> B -> C -> A");
    }

    #[test]
    fn self_reference_is_a_one_node_cycle() {
        let a = Refkey::new();
        let sess = session_with(
            Package::new()
                .file(FileDecl::new("schema.graphql").decl(Decl::interface("A").keyed(a).implements(a))),
        );

        let target = sess.binding(a).unwrap();
        let err = implements_closure(target, &sess).unwrap_err();
        assert_eq!(err, ValidateError::Cycle {
            path: vec!["A".into(), "A".into()],
        });
    }

    #[test]
    fn diamond_includes_the_shared_ancestor_once() {
        let a = Refkey::new();
        let b = Refkey::new();
        let c = Refkey::new();
        let d = Refkey::new();
        let sess = session_with(
            Package::new().file(
                FileDecl::new("schema.graphql")
                    .decl(Decl::interface("A").keyed(a))
                    .decl(Decl::interface("B").keyed(b).implements(a))
                    .decl(Decl::interface("C").keyed(c).implements(a))
                    .decl(Decl::object("D").keyed(d).implements(b).implements(c)),
            ),
        );

        let target = sess.binding(d).unwrap();
        let closure = implements_closure(target, &sess).unwrap();
        assert_eq!(closure, vec!["B", "A", "C"]);
    }

    #[test]
    fn unbound_implements_edges_are_reported() {
        let ghost = Refkey::new();
        let a = Refkey::new();
        let sess = session_with(
            Package::new().file(
                FileDecl::new("schema.graphql")
                    .decl(Decl::object("A").keyed(a).implements(ghost)),
            ),
        );

        let target = sess.binding(a).unwrap();
        let err = implements_closure(target, &sess).unwrap_err();
        assert!(matches!(err, ValidateError::UnboundImplements { .. }));
    }
}
