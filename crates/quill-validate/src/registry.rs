//! The deferred validation registry.
//!
//! Checks that need the whole declaration graph cannot run while the tree is
//! still being walked. They queue up here and run exactly once, after every
//! declaration has been registered and every refkey has had its chance to
//! bind. Failures are collected, so one job reports all of them.

use log::debug;

use quill_resolve::{Session, SymbolId};
use quill_tree::DeclMeta;
use quill_utils::errors::Errors;

use crate::cycle::implements_closure;
use crate::error::ValidateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationTask {
    /// Walk the target's transitive `implements` closure, rejecting cycles.
    ImplementsClosure { target: SymbolId },
    /// Members of a mutually-exclusive input group must be nullable and
    /// default-free.
    OneOfGroup { target: SymbolId },
}

#[derive(Debug, Default)]
pub struct ValidationRegistry {
    tasks: Vec<ValidationTask>,
}

impl ValidationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, task: ValidationTask) {
        self.tasks.push(task);
    }

    /// Derives the task queue from the declared symbols.
    pub fn collect(sess: &Session) -> Self {
        let mut registry = Self::new();

        for (id, data) in sess.symbols.iter() {
            if data.alias_of.is_some() {
                continue;
            }
            match &data.meta {
                DeclMeta::Object { implements } | DeclMeta::Interface { implements }
                    if !implements.is_empty() =>
                {
                    registry.register(ValidationTask::ImplementsClosure { target: id });
                }
                DeclMeta::InputObject { one_of: true } => {
                    registry.register(ValidationTask::OneOfGroup { target: id });
                }
                _ => {}
            }
        }

        debug!("collected {} validation tasks", registry.tasks.len());
        registry
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Runs every queued task and collects the failures.
    pub fn run_all(&self, sess: &Session) -> Errors<ValidateError> {
        let mut errors = Errors::new();

        for &task in &self.tasks {
            match task {
                ValidationTask::ImplementsClosure { target } => {
                    if let Err(error) = implements_closure(target, sess) {
                        errors.push(error);
                    }
                }
                ValidationTask::OneOfGroup { target } => {
                    errors.extend(check_one_of(target, sess));
                }
            }
        }

        errors
    }
}

fn check_one_of(target: SymbolId, sess: &Session) -> Vec<ValidateError> {
    let Some(scope) = sess.symbols[target].member_scope else {
        return Vec::new();
    };
    let owner = sess.symbol_name(target).to_owned();

    // Rib order is hash order; sort by symbol id so the diagnostics come
    // back in declaration order.
    let mut members: Vec<_> = sess.scopes[scope].rib.symbols().collect();
    members.sort_unstable();

    let mut errors = Vec::new();
    for symbol in members {
        let DeclMeta::Member {
            nullable, default, ..
        } = &sess.symbols[symbol].meta
        else {
            continue;
        };

        let field = sess.symbol_name(symbol).to_owned();
        if !nullable {
            errors.push(ValidateError::OneOfNotNullable {
                owner: owner.clone(),
                field,
            });
        } else if default.is_some() {
            errors.push(ValidateError::OneOfDefault {
                owner: owner.clone(),
                field,
            });
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_naming::GraphqlNames;
    use quill_resolve::declare;
    use quill_tree::{Builtin, ConstValue, Decl, FileDecl, Package, Refkey, TypeExpr};

    fn session_with(package: Package) -> Session {
        let mut sess = Session::new();
        declare(&package, &GraphqlNames, &mut sess).unwrap();
        sess
    }

    #[test]
    fn collect_queues_only_symbols_that_need_checking() {
        let a = Refkey::new();
        let sess = session_with(
            Package::new().file(
                FileDecl::new("schema.graphql")
                    .decl(Decl::interface("A").keyed(a))
                    .decl(Decl::object("B").implements(a))
                    .decl(Decl::object("Plain"))
                    .decl(Decl::input_object("Filter").one_of())
                    .decl(Decl::input_object("Ordinary")),
            ),
        );

        let registry = ValidationRegistry::collect(&sess);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn one_of_members_must_be_nullable_and_default_free() {
        let sess = session_with(
            Package::new().file(
                FileDecl::new("schema.graphql").decl(
                    Decl::input_object("PetFilter")
                        .one_of()
                        .member(Decl::input_field("byName", TypeExpr::Builtin(Builtin::Str))),
                ),
            ),
        );

        let errors = ValidationRegistry::collect(&sess).run_all(&sess);
        assert_eq!(
            Vec::from(errors),
            vec![ValidateError::OneOfNotNullable {
                owner: "PetFilter".into(),
                field: "byName".into(),
            }]
        );
    }

    #[test]
    fn one_of_members_with_defaults_are_rejected() {
        let sess = session_with(
            Package::new().file(
                FileDecl::new("schema.graphql").decl(
                    Decl::input_object("PetFilter").one_of().member(
                        Decl::input_field("byAge", TypeExpr::Builtin(Builtin::Int))
                            .nullable()
                            .default_value(ConstValue::Int(1)),
                    ),
                ),
            ),
        );

        let errors = ValidationRegistry::collect(&sess).run_all(&sess);
        assert_eq!(
            Vec::from(errors),
            vec![ValidateError::OneOfDefault {
                owner: "PetFilter".into(),
                field: "byAge".into(),
            }]
        );
    }

    #[test]
    fn one_of_errors_come_back_in_declaration_order() {
        let sess = session_with(
            Package::new().file(
                FileDecl::new("schema.graphql").decl(
                    Decl::input_object("PetFilter")
                        .one_of()
                        .member(Decl::input_field("byName", TypeExpr::Builtin(Builtin::Str)))
                        .member(Decl::input_field("byAge", TypeExpr::Builtin(Builtin::Int)))
                        .member(Decl::input_field("byOwner", TypeExpr::Builtin(Builtin::Id))),
                ),
            ),
        );

        let errors = ValidationRegistry::collect(&sess).run_all(&sess);
        let fields: Vec<_> = Vec::from(errors)
            .into_iter()
            .map(|error| match error {
                ValidateError::OneOfNotNullable { field, .. } => field,
                other => panic!("unexpected error: {other}"),
            })
            .collect();
        assert_eq!(fields, vec!["byName", "byAge", "byOwner"]);
    }

    #[test]
    fn a_valid_tree_collects_no_errors() {
        let a = Refkey::new();
        let sess = session_with(
            Package::new().file(
                FileDecl::new("schema.graphql")
                    .decl(Decl::interface("A").keyed(a))
                    .decl(Decl::object("B").implements(a))
                    .decl(
                        Decl::input_object("Filter").one_of().member(
                            Decl::input_field("byName", TypeExpr::Builtin(Builtin::Str)).nullable(),
                        ),
                    ),
            ),
        );

        let errors = ValidationRegistry::collect(&sess).run_all(&sess);
        assert!(errors.is_empty());
    }
}
