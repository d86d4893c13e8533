//! Schema-definition-language writer.
//!
//! No module system: cross-file references print the bare declared name via
//! [`NoImports`], and composing the emitted files into one valid schema is
//! the caller's concern.

use log::debug;

use quill_naming::NamePolicy;
use quill_resolve::{Resolver, ScopeId, Session, Usage};
use quill_tree::{Builtin, ConstValue, Decl, DeclMeta, ElementKind, FileDecl, Refkey, TypeExpr};

use crate::error::EmitError;
use crate::imports::NoImports;

pub fn emit_file(
    file: &FileDecl,
    sess: &mut Session,
    resolver: &mut Resolver,
    imports: &mut NoImports,
    policy: &dyn NamePolicy,
) -> Result<String, EmitError> {
    let module = sess
        .module_scope(&file.path)
        .ok_or_else(|| EmitError::UnknownModule {
            path: file.path.to_string(),
        })?;

    let mut writer = Writer {
        module,
        sess,
        resolver,
        imports,
        policy,
    };

    let mut blocks = Vec::new();
    for decl in &file.decls {
        if let Some(block) = writer.decl(decl)? {
            blocks.push(block);
        }
    }

    Ok(blocks.join("\n\n") + "\n")
}

struct Writer<'a> {
    module: ScopeId,
    sess: &'a mut Session,
    resolver: &'a mut Resolver,
    imports: &'a mut NoImports,
    policy: &'a dyn NamePolicy,
}

impl Writer<'_> {
    fn name(&self, decl: &Decl) -> Result<String, EmitError> {
        Ok(self.policy.final_name(&decl.name, decl.kind)?)
    }

    fn resolve(&mut self, refkey: Refkey, usage: Usage) -> String {
        self.resolver
            .resolve(self.module, refkey, usage, self.sess, self.imports)
            .display()
            .to_owned()
    }

    fn decl(&mut self, decl: &Decl) -> Result<Option<String>, EmitError> {
        let name = self.name(decl)?;
        let mut out = String::new();

        if let Some(doc) = &decl.doc {
            out.push_str(&format!("\"\"\"{doc}\"\"\"\n"));
        }

        match &decl.meta {
            DeclMeta::Object { implements } => {
                out.push_str(&format!("type {name}"));
                out.push_str(&self.implements_clause(implements));
                out.push_str(&self.field_block(decl)?);
            }
            DeclMeta::Interface { implements } => {
                out.push_str(&format!("interface {name}"));
                out.push_str(&self.implements_clause(implements));
                out.push_str(&self.field_block(decl)?);
            }
            DeclMeta::InputObject { one_of } => {
                out.push_str(&format!("input {name}"));
                if *one_of {
                    out.push_str(" @oneOf");
                }
                out.push_str(&self.field_block(decl)?);
            }
            DeclMeta::Union { variants } => {
                let variants: Vec<String> = variants
                    .iter()
                    .map(|&key| self.resolve(key, Usage::Type))
                    .collect();
                out.push_str(&format!("union {name} = {}", variants.join(" | ")));
            }
            DeclMeta::Directive { locations } => {
                out.push_str(&format!("directive @{name}"));
                out.push_str(&self.argument_list(&decl.members)?);
                out.push_str(&format!(" on {}", locations.join(" | ")));
            }
            DeclMeta::Plain => match decl.kind {
                ElementKind::Enum => {
                    out.push_str(&format!("enum {name} {{\n"));
                    for value in &decl.members {
                        if let Some(doc) = &value.doc {
                            out.push_str(&format!("  \"\"\"{doc}\"\"\"\n"));
                        }
                        out.push_str(&format!("  {}\n", self.name(value)?));
                    }
                    out.push('}');
                }
                ElementKind::Scalar => {
                    out.push_str(&format!("scalar {name}"));
                }
                _ => {
                    debug!("{} `{name}` has no schema-language form", decl.kind);
                    return Ok(None);
                }
            },
            // Services and constants have no schema-language form.
            _ => {
                debug!("{} `{name}` has no schema-language form", decl.kind);
                return Ok(None);
            }
        }

        Ok(Some(out))
    }

    fn implements_clause(&mut self, implements: &[Refkey]) -> String {
        if implements.is_empty() {
            return String::new();
        }
        let names: Vec<String> = implements
            .iter()
            .map(|&key| self.resolve(key, Usage::Type))
            .collect();
        format!(" implements {}", names.join(" & "))
    }

    fn field_block(&mut self, decl: &Decl) -> Result<String, EmitError> {
        let mut out = String::from(" {\n");
        for field in &decl.members {
            if let Some(doc) = &field.doc {
                out.push_str(&format!("  \"\"\"{doc}\"\"\"\n"));
            }
            out.push_str("  ");
            out.push_str(&self.member(field)?);
            out.push('\n');
        }
        out.push('}');
        Ok(out)
    }

    /// One field or argument: `name(args): Type!` with an optional default.
    fn member(&mut self, member: &Decl) -> Result<String, EmitError> {
        let name = self.name(member)?;
        let DeclMeta::Member {
            ty,
            nullable,
            default,
        } = &member.meta
        else {
            return Ok(name);
        };

        let args = self.argument_list(&member.members)?;
        let bang = if *nullable { "" } else { "!" };
        let mut out = format!("{name}{args}: {}{bang}", self.type_ref(ty));

        if let Some(value) = default {
            out.push_str(&format!(" = {}", self.value(value)));
        }
        Ok(out)
    }

    fn argument_list(&mut self, args: &[Decl]) -> Result<String, EmitError> {
        if args.is_empty() {
            return Ok(String::new());
        }
        let rendered: Result<Vec<String>, EmitError> =
            args.iter().map(|arg| self.member(arg)).collect();
        Ok(format!("({})", rendered?.join(", ")))
    }

    fn type_ref(&mut self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(key) => self.resolve(*key, Usage::Type),
            TypeExpr::Builtin(builtin) => builtin_name(*builtin).to_owned(),
            TypeExpr::List(inner) => format!("[{}!]", self.type_ref(inner)),
        }
    }

    fn value(&mut self, value: &ConstValue) -> String {
        match value {
            ConstValue::Bool(b) => b.to_string(),
            ConstValue::Int(i) => i.to_string(),
            ConstValue::Float(f) => f.to_string(),
            ConstValue::Str(s) => format!("\"{s}\""),
            ConstValue::Ref(key) => self.resolve(*key, Usage::Value),
            ConstValue::List(items) => {
                let items: Vec<String> = items.iter().map(|item| self.value(item)).collect();
                format!("[{}]", items.join(", "))
            }
        }
    }
}

fn builtin_name(builtin: Builtin) -> &'static str {
    match builtin {
        Builtin::Str => "String",
        Builtin::Int => "Int",
        Builtin::Float => "Float",
        Builtin::Bool => "Boolean",
        Builtin::Id => "ID",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_naming::GraphqlNames;
    use quill_resolve::declare;
    use quill_tree::{FileDecl, Package};

    fn emit(package: &Package) -> Vec<String> {
        let mut sess = Session::new();
        declare(package, &GraphqlNames, &mut sess).unwrap();

        let mut resolver = Resolver::new();
        let mut imports = NoImports;
        package
            .files
            .iter()
            .map(|file| {
                emit_file(file, &mut sess, &mut resolver, &mut imports, &GraphqlNames).unwrap()
            })
            .collect()
    }

    #[test]
    fn object_with_fields_and_docs() {
        let role = Refkey::new();
        let package = Package::new().file(
            FileDecl::new("schema.graphql")
                .decl(
                    Decl::enumeration("Role")
                        .keyed(role)
                        .member(Decl::enum_value("admin"))
                        .member(Decl::enum_value("member")),
                )
                .decl(
                    Decl::object("User")
                        .docs("A registered account.")
                        .member(Decl::field("id", TypeExpr::Builtin(Builtin::Id)))
                        .member(Decl::field("role", TypeExpr::Named(role)).nullable()),
                ),
        );

        let out = emit(&package).remove(0);
        assert_eq!(
            out,
            "enum Role {\n  ADMIN\n  MEMBER\n}\n\n\
             \"\"\"A registered account.\"\"\"\n\
             type User {\n  id: ID!\n  role: Role\n}\n"
        );
    }

    #[test]
    fn cross_file_references_render_the_bare_name() {
        let user = Refkey::new();
        let package = Package::new()
            .file(FileDecl::new("models.graphql").decl(Decl::object("User").keyed(user)))
            .file(FileDecl::new("api.graphql").decl(
                Decl::object("Query").member(Decl::field(
                    "user",
                    TypeExpr::Named(user),
                )),
            ));

        let out = emit(&package).remove(1);
        assert!(out.contains("user: User!"));
        assert!(!out.contains("import"));
    }

    #[test]
    fn one_of_inputs_interfaces_and_unions() {
        let animal = Refkey::new();
        let cat = Refkey::new();
        let dog = Refkey::new();
        let package = Package::new().file(
            FileDecl::new("schema.graphql")
                .decl(
                    Decl::interface("Animal")
                        .keyed(animal)
                        .member(Decl::field("name", TypeExpr::Builtin(Builtin::Str))),
                )
                .decl(Decl::object("Cat").keyed(cat).implements(animal).member(
                    Decl::field("name", TypeExpr::Builtin(Builtin::Str)),
                ))
                .decl(Decl::object("Dog").keyed(dog).implements(animal).member(
                    Decl::field("name", TypeExpr::Builtin(Builtin::Str)),
                ))
                .decl(Decl::union("Pet").variant(cat).variant(dog))
                .decl(
                    Decl::input_object("PetFilter").one_of().member(
                        Decl::input_field("byName", TypeExpr::Builtin(Builtin::Str)).nullable(),
                    ),
                ),
        );

        let out = emit(&package).remove(0);
        assert!(out.contains("interface Animal {"));
        assert!(out.contains("type Cat implements Animal {"));
        assert!(out.contains("union Pet = Cat | Dog"));
        assert!(out.contains("input PetFilter @oneOf {"));
        assert!(out.contains("byName: String\n"));
    }

    #[test]
    fn directives_arguments_and_defaults() {
        let package = Package::new().file(
            FileDecl::new("schema.graphql")
                .decl(Decl::scalar("DateTime"))
                .decl(
                    Decl::directive("cacheControl", vec!["FIELD_DEFINITION".into(), "OBJECT".into()])
                        .member(
                            Decl::argument("maxAge", TypeExpr::Builtin(Builtin::Int))
                                .default_value(ConstValue::Int(60)),
                        ),
                ),
        );

        let out = emit(&package).remove(0);
        assert!(out.contains("scalar DateTime"));
        assert!(out.contains(
            "directive @cacheControl(maxAge: Int! = 60) on FIELD_DEFINITION | OBJECT"
        ));
    }
}
