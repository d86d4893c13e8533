//! IDL writer for the include-based target.
//!
//! The body is written first so the [`IncludeTable`] sees every cross-file
//! use; the include statements are then prepended as the file header.

use std::collections::BTreeSet;

use log::debug;

use quill_naming::NamePolicy;
use quill_resolve::{Resolver, ScopeId, Session, Usage};
use quill_tree::{Builtin, ConstValue, Decl, DeclMeta, ElementKind, FileDecl, Refkey, TypeExpr};

use crate::error::EmitError;
use crate::imports::IncludeTable;

pub fn emit_file(
    file: &FileDecl,
    sess: &mut Session,
    resolver: &mut Resolver,
    imports: &mut IncludeTable,
    policy: &dyn NamePolicy,
) -> Result<String, EmitError> {
    let module = sess
        .module_scope(&file.path)
        .ok_or_else(|| EmitError::UnknownModule {
            path: file.path.to_string(),
        })?;

    let mut blocks = Vec::new();
    {
        let mut writer = Writer {
            module,
            sess,
            resolver,
            imports,
            policy,
        };
        for decl in &file.decls {
            if let Some(block) = writer.decl(decl)? {
                blocks.push(block);
            }
        }
    }

    let mut out = String::new();
    let includes = imports.includes(module, sess);
    if !includes.is_empty() {
        for include in includes {
            out.push_str(&include);
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str(&blocks.join("\n\n"));
    out.push('\n');
    Ok(out)
}

struct Writer<'a> {
    module: ScopeId,
    sess: &'a mut Session,
    resolver: &'a mut Resolver,
    imports: &'a mut IncludeTable,
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
            out.push_str(&format!("/** {doc} */\n"));
        }

        match &decl.meta {
            DeclMeta::Object { .. } | DeclMeta::Interface { .. } | DeclMeta::InputObject { .. } => {
                out.push_str(&format!("struct {name} {{\n"));
                for (index, field) in decl.members.iter().enumerate() {
                    out.push_str(&self.field(index + 1, field)?);
                }
                out.push('}');
            }
            DeclMeta::Union { variants } => {
                out.push_str(&format!("union {name} {{\n"));
                let mut taken = BTreeSet::new();
                for (index, &variant) in variants.iter().enumerate() {
                    let ty = self.resolve(variant, Usage::Type);
                    let field = variant_field_name(&ty, &mut taken);
                    out.push_str(&format!("  {}: {ty} {field},\n", index + 1));
                }
                out.push('}');
            }
            DeclMeta::Const { ty, value } => {
                let ty = self.type_ref(ty);
                let value = self.value(value);
                out.push_str(&format!("const {ty} {name} = {value}"));
            }
            DeclMeta::Plain => match decl.kind {
                ElementKind::Enum => {
                    out.push_str(&format!("enum {name} {{\n"));
                    for (ordinal, value) in decl.members.iter().enumerate() {
                        out.push_str(&format!("  {} = {ordinal},\n", self.name(value)?));
                    }
                    out.push('}');
                }
                // Opaque scalars become string typedefs.
                ElementKind::Scalar => {
                    out.push_str(&format!("typedef string {name}"));
                }
                ElementKind::Service => {
                    out.push_str(&format!("service {name} {{\n"));
                    for function in &decl.members {
                        out.push_str(&self.function(function)?);
                    }
                    out.push('}');
                }
                _ => {
                    debug!("{} `{name}` has no IDL form", decl.kind);
                    return Ok(None);
                }
            },
            _ => {
                debug!("{} `{name}` has no IDL form", decl.kind);
                return Ok(None);
            }
        }

        Ok(Some(out))
    }

    fn field(&mut self, index: usize, field: &Decl) -> Result<String, EmitError> {
        let name = self.name(field)?;
        let DeclMeta::Member {
            ty,
            nullable,
            default,
        } = &field.meta
        else {
            return Ok(String::new());
        };

        let requiredness = if *nullable { "optional" } else { "required" };
        let ty = self.type_ref(ty);
        let mut line = format!("  {index}: {requiredness} {ty} {name}");
        if let Some(value) = default {
            line.push_str(&format!(" = {}", self.value(value)));
        }
        line.push_str(",\n");
        Ok(line)
    }

    fn function(&mut self, function: &Decl) -> Result<String, EmitError> {
        let name = self.name(function)?;
        let DeclMeta::Function { ret } = &function.meta else {
            return Ok(String::new());
        };

        let ret = self.type_ref(ret);
        let mut args = Vec::new();
        for (index, arg) in function.members.iter().enumerate() {
            let arg_name = self.name(arg)?;
            if let DeclMeta::Member { ty, .. } = &arg.meta {
                let ty = self.type_ref(ty);
                args.push(format!("{}: {ty} {arg_name}", index + 1));
            }
        }
        Ok(format!("  {ret} {name}({}),\n", args.join(", ")))
    }

    fn type_ref(&mut self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(key) => self.resolve(*key, Usage::Type),
            TypeExpr::Builtin(builtin) => builtin_name(*builtin).to_owned(),
            TypeExpr::List(inner) => format!("list<{}>", self.type_ref(inner)),
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

/// Field names for union variants come from the variant's type name.
fn variant_field_name(ty: &str, taken: &mut BTreeSet<String>) -> String {
    let base = ty.rsplit('.').next().unwrap_or(ty).to_lowercase();
    let mut candidate = base.clone();
    let mut n = 2;
    while taken.contains(&candidate) {
        candidate = format!("{base}{n}");
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn builtin_name(builtin: Builtin) -> &'static str {
    match builtin {
        Builtin::Str => "string",
        Builtin::Int => "i32",
        Builtin::Float => "double",
        Builtin::Bool => "bool",
        Builtin::Id => "string",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_naming::ThriftNames;
    use quill_resolve::declare;
    use quill_tree::{FileDecl, Package};

    fn emit(package: &Package) -> Vec<String> {
        let mut sess = Session::new();
        declare(package, &ThriftNames, &mut sess).unwrap();

        let mut resolver = Resolver::new();
        let mut imports = IncludeTable::new();
        package
            .files
            .iter()
            .map(|file| {
                emit_file(file, &mut sess, &mut resolver, &mut imports, &ThriftNames).unwrap()
            })
            .collect()
    }

    #[test]
    fn structs_carry_indices_and_requiredness() {
        let package = Package::new().file(
            FileDecl::new("models.thrift").decl(
                Decl::object("User")
                    .member(Decl::field("id", TypeExpr::Builtin(Builtin::Id)))
                    .member(Decl::field("nickname", TypeExpr::Builtin(Builtin::Str)).nullable())
                    .member(
                        Decl::field("age", TypeExpr::Builtin(Builtin::Int))
                            .default_value(ConstValue::Int(0)),
                    ),
            ),
        );

        let out = emit(&package).remove(0);
        assert!(out.contains("struct User {"));
        assert!(out.contains("  1: required string id,"));
        assert!(out.contains("  2: optional string nickname,"));
        assert!(out.contains("  3: required i32 age = 0,"));
    }

    #[test]
    fn cross_file_use_renders_alias_and_include() {
        let user = Refkey::new();
        let package = Package::new()
            .file(FileDecl::new("models.thrift").decl(Decl::object("User").keyed(user)))
            .file(
                FileDecl::new("api.thrift").decl(
                    Decl::object("Session").member(Decl::field("owner", TypeExpr::Named(user))),
                ),
            );

        let outputs = emit(&package);
        assert!(!outputs[0].contains("include"));
        assert!(outputs[1].starts_with("include \"models.thrift\"\n"));
        assert!(outputs[1].contains("1: required models.User owner,"));
    }

    #[test]
    fn enums_services_and_consts() {
        let status = Refkey::new();
        let package = Package::new().file(
            FileDecl::new("api.thrift")
                .decl(
                    Decl::enumeration("Status")
                        .keyed(status)
                        .member(Decl::enum_value("active"))
                        .member(Decl::enum_value("banned")),
                )
                .decl(
                    Decl::service("AccountService").member(
                        Decl::function("getStatus", TypeExpr::Named(status))
                            .member(Decl::argument("id", TypeExpr::Builtin(Builtin::Id))),
                    ),
                )
                .decl(Decl::constant(
                    "maxRetries",
                    TypeExpr::Builtin(Builtin::Int),
                    ConstValue::Int(3),
                )),
        );

        let out = emit(&package).remove(0);
        assert!(out.contains("enum Status {\n  ACTIVE = 0,\n  BANNED = 1,\n}"));
        assert!(out.contains("service AccountService {"));
        assert!(out.contains("  Status getStatus(1: string id),"));
        assert!(out.contains("const i32 MAX_RETRIES = 3"));
    }

    #[test]
    fn unions_and_typedefs() {
        let cat = Refkey::new();
        let dog = Refkey::new();
        let package = Package::new().file(
            FileDecl::new("pets.thrift")
                .decl(Decl::object("Cat").keyed(cat))
                .decl(Decl::object("Dog").keyed(dog))
                .decl(Decl::union("Pet").variant(cat).variant(dog))
                .decl(Decl::scalar("Uuid")),
        );

        let out = emit(&package).remove(0);
        assert!(out.contains("union Pet {\n  1: Cat cat,\n  2: Dog dog,\n}"));
        assert!(out.contains("typedef string Uuid"));
    }
}
