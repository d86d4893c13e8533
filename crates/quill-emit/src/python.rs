//! Writer for the guarded-import target.
//!
//! Annotations are type uses and may land under the conditional typing
//! block; base classes, aliases and default values are value uses and force
//! an unconditional import. The body is written first so the [`ImportTable`]
//! sees every use before the header is assembled.

use log::debug;

use quill_naming::NamePolicy;
use quill_resolve::{Resolver, ScopeId, Session, Usage};
use quill_tree::{Builtin, ConstValue, Decl, DeclMeta, ElementKind, FileDecl, Refkey, TypeExpr};

use crate::error::EmitError;
use crate::imports::ImportTable;

pub fn emit_file(
    file: &FileDecl,
    sess: &mut Session,
    resolver: &mut Resolver,
    imports: &mut ImportTable,
    policy: &dyn NamePolicy,
) -> Result<String, EmitError> {
    let module = sess
        .module_scope(&file.path)
        .ok_or_else(|| EmitError::UnknownModule {
            path: file.path.to_string(),
        })?;

    let mut blocks = Vec::new();
    let mut uses = Uses::default();
    {
        let mut writer = Writer {
            module,
            sess,
            resolver,
            imports,
            policy,
            uses: &mut uses,
        };
        for decl in &file.decls {
            if let Some(block) = writer.decl(decl)? {
                blocks.push(block);
            }
        }
    }

    let lines = imports.statements(module, sess);
    let mut header = Vec::new();

    if !lines.guarded.is_empty() {
        header.push("from __future__ import annotations".to_owned());
        header.push(String::new());
    }

    let mut std_imports = Vec::new();
    if uses.dataclass {
        std_imports.push("from dataclasses import dataclass".to_owned());
    }
    if uses.enumeration {
        std_imports.push("from enum import Enum".to_owned());
    }
    if !lines.guarded.is_empty() {
        std_imports.push("from typing import TYPE_CHECKING".to_owned());
    }
    if !std_imports.is_empty() {
        header.extend(std_imports);
        header.push(String::new());
    }

    if !lines.plain.is_empty() {
        header.extend(lines.plain);
        header.push(String::new());
    }
    if !lines.guarded.is_empty() {
        header.push("if TYPE_CHECKING:".to_owned());
        header.extend(lines.guarded.iter().map(|line| format!("    {line}")));
        header.push(String::new());
    }

    let mut out = header.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out.push_str(&blocks.join("\n\n"));
    out.push('\n');
    Ok(out)
}

#[derive(Debug, Default)]
struct Uses {
    dataclass: bool,
    enumeration: bool,
}

struct Writer<'a> {
    module: ScopeId,
    sess: &'a mut Session,
    resolver: &'a mut Resolver,
    imports: &'a mut ImportTable,
    policy: &'a dyn NamePolicy,
    uses: &'a mut Uses,
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

        let block = match &decl.meta {
            DeclMeta::Object { implements } | DeclMeta::Interface { implements } => {
                self.class(decl, &name, implements)?
            }
            DeclMeta::InputObject { .. } => self.class(decl, &name, &[])?,
            DeclMeta::Union { variants } => {
                let variants: Vec<String> = variants
                    .iter()
                    .map(|&key| self.resolve(key, Usage::Value))
                    .collect();
                format!("{name} = {}", variants.join(" | "))
            }
            DeclMeta::Const { ty, value } => {
                let ty = self.type_ref(ty);
                let value = self.value(value);
                format!("{name}: {ty} = {value}")
            }
            DeclMeta::Plain => match decl.kind {
                ElementKind::Enum => {
                    self.uses.enumeration = true;
                    let mut out = format!("class {name}(Enum):\n");
                    self.push_docstring(&mut out, decl);
                    for value in &decl.members {
                        let value_name = self.name(value)?;
                        out.push_str(&format!("    {value_name} = \"{value_name}\"\n"));
                    }
                    out.trim_end().to_owned()
                }
                // Opaque scalars become plain aliases.
                ElementKind::Scalar => format!("{name} = str"),
                ElementKind::Service => {
                    let mut out = format!("class {name}:\n");
                    self.push_docstring(&mut out, decl);
                    for function in &decl.members {
                        out.push_str(&self.function(function)?);
                    }
                    if decl.members.is_empty() && decl.doc.is_none() {
                        out.push_str("    pass\n");
                    }
                    out.trim_end().to_owned()
                }
                _ => {
                    debug!("{} `{name}` has no emitted form here", decl.kind);
                    return Ok(None);
                }
            },
            _ => {
                debug!("{} `{name}` has no emitted form here", decl.kind);
                return Ok(None);
            }
        };

        Ok(Some(block))
    }

    fn class(&mut self, decl: &Decl, name: &str, bases: &[Refkey]) -> Result<String, EmitError> {
        self.uses.dataclass = true;

        let bases: Vec<String> = bases
            .iter()
            .map(|&key| self.resolve(key, Usage::Value))
            .collect();
        let base_clause = if bases.is_empty() {
            String::new()
        } else {
            format!("({})", bases.join(", "))
        };

        let mut out = format!("@dataclass\nclass {name}{base_clause}:\n");
        self.push_docstring(&mut out, decl);

        for field in &decl.members {
            let field_name = self.name(field)?;
            let DeclMeta::Member {
                ty,
                nullable,
                default,
            } = &field.meta
            else {
                continue;
            };

            let mut annotation = self.type_ref(ty);
            if *nullable {
                annotation.push_str(" | None");
            }
            let mut line = format!("    {field_name}: {annotation}");
            match default {
                Some(value) => line.push_str(&format!(" = {}", self.value(value))),
                None if *nullable => line.push_str(" = None"),
                None => {}
            }
            out.push_str(&line);
            out.push('\n');
        }

        if decl.members.is_empty() && decl.doc.is_none() {
            out.push_str("    pass\n");
        }
        Ok(out.trim_end().to_owned())
    }

    fn function(&mut self, function: &Decl) -> Result<String, EmitError> {
        let name = self.name(function)?;
        let DeclMeta::Function { ret } = &function.meta else {
            return Ok(String::new());
        };

        let mut params = vec!["self".to_owned()];
        for arg in &function.members {
            let arg_name = self.name(arg)?;
            let DeclMeta::Member {
                ty,
                nullable,
                default,
            } = &arg.meta
            else {
                continue;
            };

            let mut annotation = self.type_ref(ty);
            if *nullable {
                annotation.push_str(" | None");
            }
            let mut param = format!("{arg_name}: {annotation}");
            match default {
                Some(value) => param.push_str(&format!(" = {}", self.value(value))),
                None if *nullable => param.push_str(" = None"),
                None => {}
            }
            params.push(param);
        }

        let ret = self.type_ref(ret);
        Ok(format!(
            "    def {name}({}) -> {ret}:\n        raise NotImplementedError\n",
            params.join(", ")
        ))
    }

    fn push_docstring(&self, out: &mut String, decl: &Decl) {
        if let Some(doc) = &decl.doc {
            out.push_str(&format!("    \"\"\"{doc}\"\"\"\n"));
        }
    }

    fn type_ref(&mut self, ty: &TypeExpr) -> String {
        match ty {
            TypeExpr::Named(key) => self.resolve(*key, Usage::Type),
            TypeExpr::Builtin(builtin) => builtin_name(*builtin).to_owned(),
            TypeExpr::List(inner) => format!("list[{}]", self.type_ref(inner)),
        }
    }

    fn value(&mut self, value: &ConstValue) -> String {
        match value {
            ConstValue::Bool(true) => "True".to_owned(),
            ConstValue::Bool(false) => "False".to_owned(),
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
        Builtin::Str => "str",
        Builtin::Int => "int",
        Builtin::Float => "float",
        Builtin::Bool => "bool",
        Builtin::Id => "str",
    }
}
