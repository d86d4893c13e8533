//! The render entry point: one whole generation job, start to finish.
//!
//! Three strictly ordered phases. The declare pass registers every symbol
//! and binds refkeys, failing fast on structural errors that make the rest
//! of the tree unsafe. Emission then writes every file, resolving refkeys
//! lazily as they are printed. Deferred validations run last, once the whole
//! graph is known, and their failures are collected alongside any references
//! that never bound.

use camino::Utf8PathBuf;
use log::info;
use thiserror::Error;

use quill_emit::{graphql, python, thrift, EmitError, ImportTable, IncludeTable, NoImports};
use quill_naming::{policy_for, NamePolicy};
use quill_resolve::{declare, ResolveError, Resolver, Session};
use quill_tree::{Package, Refkey, Target};
use quill_utils::report::{Issue, Report};
use quill_validate::{ValidateError, ValidationRegistry};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("reference {refkey} was rendered but never declared")]
    Unresolved { refkey: Refkey },

    #[error(transparent)]
    Validate(#[from] ValidateError),
}

pub struct RenderOptions {
    target: Target,
    policy: Option<Box<dyn NamePolicy>>,
    include_aliases: Vec<(Utf8PathBuf, String)>,
}

impl RenderOptions {
    pub fn new(target: Target) -> Self {
        Self {
            target,
            policy: None,
            include_aliases: Vec::new(),
        }
    }

    /// Overrides the target's default name policy.
    pub fn policy(mut self, policy: Box<dyn NamePolicy>) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Registers a manual include alias ahead of emission. Manual aliases
    /// beat auto-derived ones; only meaningful for include-based targets.
    pub fn include_alias(
        mut self,
        path: impl Into<Utf8PathBuf>,
        alias: impl Into<String>,
    ) -> Self {
        self.include_aliases.push((path.into(), alias.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub path: Utf8PathBuf,
    pub text: String,
}

/// What a generation job hands back: the emitted files plus every collected
/// error. Output may still be useful when errors are present, but a
/// non-empty error list means the job failed.
#[derive(Debug, Default)]
pub struct RenderOutput {
    pub files: Vec<OutputFile>,
    pub errors: Vec<RenderError>,
}

impl RenderOutput {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn report(&self) -> Report {
        let mut report = Report::new();
        report.extend(self.errors.iter().map(|error| Issue::error(error.to_string())));
        report
    }
}

pub fn render(package: &Package, options: RenderOptions) -> Result<RenderOutput, RenderError> {
    let mut sess = Session::new();
    let policy = options
        .policy
        .unwrap_or_else(|| policy_for(options.target));

    declare(package, policy.as_ref(), &mut sess)?;

    // Tasks are derived from the declared graph before any emission, so a
    // check always sees the complete tree no matter which file triggers it.
    let registry = ValidationRegistry::collect(&sess);

    let mut resolver = Resolver::new();
    let mut files = Vec::new();

    match options.target {
        Target::Graphql => {
            let mut imports = NoImports;
            for file in &package.files {
                let text =
                    graphql::emit_file(file, &mut sess, &mut resolver, &mut imports, policy.as_ref())?;
                files.push(OutputFile {
                    path: file.path.clone(),
                    text,
                });
            }
        }
        Target::Thrift => {
            let mut imports = IncludeTable::new();
            for (path, alias) in &options.include_aliases {
                imports.register_alias(&mut sess, path, alias.clone())?;
            }
            for file in &package.files {
                let text =
                    thrift::emit_file(file, &mut sess, &mut resolver, &mut imports, policy.as_ref())?;
                files.push(OutputFile {
                    path: file.path.clone(),
                    text,
                });
            }
        }
        Target::Python => {
            let mut imports = ImportTable::new();
            for file in &package.files {
                let text =
                    python::emit_file(file, &mut sess, &mut resolver, &mut imports, policy.as_ref())?;
                files.push(OutputFile {
                    path: file.path.clone(),
                    text,
                });
            }
        }
    }

    let mut errors: Vec<RenderError> = resolver
        .unresolved()
        .map(|refkey| RenderError::Unresolved { refkey })
        .collect();
    errors.extend(registry.run_all(&sess).into_iter().map(RenderError::from));

    info!(
        "rendered {} {} file(s), {} error(s)",
        files.len(),
        options.target,
        errors.len()
    );

    Ok(RenderOutput { files, errors })
}
