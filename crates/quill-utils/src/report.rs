use std::fmt;
use std::io::{self, Write};

use derive_more::Display;
use owo_colors::{OwoColorize, Style};

/// Severity of an issue.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A single reportable problem, without source attribution.
///
/// The generator works on an in-memory declaration tree, so issues name
/// declarations rather than source locations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Issue {
    pub message: String,
    pub help: Option<String>,
    pub severity: Severity,
}

impl Issue {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
            severity: Severity::Error,
        }
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
            severity: Severity::Warning,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            help: None,
            severity: Severity::Info,
        }
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    pub fn write(&self, mut w: impl Write) -> io::Result<()> {
        let style = match self.severity {
            Severity::Info => Style::new().green(),
            Severity::Warning => Style::new().yellow(),
            Severity::Error => Style::new().red(),
        };

        writeln!(w, "{}: {}", self.severity.style(style), self.message)?;

        if let Some(help) = &self.help {
            writeln!(w, "{} {help}", "help:".cyan())?;
        }

        Ok(())
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.message.fmt(f)
    }
}

/// Collects issues across a whole generation job.
#[derive(Debug, Clone, Default)]
pub struct Report {
    issues: Vec<Issue>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.issues.iter().filter(|issue| issue.is_error()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter()
    }

    pub fn eprint(&self) -> io::Result<()> {
        let stderr = io::stderr();
        let mut lock = stderr.lock();
        for issue in &self.issues {
            issue.write(&mut lock)?;
        }
        Ok(())
    }
}
