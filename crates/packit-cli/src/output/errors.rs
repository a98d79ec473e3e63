//! Error reports for the terminal.
//!
//! A report is the error line, then the input that caused it (with the bad
//! part of a version underlined), then a help line and the cause chain.

use std::error::Error;

use packit_core::error::PackitError;
use packit_core::types::VersionError;
use packit_resolver::normalize_expression;

use super::colors::{Palette, Tone};

/// Renders `PackitError`s with the offending input
pub struct ErrorFormatter {
    palette: Palette,
}

impl ErrorFormatter {
    pub fn new() -> Self {
        Self {
            palette: Palette::detect(),
        }
    }

    /// Format an error with its input, a suggestion and its causes
    pub fn format_error(&self, error: &PackitError) -> String {
        let mut output = format!("{}: {}\n", self.palette.paint(Tone::Error, "error"), error);

        for (label, line) in self.context_lines(error) {
            output.push_str(&format!("  {} {:>10}: {}\n", self.muted("-->"), label, line));
        }

        if let Some(suggestion) = error.suggestion() {
            output.push_str(&format!("\n{}: {}\n", self.muted("help"), suggestion));
        }

        let mut source = error.source();
        while let Some(err) = source {
            output.push_str(&format!("\n{}: {}", self.muted("caused by"), err));
            source = err.source();
        }

        output
    }

    /// Format an error that did not come from packit itself
    pub fn format_simple(&self, message: &str) -> String {
        format!("{}: {}", self.palette.paint(Tone::Error, "error"), message)
    }

    fn muted(&self, text: &str) -> String {
        self.palette.paint(Tone::Muted, text)
    }

    /// Labelled lines showing the input behind an error
    fn context_lines(&self, error: &PackitError) -> Vec<(&'static str, String)> {
        match error {
            PackitError::InvalidConstraint { expression, .. } => {
                let mut lines = vec![("constraint", format!("{:?}", expression))];
                let normalized = normalize_expression(expression);
                if normalized != expression.as_str() {
                    lines.push(("read as", format!("{:?}", normalized)));
                }
                lines
            },
            PackitError::InvalidVersion { input, source } => {
                let mut lines = vec![("version", input.clone())];
                if let Some(marker) = underline(input, source) {
                    lines.push(("", self.palette.paint(Tone::Error, &marker)));
                }
                lines
            },
            PackitError::InvalidPattern { pattern, .. } => vec![("pattern", pattern.clone())],
            PackitError::EmptyVersionSet { package: Some(name) } => vec![(
                "package",
                format!("{} (no stored version parses; see 'packit check')", name),
            )],
            _ => Vec::new(),
        }
    }
}

impl Default for ErrorFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// `^` marks under the part of `input` a version error points at
fn underline(input: &str, error: &VersionError) -> Option<String> {
    let part = match error {
        VersionError::InvalidFormat { .. } => input,
        VersionError::InvalidNumber { component } => component.as_str(),
        VersionError::InvalidPrerelease { prerelease } => prerelease.as_str(),
        VersionError::InvalidBuild { build } => build.as_str(),
    };

    if part.is_empty() {
        return None;
    }

    let start = input.find(part)?;
    let offset = input[..start].chars().count();
    Some(format!("{}{}", " ".repeat(offset), "^".repeat(part.chars().count())))
}
