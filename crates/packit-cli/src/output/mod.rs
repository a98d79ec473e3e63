//! Terminal output formatting and utilities.
//!
//! Results are written to stdout, either as plain lines or as one JSON
//! document. Status messages go to stderr so they never mix with results.

pub mod colors;
pub mod errors;

use serde::Serialize;

use packit_core::error::{PackitError, PackitResult};
use packit_resolver::parse_constraint;

use colors::{Palette, Tone};

/// Output handler for consistent terminal formatting
pub struct OutputHandler {
    palette: Palette,
    json: bool,
}

impl OutputHandler {
    /// Create a new output handler
    pub fn new(json: bool) -> Self {
        // Machine-readable runs keep stderr free of escape codes too
        let palette = if json { Palette::disabled() } else { Palette::detect() };

        Self { palette, json }
    }

    /// Whether results are printed as JSON
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Print one result line
    pub fn line(&self, message: &str) {
        println!("{}", message);
    }

    /// Print a result value as pretty JSON
    pub fn print_json<T: Serialize + ?Sized>(&self, value: &T) -> PackitResult<()> {
        let rendered = serde_json::to_string_pretty(value)
            .map_err(|e| PackitError::io("Failed to encode output".to_string(), e.into()))?;
        println!("{}", rendered);
        Ok(())
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        eprintln!("{}", self.palette.paint(Tone::Muted, message));
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", self.palette.paint(Tone::Version, "✓"), message);
    }

    /// Print a warning message
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", self.palette.paint(Tone::Warning, "⚠"), message);
    }

    /// Highlight a stored version inside a result line
    pub fn highlight(&self, version: &str) -> String {
        self.palette.paint(Tone::Version, version)
    }

    /// Highlight range text, tinted by its form
    pub fn highlight_range(&self, range: &str) -> String {
        match parse_constraint(range) {
            Ok(parsed) => self.palette.paint(parsed.kind().into(), range),
            Err(_) => range.to_string(),
        }
    }
}

impl Default for OutputHandler {
    fn default() -> Self {
        Self::new(false)
    }
}
