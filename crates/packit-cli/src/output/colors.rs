//! Terminal colors for versions, ranges and diagnostics.
//!
//! Colors are off when `NO_COLOR` is set or either output stream is not a
//! terminal. Ranges are tinted by their form so a tilde descriptor, which may
//! not cover every version it was built from, stands out from a caret.

use std::env;
use std::io::{self, IsTerminal};

use packit_core::types::RangeKind;

/// What a piece of text is, for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// A concrete version or an exact range
    Version,
    Caret,
    Tilde,
    Dash,
    Warning,
    Error,
    /// Labels and secondary detail
    Muted,
}

impl Tone {
    fn ansi_code(self) -> &'static str {
        match self {
            Tone::Version => "32",
            Tone::Caret => "36",
            Tone::Tilde => "33",
            Tone::Dash => "35",
            Tone::Warning => "33",
            Tone::Error => "31",
            Tone::Muted => "2",
        }
    }
}

impl From<RangeKind> for Tone {
    fn from(kind: RangeKind) -> Self {
        match kind {
            RangeKind::Exact => Tone::Version,
            RangeKind::Caret => Tone::Caret,
            RangeKind::Tilde => Tone::Tilde,
            RangeKind::Dash => Tone::Dash,
        }
    }
}

/// Applies tones when the terminal supports color
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    /// Decide from the environment and the attached streams
    pub fn detect() -> Self {
        let enabled = env::var_os("NO_COLOR").is_none()
            && io::stderr().is_terminal()
            && io::stdout().is_terminal();
        Self { enabled }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{}m{}\x1b[0m", tone.ansi_code(), text)
        } else {
            text.to_string()
        }
    }
}
