use clap::ValueEnum;
use colored::*;
use std::env;
use std::io::IsTerminal;
use std::path::Path;

use crate::host::SiteOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }

    /// Apply environment overrides (`NO_COLOR`, `CLICOLOR`, `CLICOLOR_FORCE`) to `Auto`.
    pub fn resolve_with_env(self) -> Self {
        if self != Self::Auto {
            return self;
        }
        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            return Self::Never;
        }
        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v == "1") {
            return Self::Always;
        }
        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return Self::Never;
        }
        self
    }
}

/// Renders expansion diagnostics the way compilers print them.
pub struct DiagnosticFormatter {
    color: bool,
}

impl DiagnosticFormatter {
    pub fn new(mode: ColorMode) -> Self {
        let color = mode.resolve_with_env().should_use_color();
        colored::control::set_override(color);
        Self { color }
    }

    /// `path:line:column: error: message [@Generator]`
    pub fn diagnostic(&self, path: &Path, outcome: &SiteOutcome) -> Option<String> {
        let message = outcome.error_message()?;
        let location = format!("{}:{}:{}:", path.display(), outcome.line, outcome.column);
        let attribute = format!("[{}]", outcome.generator);
        Some(format!(
            "{} {} {} {}",
            self.bold(&location),
            self.error("error:"),
            message,
            self.dim(&attribute)
        ))
    }

    /// One-line tally printed after a run.
    pub fn summary(&self, expanded: usize, failed: usize) -> String {
        let text = format!("{expanded} expanded, {failed} failed");
        if failed > 0 {
            self.error(&text)
        } else {
            self.success(&text)
        }
    }

    fn success(&self, text: &str) -> String {
        if self.color {
            text.green().to_string()
        } else {
            text.to_string()
        }
    }

    fn error(&self, text: &str) -> String {
        if self.color {
            text.red().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }
}

fn detect_color_support() -> bool {
    // Check if we're in a dumb terminal
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    // Diagnostics go to stderr
    std::io::stderr().is_terminal()
}
