//! Aggregated redirect diagnostics.
//!
//! Redirect misconfiguration is typically systemic (a typo'd extension or a
//! renamed section affects many routes at once), so every offending entry is
//! collected and reported in one failure instead of stopping at the first.

use owo_colors::OwoColorize;
use std::fmt;

use crate::utils::plural_s;

/// A single invalid redirect entry.
#[derive(Debug, Clone)]
pub struct RedirectDiagnostic {
    /// What produced or is affected by the entry (a strategy, a rule, a
    /// target path)
    pub context: String,
    /// Error description
    pub message: String,
    /// Fix hint (optional)
    pub hint: Option<String>,
}

impl RedirectDiagnostic {
    pub fn new(context: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for RedirectDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}{}{}", "[".dimmed(), self.context.cyan(), "]".dimmed())?;
        write!(f, "{} {}", "→".red(), self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  {} {}", "hint:".yellow(), hint)?;
        }
        Ok(())
    }
}

/// Collected redirect errors for one collection pass.
///
/// Any entry is fatal to the build; there is no partial output.
#[derive(Debug, Default)]
pub struct RedirectDiagnostics {
    errors: Vec<RedirectDiagnostic>,
}

impl RedirectDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&mut self, context: impl Into<String>, message: impl Into<String>) {
        self.errors.push(RedirectDiagnostic::new(context, message));
    }

    /// Add an error with a hint.
    pub fn error_with_hint(
        &mut self,
        context: impl Into<String>,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.errors
            .push(RedirectDiagnostic::new(context, message).with_hint(hint));
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[RedirectDiagnostic] {
        &self.errors
    }
}

impl fmt::Display for RedirectDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "invalid redirects:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            write!(f, "{err}")?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                format!("error{}", plural_s(self.errors.len())).dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for RedirectDiagnostics {}
