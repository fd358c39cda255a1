//! Terminal output formatting with colors

use colored::Colorize;

use super::ReportRenderer;
use crate::error::Result;
use crate::rules::results::{LintResults, Violation};

pub struct TerminalOutput {
    colored: bool,
}

impl TerminalOutput {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Plain output on dumb terminals, colored otherwise. `colored` still
    /// drops the escapes on its own when stdout is not a terminal.
    pub fn from_env() -> Self {
        let dumb = std::env::var("TERM").map(|t| t == "dumb").unwrap_or(false);
        Self::new(!dumb)
    }

    fn format_violation(&self, v: &Violation) -> String {
        let location = format!("{}:{}:1:", v.filename.display(), v.line);
        let fixed = if v.fixed { " (fixed)" } else { "" };

        if self.colored {
            format!(
                "{} {} {}{}\n",
                location.white().bold(),
                "warning:".magenta().bold(),
                v.message.white().bold(),
                fixed.green()
            )
        } else {
            format!("{} warning: {}{}\n", location, v.message, fixed)
        }
    }

    fn format_summary(&self, results: &LintResults) -> String {
        let count = results.total_count();
        if count == 0 {
            return String::new();
        }
        let noun = if count < 2 { "warning" } else { "warnings" };
        format!("\n{} {} generated.\n", count, noun)
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ReportRenderer for TerminalOutput {
    fn render_report(&self, results: &LintResults) -> Result<String> {
        let mut output: String = results
            .violations()
            .iter()
            .map(|v| self.format_violation(v))
            .collect();
        output.push_str(&self.format_summary(results));
        Ok(output)
    }
}
