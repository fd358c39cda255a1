//! Output formatting module for CLI

mod html;
pub mod json;
mod terminal;

pub use html::HtmlReport;
pub use json::JsonOutput;
pub use terminal::TerminalOutput;

use crate::error::Result;
use crate::rules::results::LintResults;

/// Trait for rendering the violation listing
pub trait ReportRenderer {
    fn render_report(&self, results: &LintResults) -> Result<String>;
}
