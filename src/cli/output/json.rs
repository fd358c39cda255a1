//! JSON output formatting

use serde::Serialize;

use super::ReportRenderer;
use crate::error::Result;
use crate::rules::results::{LintResults, Violation};

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct ReportOutput<'a> {
    version: &'static str,
    target: &'a str,
    locale: &'a str,
    files_checked: usize,
    total_count: usize,
    fixed_count: usize,
    violations: &'a [Violation],
}

impl ReportRenderer for JsonOutput {
    fn render_report(&self, results: &LintResults) -> Result<String> {
        let output = ReportOutput {
            version: env!("CARGO_PKG_VERSION"),
            target: results.target_id(),
            locale: results.locale(),
            files_checked: results.checked_file_count(),
            total_count: results.total_count(),
            fixed_count: results.fixed_count(),
            violations: results.violations(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}
