//! # Lint Results Structures
//!
//! - [`Violation`] - one rule breach at a file and line, optionally with its fix
//! - [`LineViolations`] - violations of one file keyed by line number
//! - [`LintResults`] - everything found in one run
//!
//! ## Examples
//!
//! ```rust
//! use fint::rules::results::{LineViolations, LintResults, Violation};
//!
//! let mut lines = LineViolations::new();
//! lines.insert(
//!     1,
//!     vec![Violation::new("src/a.m", 1, "line_length", "Line length exceeds 80 characters")],
//! );
//!
//! let mut results = LintResults::new("objc", "en", 4096);
//! results.add_file("src/a.m", lines);
//!
//! assert_eq!(results.total_count(), 1);
//! assert!(!results.is_clean());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A single detected rule breach
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// File the violation was found in, as walked
    pub filename: PathBuf,

    /// 1-based line number
    pub line: usize,

    /// Id of the rule that fired
    pub rule_id: String,

    /// Rendered, localized message
    pub message: String,

    /// Whether this rule changed the line (fix mode only)
    #[serde(default)]
    pub fixed: bool,

    /// Line content after this rule's fix was applied
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
}

impl Violation {
    pub fn new(
        filename: impl Into<PathBuf>,
        line: usize,
        rule_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            line,
            rule_id: rule_id.into(),
            message: message.into(),
            fixed: false,
            fix: None,
        }
    }

    /// Record the line as it reads after this rule's fix
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fixed = true;
        self.fix = Some(fix.into());
        self
    }
}

/// Violations of one file, keyed by line number
pub type LineViolations = BTreeMap<usize, Vec<Violation>>;

/// Aggregated results of one run.
///
/// Holds both the flat violation list (for counting and exit codes) and the
/// per-file, per-line map (for detailed rendering). Every checked file has an
/// entry in the map, even when it produced no violations.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintResults {
    target_id: String,
    locale: String,
    buffer_size: usize,
    #[serde(skip)]
    files: BTreeMap<PathBuf, LineViolations>,
    violations: Vec<Violation>,
}

impl LintResults {
    pub fn new(target_id: impl Into<String>, locale: impl Into<String>, buffer_size: usize) -> Self {
        Self {
            target_id: target_id.into(),
            locale: locale.into(),
            buffer_size,
            files: BTreeMap::new(),
            violations: Vec::new(),
        }
    }

    /// Merge the results of one checked file
    pub fn add_file(&mut self, path: impl Into<PathBuf>, lines: LineViolations) {
        let path = path.into();
        self.violations
            .extend(lines.values().flat_map(|vs| vs.iter().cloned()));

        let entry = self.files.entry(path).or_default();
        for (line, vs) in lines {
            entry.entry(line).or_default().extend(vs);
        }
    }

    /// All violations in walk order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Per-file, per-line view
    pub fn files(&self) -> &BTreeMap<PathBuf, LineViolations> {
        &self.files
    }

    /// Violations of one file, if it was checked
    pub fn file(&self, path: &Path) -> Option<&LineViolations> {
        self.files.get(path)
    }

    pub fn target_id(&self) -> &str {
        &self.target_id
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Line buffer capacity the run used
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }

    pub fn total_count(&self) -> usize {
        self.violations.len()
    }

    pub fn fixed_count(&self) -> usize {
        self.violations.iter().filter(|v| v.fixed).count()
    }

    pub fn checked_file_count(&self) -> usize {
        self.files.len()
    }

    /// Number of files with at least one violation
    pub fn files_with_violations(&self) -> usize {
        self.files.values().filter(|lines| !lines.is_empty()).count()
    }

    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}
