//! Error types for fint
//!
//! Every variant renders as a stable, `fint:`-prefixed message so that callers
//! (and golden-output tests) can rely on the exact text. All errors are fatal
//! to the current run.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for fint
#[derive(Error, Debug)]
pub enum FintError {
    /// A required run option was empty
    #[error("fint: {0} is required.")]
    MissingArgument(&'static str),

    /// The config root directory does not exist
    #[error("fint: config directory not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The `builtin/targets` directory does not exist
    #[error("fint: targets directory not found: {}", path.display())]
    TargetNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// The `builtin/modules` directory does not exist
    #[error("fint: modules directory not found: {}", path.display())]
    ModulesDirNotFound {
        /// Path that was looked up
        path: PathBuf,
    },

    /// No ruleset file exists for the requested target
    #[error("fint: no matching target to [{id}]")]
    NoMatchingTarget {
        /// Requested target id
        id: String,
    },

    /// A configuration file exists but could not be read
    #[error("fint: cannot read config file {}: {source}", path.display())]
    ConfigRead {
        /// Path to the file
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A module's `config.json` is not valid
    #[error("fint: cannot read module config {}: {source}", path.display())]
    ModuleConfigUnreadable {
        /// Path to the module config
        path: PathBuf,
        /// The underlying parse error
        source: serde_json::Error,
    },

    /// A ruleset or locale file is not valid JSON of the expected shape
    #[error("fint: invalid config file {}: {source}", path.display())]
    InvalidConfig {
        /// Path to the file
        path: PathBuf,
        /// The underlying parse error
        source: serde_json::Error,
    },

    /// A ruleset refers to a module that has no definition
    #[error("fint: unknown module [{id}]")]
    UnknownModule {
        /// Module id used in the ruleset
        id: String,
    },

    /// A rule's argument list does not fit its module kind
    #[error("fint: invalid arguments for rule [{rule}] in module [{module}]: {reason}")]
    InvalidRuleArguments {
        /// Module id
        module: String,
        /// Rule id
        rule: String,
        /// What is wrong with the arguments
        reason: String,
    },

    /// A configured regular expression does not compile
    #[error("fint: invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// The underlying regex error
        source: regex::Error,
    },

    /// A source file could not be opened
    #[error("fint: cannot open {}", path.display())]
    CannotOpenFile {
        /// Path to the source file
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// A source line does not fit in the line buffer
    #[error("fint: too long line: {}", path.display())]
    LineTooLong {
        /// Path to the source file
        path: PathBuf,
        /// 1-based line number
        line: usize,
    },

    /// Reading a source file failed after it was opened
    #[error("fint: cannot read {}: {source}", path.display())]
    ReadFailed {
        /// Path to the source file
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// Writing or swapping a fixed file failed; the original is left untouched
    #[error("fint: cannot write fixed file {}: {source}", path.display())]
    FixFailed {
        /// Path to the source file
        path: PathBuf,
        /// The underlying I/O error
        source: std::io::Error,
    },

    /// The HTML report directory already exists and `force` is not set
    #[error("fint: report directory already exists. use `-f` option to force reporting.")]
    ReportDirExists {
        /// The report directory
        path: PathBuf,
    },

    /// The requested report template does not exist
    #[error("fint: report template not found: {name}")]
    TemplateNotFound {
        /// Template name
        name: String,
    },

    /// Report template rendering failed
    #[error("fint: report rendering failed: {0}")]
    Template(#[from] minijinja::Error),

    /// Worker pool could not be created
    #[error("fint: cannot start workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// JSON serialization error
    #[error("fint: JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Other I/O error
    #[error("fint: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, FintError>;
