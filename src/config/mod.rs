//! Configuration module
//!
//! [`RunConfig`] holds the options of a single run. It is built fresh for every
//! [`execute`](crate::execute) call and passed by reference, so nothing from a
//! previous run (buffer size overrides included) leaks into the next one.

pub mod loader;
pub mod model;

pub use loader::load_config;

use std::path::PathBuf;

use crate::error::{FintError, Result};

/// Default config directory, relative to the working directory
pub const DEFAULT_CONFIG_DIR: &str = ".fint";

/// Default message locale
pub const DEFAULT_LOCALE: &str = "en";

/// Default HTML report template name
pub const DEFAULT_TEMPLATE: &str = "default";

/// Line buffer capacity used when no override is set
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Options for one lint run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Source tree to check
    pub src_root: PathBuf,

    /// Directory holding `builtin/modules` and `builtin/targets`
    pub config_root: PathBuf,

    /// Message locale
    pub locale: String,

    /// Target id (directory name under `builtin/targets`)
    pub target_id: String,

    /// Optional HTML report directory
    pub html: Option<PathBuf>,

    /// HTML report template name
    pub template: String,

    /// Overwrite an existing report directory
    pub force: bool,

    /// Suppress standard output
    pub quiet: bool,

    /// Rewrite source files in place
    pub fix: bool,

    /// Line buffer capacity in bytes, 0 means [`DEFAULT_BUFFER_SIZE`]
    pub buffer_size: usize,

    /// Number of worker threads, 0 or 1 checks files sequentially
    pub jobs: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            src_root: PathBuf::new(),
            config_root: PathBuf::from(DEFAULT_CONFIG_DIR),
            locale: DEFAULT_LOCALE.to_string(),
            target_id: String::new(),
            html: None,
            template: DEFAULT_TEMPLATE.to_string(),
            force: false,
            quiet: false,
            fix: false,
            buffer_size: 0,
            jobs: 1,
        }
    }
}

impl RunConfig {
    /// Create a run configuration for a source root and target
    pub fn new(src_root: impl Into<PathBuf>, target_id: impl Into<String>) -> Self {
        Self {
            src_root: src_root.into(),
            target_id: target_id.into(),
            ..Default::default()
        }
    }

    /// Set the line buffer capacity; 0 restores the default
    pub fn set_buffer_size(&mut self, size: usize) {
        self.buffer_size = size;
    }

    /// Line buffer capacity actually used by the line reader
    pub fn effective_buffer_size(&self) -> usize {
        if self.buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            self.buffer_size
        }
    }

    /// Check that the required options are present
    pub fn validate(&self) -> Result<()> {
        if self.src_root.as_os_str().is_empty() {
            return Err(FintError::MissingArgument("source directory"));
        }
        if self.target_id.is_empty() {
            return Err(FintError::MissingArgument("ID of the rule set"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RunConfig::default();
        assert_eq!(config.config_root, PathBuf::from(".fint"));
        assert_eq!(config.locale, "en");
        assert_eq!(config.template, "default");
        assert!(!config.fix);
        assert_eq!(config.effective_buffer_size(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_buffer_size_reset() {
        let mut config = RunConfig::new("src", "objc");
        config.set_buffer_size(1);
        assert_eq!(config.effective_buffer_size(), 1);
        config.set_buffer_size(0);
        assert_eq!(config.effective_buffer_size(), DEFAULT_BUFFER_SIZE);
    }

    #[test]
    fn test_validate_requires_source_root() {
        let config = RunConfig::new("", "objc");
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "fint: source directory is required.");
    }

    #[test]
    fn test_validate_requires_target_id() {
        let config = RunConfig::new("src", "");
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "fint: ID of the rule set is required.");
    }

    #[test]
    fn test_validate_ok() {
        assert!(RunConfig::new("src", "objc").validate().is_ok());
    }
}
