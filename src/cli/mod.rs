//! # CLI Module
//!
//! Command-line interface for fint, built with `clap`.
//!
//! ## Submodules
//!
//! - [`check`] - The lint run driven by the parsed flags
//! - [`exit_codes`] - Process exit codes
//! - [`output`] - Violation renderers (terminal, JSON, HTML report)
//!
//! ## Examples
//!
//! ```bash
//! # Check a tree with the objc target
//! fint -s src -i objc
//!
//! # Japanese messages, fix in place
//! fint -s src -i objc -l ja --fix
//!
//! # Write an HTML report, replacing an older one
//! fint -s src -i objc -h report -f
//! ```

pub mod check;
pub mod exit_codes;
pub mod output;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{RunConfig, DEFAULT_CONFIG_DIR, DEFAULT_LOCALE, DEFAULT_TEMPLATE};

/// fint - configurable line-based source style checker
#[derive(Parser, Debug)]
#[command(name = "fint")]
#[command(author, version, about, long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// Source directory to check
    #[arg(short = 's', long = "src", value_name = "DIR")]
    pub src_root: Option<PathBuf>,

    /// Config directory
    #[arg(short, long, value_name = "DIR", default_value = DEFAULT_CONFIG_DIR, env = "FINT_CONFIG")]
    pub config: PathBuf,

    /// Message locale
    #[arg(short, long, default_value = DEFAULT_LOCALE, env = "FINT_LOCALE")]
    pub locale: String,

    /// ID of the rule set (target)
    #[arg(short = 'i', long = "id", value_name = "ID", env = "FINT_TARGET")]
    pub target_id: Option<String>,

    /// Write an HTML report into this directory
    #[arg(short = 'h', long, value_name = "DIR")]
    pub html: Option<PathBuf>,

    /// Overwrite an existing report directory
    #[arg(short, long)]
    pub force: bool,

    /// Print nothing on standard output
    #[arg(short, long)]
    pub quiet: bool,

    /// Rewrite source files with the available fixes
    #[arg(long)]
    pub fix: bool,

    /// HTML report template name
    #[arg(long, default_value = DEFAULT_TEMPLATE)]
    pub template: String,

    /// Output format for the violation listing
    #[arg(long, value_enum, default_value_t = OutputFormat::Terminal)]
    pub format: OutputFormat,

    /// Number of worker threads
    #[arg(short, long, default_value_t = 1)]
    pub jobs: usize,

    /// Line buffer size in bytes (0 uses the default)
    #[arg(long, default_value_t = 0)]
    pub buffer_size: usize,

    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long, action = clap::ArgAction::Help)]
    pub help: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl Cli {
    /// Build the run configuration from the parsed flags
    pub fn run_config(&self) -> RunConfig {
        let mut config = RunConfig {
            src_root: self.src_root.clone().unwrap_or_default(),
            config_root: self.config.clone(),
            locale: self.locale.clone(),
            target_id: self.target_id.clone().unwrap_or_default(),
            html: self.html.clone(),
            template: self.template.clone(),
            force: self.force,
            quiet: self.quiet,
            fix: self.fix,
            jobs: self.jobs,
            ..Default::default()
        };
        config.set_buffer_size(self.buffer_size);
        config
    }
}
