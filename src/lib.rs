//! fint Library
//!
//! A configuration-driven, line-based source style checker. Rules are loaded
//! from a JSON config tree, every matching file under a source root is checked
//! line by line, and fixable violations can be rewritten in place.
//!
//! ```no_run
//! use fint::RunConfig;
//!
//! let config = RunConfig::new("src", "objc");
//! let results = fint::execute(&config)?;
//! for v in results.violations() {
//!     println!("{}:{}: {}", v.filename.display(), v.line, v.message);
//! }
//! # Ok::<(), fint::FintError>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fix;
pub mod rules;
pub mod scanner;

pub use config::RunConfig;
pub use error::{FintError, Result};
pub use scanner::{check_source_file, execute};
