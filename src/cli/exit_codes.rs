//! Exit codes for the CLI
//!
//! | Code | Constant | Meaning |
//! |------|----------|---------|
//! | 0 | `SUCCESS` | Run completed, no violations |
//! | 1 | `VIOLATIONS` | At least one violation was reported |
//! | 1 | `ERROR` | Configuration or I/O error |
//!
//! Violations and errors share a code so existing CI scripts that only test
//! for non-zero keep working.

/// No violations found
pub const SUCCESS: i32 = 0;

/// One or more violations found (fixed ones included)
pub const VIOLATIONS: i32 = 1;

/// The run was aborted by an error
pub const ERROR: i32 = 1;
