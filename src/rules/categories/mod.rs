//! Built-in rule kinds
//!
//! Each kind parses its own argument list once, at load time, through
//! [`RuleArgs`], and implements [`LineRule`](super::engine::LineRule).

pub mod indent;
pub mod max_length;
pub mod pattern_match;

pub use indent::{Indent, IndentStyle};
pub use max_length::MaxLength;
pub use pattern_match::PatternMatch;

use regex::Regex;
use serde_json::Value;

use crate::error::{FintError, Result};

/// Positional access to a rule's raw arguments with typed errors
pub struct RuleArgs<'a> {
    module: &'a str,
    rule: &'a str,
    args: &'a [Value],
}

impl<'a> RuleArgs<'a> {
    pub fn new(module: &'a str, rule: &'a str, args: &'a [Value]) -> Self {
        Self { module, rule, args }
    }

    pub fn rule_id(&self) -> &'a str {
        self.rule
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn invalid(&self, reason: impl Into<String>) -> FintError {
        FintError::InvalidRuleArguments {
            module: self.module.to_string(),
            rule: self.rule.to_string(),
            reason: reason.into(),
        }
    }

    /// Fail unless `min <= len <= max`
    pub fn expect_arity(&self, min: usize, max: usize) -> Result<()> {
        let len = self.args.len();
        if len < min || len > max {
            let expected = if min == max {
                format!("{min}")
            } else {
                format!("{min} to {max}")
            };
            return Err(self.invalid(format!("expected {expected} arguments, got {len}")));
        }
        Ok(())
    }

    pub fn is_number(&self, index: usize) -> bool {
        self.args.get(index).is_some_and(Value::is_number)
    }

    pub fn string(&self, index: usize, name: &str) -> Result<&'a str> {
        match self.args.get(index) {
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(self.invalid(format!("{name} must be a string, got {other}"))),
            None => Err(self.invalid(format!("missing {name}"))),
        }
    }

    /// A string argument that may be absent, `null`, or empty
    pub fn optional_string(&self, index: usize, name: &str) -> Result<Option<&'a str>> {
        match self.args.get(index) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) if s.is_empty() => Ok(None),
            Some(_) => self.string(index, name).map(Some),
        }
    }

    /// A non-negative whole number; JSON floats like `80.0` are accepted
    pub fn count(&self, index: usize, name: &str) -> Result<usize> {
        let value = self
            .args
            .get(index)
            .ok_or_else(|| self.invalid(format!("missing {name}")))?;

        if let Some(n) = value.as_u64() {
            return usize::try_from(n).map_err(|_| self.invalid(format!("{name} is too large")));
        }
        match value.as_f64() {
            Some(f) if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 => Ok(f as usize),
            _ => Err(self.invalid(format!("{name} must be a non-negative integer, got {value}"))),
        }
    }

    pub fn regex(&self, index: usize, name: &str) -> Result<Regex> {
        compile(self.string(index, name)?)
    }

    pub fn optional_regex(&self, index: usize, name: &str) -> Result<Option<Regex>> {
        self.optional_string(index, name)?.map(compile).transpose()
    }
}

pub(crate) fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| FintError::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_arity_error_names_rule() {
        let args = vec![json!(".*")];
        let err = RuleArgs::new("max_length", "line_length", &args)
            .expect_arity(2, 2)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "fint: invalid arguments for rule [line_length] in module [max_length]: expected 2 arguments, got 1"
        );
    }

    #[test]
    fn test_count_accepts_integral_floats() {
        let args = vec![json!(80), json!(80.0), json!(-1), json!(1.5), json!("80")];
        let ra = RuleArgs::new("m", "r", &args);
        assert_eq!(ra.count(0, "max").unwrap(), 80);
        assert_eq!(ra.count(1, "max").unwrap(), 80);
        assert!(ra.count(2, "max").is_err());
        assert!(ra.count(3, "max").is_err());
        assert!(ra.count(4, "max").is_err());
        assert!(ra.count(5, "max").is_err());
    }

    #[test]
    fn test_optional_string() {
        let args = vec![json!(""), json!(null), json!("x"), json!(3)];
        let ra = RuleArgs::new("m", "r", &args);
        assert_eq!(ra.optional_string(0, "a").unwrap(), None);
        assert_eq!(ra.optional_string(1, "a").unwrap(), None);
        assert_eq!(ra.optional_string(2, "a").unwrap(), Some("x"));
        assert!(ra.optional_string(3, "a").is_err());
        assert_eq!(ra.optional_string(9, "a").unwrap(), None);
    }

    #[test]
    fn test_invalid_regex() {
        let args = vec![json!("[unclosed")];
        let err = RuleArgs::new("m", "r", &args).regex(0, "pattern").unwrap_err();
        assert!(matches!(err, FintError::InvalidPattern { .. }));
    }
}
