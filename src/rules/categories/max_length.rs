//! `max_length` rules
//!
//! Arguments: `[applies_to, max]`. Only lines matching `applies_to` are
//! measured, which lets a rule target just comments or just code. Length is
//! the byte length of the line without its terminator.

use regex::Regex;

use super::RuleArgs;
use crate::error::Result;
use crate::rules::engine::LineRule;

#[derive(Debug, Clone)]
pub struct MaxLength {
    applies_to: Regex,
    max: usize,
}

impl MaxLength {
    pub fn new(applies_to: Regex, max: usize) -> Self {
        Self { applies_to, max }
    }

    pub fn from_args(args: &RuleArgs<'_>) -> Result<Self> {
        args.expect_arity(2, 2)?;
        let applies_to = args.regex(0, "applicability pattern")?;
        let max = args.count(1, "max length")?;
        Ok(Self::new(applies_to, max))
    }

    pub fn max(&self) -> usize {
        self.max
    }
}

impl LineRule for MaxLength {
    fn detect(&self, line: &str) -> bool {
        line.len() > self.max && self.applies_to.is_match(line)
    }

    fn message_args(&self) -> Vec<i64> {
        vec![i64::try_from(self.max).unwrap_or(i64::MAX)]
    }
}
