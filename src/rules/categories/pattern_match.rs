//! `pattern_match` rules
//!
//! Arguments: `[match, exclude, replacement?]`. A line breaks the rule when
//! `match` finds a span in it and that span is not itself matched by `exclude`.
//! The exclude pattern refines the matched span, not the whole line. The
//! replacement uses regex expansion syntax (`$1`, `${name}`).

use regex::Regex;

use super::RuleArgs;
use crate::error::Result;
use crate::rules::engine::{replace_until_stable, LineRule, MAX_FIX_PASSES};

#[derive(Debug, Clone)]
pub struct PatternMatch {
    pattern: Regex,
    exclude: Option<Regex>,
    replacement: Option<String>,
}

impl PatternMatch {
    pub fn new(pattern: Regex, exclude: Option<Regex>, replacement: Option<String>) -> Self {
        Self {
            pattern,
            exclude,
            replacement,
        }
    }

    pub fn from_args(args: &RuleArgs<'_>) -> Result<Self> {
        args.expect_arity(1, 3)?;
        let pattern = args.regex(0, "match pattern")?;
        let exclude = args.optional_regex(1, "exclude pattern")?;
        let replacement = match args.len() {
            3 => Some(args.string(2, "replacement")?.to_string()),
            _ => None,
        };
        Ok(Self::new(pattern, exclude, replacement))
    }
}

impl LineRule for PatternMatch {
    fn detect(&self, line: &str) -> bool {
        let Some(found) = self.pattern.find(line) else {
            return false;
        };
        match &self.exclude {
            Some(exclude) => !exclude.is_match(found.as_str()),
            None => true,
        }
    }

    fn fix(&self, line: &str) -> Option<String> {
        let replacement = self.replacement.as_deref()?;
        Some(replace_until_stable(
            &self.pattern,
            line,
            replacement,
            true,
            MAX_FIX_PASSES,
        ))
    }
}
