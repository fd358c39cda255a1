//! `indent` rules
//!
//! Arguments: `[kind, width]`, e.g. `["Whitespaces", 4]`. The older form, where
//! the rule id names the kind and the only argument is the width, is accepted
//! too.

use lazy_static::lazy_static;
use regex::Regex;

use super::RuleArgs;
use crate::error::Result;
use crate::rules::engine::{replace_until_stable, LineRule};

lazy_static! {
    /// First tab inside the leading whitespace run
    static ref INDENT_TAB: Regex = Regex::new(r"^( *)\t").unwrap();
}

/// What the indentation must consist of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    /// Spaces only; leading tabs are expanded
    Whitespaces,
}

impl IndentStyle {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "Whitespaces" => Some(Self::Whitespaces),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Indent {
    style: IndentStyle,
    width: usize,
    replacement: String,
}

impl Indent {
    pub fn new(style: IndentStyle, width: usize) -> Self {
        // `$1` keeps the spaces already expanded in front of the tab
        let replacement = format!("${{1}}{}", " ".repeat(width));
        Self {
            style,
            width,
            replacement,
        }
    }

    pub fn from_args(args: &RuleArgs<'_>) -> Result<Self> {
        let (tag, width) = if args.len() == 1 && args.is_number(0) {
            (args.rule_id(), args.count(0, "indent width")?)
        } else {
            args.expect_arity(2, 2)?;
            (args.string(0, "indent kind")?, args.count(1, "indent width")?)
        };

        let style = IndentStyle::from_tag(tag)
            .ok_or_else(|| args.invalid(format!("unknown indent kind `{tag}`")))?;
        Ok(Self::new(style, width))
    }

    pub fn style(&self) -> IndentStyle {
        self.style
    }

    pub fn width(&self) -> usize {
        self.width
    }
}

impl LineRule for Indent {
    fn detect(&self, line: &str) -> bool {
        match self.style {
            IndentStyle::Whitespaces => line.starts_with('\t'),
        }
    }

    /// Expands one tab per pass, left to right, so each tab becomes exactly
    /// `width` spaces.
    fn fix(&self, line: &str) -> Option<String> {
        match self.style {
            IndentStyle::Whitespaces => {
                let passes = line.bytes().filter(|b| *b == b'\t').count();
                Some(replace_until_stable(
                    &INDENT_TAB,
                    line,
                    &self.replacement,
                    false,
                    passes,
                ))
            }
        }
    }
}
