//! Module engine
//!
//! Dispatches one source line to a module's rules and collects the resulting
//! violations together with the fully fixed line.

use regex::Regex;
use std::path::Path;
use tracing::trace;

use super::model::{Module, ModuleRules, Rule};
use super::results::Violation;

/// Upper bound on substitution passes that do not shorten the line
pub const MAX_FIX_PASSES: usize = 8;

/// Behaviour shared by every rule kind
pub trait LineRule {
    /// Whether `line` breaks this rule
    fn detect(&self, line: &str) -> bool;

    /// The line with this rule's fix applied until it no longer changes.
    /// `None` when the rule has no fix.
    fn fix(&self, _line: &str) -> Option<String> {
        None
    }

    /// Numbers substituted into the message template
    fn message_args(&self) -> Vec<i64> {
        Vec::new()
    }
}

/// Result of applying one or more modules to one line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineOutcome {
    pub violations: Vec<Violation>,
    /// The rewritten line, present only when it differs from the input
    pub fixed_line: Option<String>,
}

impl LineOutcome {
    pub fn fixed_any(&self) -> bool {
        self.fixed_line.is_some()
    }
}

/// Applies modules to lines for one locale and fix setting
#[derive(Debug, Clone)]
pub struct ModuleEngine<'a> {
    locale: &'a str,
    should_fix: bool,
}

impl<'a> ModuleEngine<'a> {
    pub fn new(locale: &'a str, should_fix: bool) -> Self {
        Self { locale, should_fix }
    }

    /// Apply one module to one line
    pub fn apply(&self, module: &Module, path: &Path, line_number: usize, line: &str) -> LineOutcome {
        match &module.rules {
            ModuleRules::PatternMatch(rules) => self.apply_rules(rules, path, line_number, line),
            ModuleRules::MaxLength(rules) => self.apply_rules(rules, path, line_number, line),
            ModuleRules::Indent(rules) => self.apply_rules(rules, path, line_number, line),
        }
    }

    /// Apply every module to one line. In fix mode each module sees the line
    /// as left by the modules before it, so fixes from different modules
    /// accumulate instead of overwriting each other.
    pub fn check_line(
        &self,
        modules: &[&Module],
        path: &Path,
        line_number: usize,
        line: &str,
    ) -> LineOutcome {
        let mut current = line.to_string();
        let mut violations = Vec::new();

        for module in modules {
            let outcome = self.apply(module, path, line_number, &current);
            violations.extend(outcome.violations);
            if let Some(fixed) = outcome.fixed_line {
                trace!(module = %module.id, line = line_number, "Module fixed line");
                current = fixed;
            }
        }

        LineOutcome {
            violations,
            fixed_line: (current != line).then_some(current),
        }
    }

    fn apply_rules<C: LineRule>(
        &self,
        rules: &[Rule<C>],
        path: &Path,
        line_number: usize,
        line: &str,
    ) -> LineOutcome {
        let mut current = line.to_string();
        let mut violations = Vec::new();

        for rule in rules {
            if !rule.check.detect(&current) {
                continue;
            }

            let message = rule
                .messages
                .render(self.locale, &rule.check.message_args());
            let mut violation = Violation::new(path, line_number, &rule.id, message);

            if self.should_fix {
                if let Some(fixed) = rule.check.fix(&current) {
                    if fixed != current {
                        current = fixed;
                        violation = violation.with_fix(current.clone());
                    }
                }
            }

            violations.push(violation);
        }

        LineOutcome {
            violations,
            fixed_line: (current != line).then_some(current),
        }
    }
}

/// Substitute `re` in `line` until it no longer matches or the result stops
/// changing. Passes that shorten the line always terminate and are not
/// counted; passes that keep or grow its length stop after `max_passes`.
pub fn replace_until_stable(
    re: &Regex,
    line: &str,
    replacement: &str,
    replace_all: bool,
    max_passes: usize,
) -> String {
    let mut current = line.to_string();
    let mut bounded_passes = 0;

    while re.is_match(&current) {
        let next = if replace_all {
            re.replace_all(&current, replacement)
        } else {
            re.replace(&current, replacement)
        };
        if next == current {
            break;
        }
        if next.len() >= current.len() {
            if bounded_passes == max_passes {
                break;
            }
            bounded_passes += 1;
        }
        current = next.into_owned();
    }

    current
}
