//! Typed rule model
//!
//! Target → RuleSet → Module → Rule, built once per run by the config loader
//! and read-only afterwards. Rule arguments are validated at load time into a
//! per-kind type, so dispatch never has to interpret raw JSON.

use regex::Regex;
use std::path::Path;

use super::categories::{Indent, MaxLength, PatternMatch};
use super::messages::Messages;

/// A named checking profile
#[derive(Debug, Clone)]
pub struct Target {
    pub id: String,
    pub rule_sets: Vec<RuleSet>,
    /// Locale codes with at least one message, sorted
    pub locales: Vec<String>,
}

impl Target {
    /// Every module of every rule set, in configuration order
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.rule_sets.iter().flat_map(|rs| rs.modules.iter())
    }

    /// Look up a rule set by id
    pub fn rule_set(&self, id: &str) -> Option<&RuleSet> {
        self.rule_sets.iter().find(|rs| rs.id == id)
    }

    /// Modules whose file pattern matches `path`
    pub fn modules_for(&self, path: &Path) -> Vec<&Module> {
        self.modules().filter(|m| m.applies_to(path)).collect()
    }
}

#[derive(Debug, Clone)]
pub struct RuleSet {
    pub id: String,
    pub description: String,
    pub modules: Vec<Module>,
}

impl RuleSet {
    /// Modules of this set whose file pattern matches `path`
    pub fn modules_for(&self, path: &Path) -> Vec<&Module> {
        self.modules.iter().filter(|m| m.applies_to(path)).collect()
    }
}

/// A rule kind bound to a file pattern
#[derive(Debug, Clone)]
pub struct Module {
    pub id: String,
    /// Tested against the full path of each walked file
    pub pattern: Regex,
    pub rules: ModuleRules,
}

impl Module {
    pub fn applies_to(&self, path: &Path) -> bool {
        self.pattern.is_match(&path.to_string_lossy())
    }

    pub fn kind(&self) -> ModuleKind {
        match self.rules {
            ModuleRules::PatternMatch(_) => ModuleKind::PatternMatch,
            ModuleRules::MaxLength(_) => ModuleKind::MaxLength,
            ModuleRules::Indent(_) => ModuleKind::Indent,
        }
    }

    pub fn rule_count(&self) -> usize {
        match &self.rules {
            ModuleRules::PatternMatch(rules) => rules.len(),
            ModuleRules::MaxLength(rules) => rules.len(),
            ModuleRules::Indent(rules) => rules.len(),
        }
    }
}

/// Built-in module kinds, selected by module id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    PatternMatch,
    MaxLength,
    Indent,
}

impl ModuleKind {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "pattern_match" => Some(Self::PatternMatch),
            "max_length" => Some(Self::MaxLength),
            "indent" => Some(Self::Indent),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::PatternMatch => "pattern_match",
            Self::MaxLength => "max_length",
            Self::Indent => "indent",
        }
    }
}

/// The rules of a module, typed by its kind
#[derive(Debug, Clone)]
pub enum ModuleRules {
    PatternMatch(Vec<Rule<PatternMatch>>),
    MaxLength(Vec<Rule<MaxLength>>),
    Indent(Vec<Rule<Indent>>),
}

/// One checkable condition with its messages
#[derive(Debug, Clone)]
pub struct Rule<C> {
    pub id: String,
    pub check: C,
    pub messages: Messages,
}

impl<C> Rule<C> {
    pub fn new(id: impl Into<String>, check: C) -> Self {
        Self {
            id: id.into(),
            check,
            messages: Messages::new(),
        }
    }

    pub fn with_message(mut self, locale: &str, template: &str) -> Self {
        self.messages.insert(locale, template);
        self
    }
}
