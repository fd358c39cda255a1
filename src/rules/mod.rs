//! Rules module - Rule model, rule kinds and the module engine

pub mod categories;
pub mod engine;
pub mod messages;
pub mod model;
pub mod results;

pub use engine::{LineOutcome, LineRule, ModuleEngine};
pub use messages::Messages;
pub use model::{Module, ModuleKind, ModuleRules, Rule, RuleSet, Target};
pub use results::{LineViolations, LintResults, Violation};
