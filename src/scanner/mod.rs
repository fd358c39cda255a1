//! Scanner module - Directory walking and per-file checking
//!
//! Every regular file under the source root is matched against each module's
//! file pattern. Files with at least one applicable module are read line by
//! line, run through the [`ModuleEngine`], and rewritten through a
//! [`ShadowFile`] when fixing.

pub mod filesystem;
pub mod line_source;

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use crate::config::{self, RunConfig};
use crate::error::Result;
use crate::fix::ShadowFile;
use crate::rules::{LineViolations, LintResults, Module, ModuleEngine, RuleSet, Target, Violation};

pub use line_source::{LineSource, SourceLine, Terminator};

/// Walks a source tree with one loaded target
pub struct Scanner<'a> {
    target: &'a Target,
    config: &'a RunConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(target: &'a Target, config: &'a RunConfig) -> Self {
        Self { target, config }
    }

    /// Check every applicable file under the source root
    pub fn walk(&self) -> Result<LintResults> {
        let files = filesystem::list_files(&self.config.src_root)?;
        let work: Vec<(PathBuf, Vec<&Module>)> = files
            .into_iter()
            .filter_map(|path| {
                let modules = self.target.modules_for(&path);
                (!modules.is_empty()).then_some((path, modules))
            })
            .collect();

        info!(
            root = %self.config.src_root.display(),
            files = work.len(),
            jobs = self.config.jobs,
            "Checking files"
        );

        let checked = if self.config.jobs > 1 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(self.config.jobs)
                .build()?;
            pool.install(|| {
                work.par_iter()
                    .map(|(path, modules)| self.check_file(path, modules))
                    .collect::<Result<Vec<_>>>()
            })?
        } else {
            work.iter()
                .map(|(path, modules)| self.check_file(path, modules))
                .collect::<Result<Vec<_>>>()?
        };

        let mut results = LintResults::new(
            &self.target.id,
            &self.config.locale,
            self.config.effective_buffer_size(),
        );
        for ((path, _), lines) in work.into_iter().zip(checked) {
            results.add_file(path, lines);
        }

        info!(
            violations = results.total_count(),
            fixed = results.fixed_count(),
            "Walk complete"
        );
        Ok(results)
    }

    /// Check one file against `modules`, rewriting it in fix mode
    pub fn check_file(&self, path: &Path, modules: &[&Module]) -> Result<LineViolations> {
        let _span = info_span!("file", path = %path.display()).entered();

        let engine = ModuleEngine::new(&self.config.locale, self.config.fix);
        // Lines that are not valid UTF-8 are checked on their lossy text but
        // never rewritten, so their bytes reach the shadow file untouched
        let check_only = ModuleEngine::new(&self.config.locale, false);
        let source = LineSource::open(path, self.config.effective_buffer_size())?;
        let mut shadow = if self.config.fix {
            Some(ShadowFile::create(path)?)
        } else {
            None
        };

        let mut lines = LineViolations::new();
        for line in source {
            let line = line?;
            let outcome = if self.config.fix && !line.is_utf8() {
                warn!(line = line.number, "Line is not valid UTF-8, leaving it unfixed");
                check_only.check_line(modules, path, line.number, &line.text)
            } else {
                engine.check_line(modules, path, line.number, &line.text)
            };

            if let Some(shadow) = shadow.as_mut() {
                shadow.write_line(&line, outcome.fixed_line.as_deref())?;
            }
            if !outcome.violations.is_empty() {
                lines
                    .entry(line.number)
                    .or_default()
                    .extend(outcome.violations);
            }
        }

        if let Some(shadow) = shadow {
            shadow.commit()?;
        }

        debug!(violations = lines.values().map(Vec::len).sum::<usize>(), "File checked");
        Ok(lines)
    }
}

/// Run a full check: validate options, load the target, walk the tree
pub fn execute(config: &RunConfig) -> Result<LintResults> {
    config.validate()?;
    let target = config::load_config(&config.config_root, &config.target_id)?;
    Scanner::new(&target, config).walk()
}

/// Check a single file against one rule set, honoring the run's locale,
/// buffer size and fix setting. Modules whose pattern does not match the
/// path are not applied.
pub fn check_source_file(path: &Path, rule_set: &RuleSet, config: &RunConfig) -> Result<Vec<Violation>> {
    let target = Target {
        id: config.target_id.clone(),
        rule_sets: Vec::new(),
        locales: Vec::new(),
    };
    let modules = rule_set.modules_for(path);
    let lines = Scanner::new(&target, config).check_file(path, &modules)?;
    Ok(lines.into_values().flatten().collect())
}
