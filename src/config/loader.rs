//! Configuration loader
//!
//! Reads the module registry and a target's ruleset from the config root,
//! validates every rule, and overlays the localized messages.
//!
//! ```text
//! <config_root>/builtin/modules/<module>/config.json
//! <config_root>/builtin/targets/<target>/ruleset.json
//! <config_root>/builtin/targets/<target>/locales/<locale>.json
//! ```

use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::model::{LocalizedTarget, ModuleConfig, ModuleFile, RuleFile, TargetFile};
use crate::error::{FintError, Result};
use crate::rules::categories::{self, Indent, MaxLength, PatternMatch, RuleArgs};
use crate::rules::model::{Module, ModuleKind, ModuleRules, Rule, RuleSet, Target};
use crate::rules::Messages;

pub const DIR_BUILTIN: &str = "builtin";
pub const DIR_MODULES: &str = "modules";
pub const DIR_TARGETS: &str = "targets";
pub const DIR_LOCALES: &str = "locales";
pub const FILE_CONFIG: &str = "config.json";
pub const FILE_RULESET: &str = "ruleset.json";

/// `(rule set id, module id, rule id)`
type RuleKey = (String, String, String);

/// Load the rule model for `target_id` from `config_root`
pub fn load_config(config_root: &Path, target_id: &str) -> Result<Target> {
    if !config_root.is_dir() {
        return Err(FintError::ConfigNotFound {
            path: config_root.to_path_buf(),
        });
    }

    let builtin = config_root.join(DIR_BUILTIN);
    let modules_dir = builtin.join(DIR_MODULES);
    if !modules_dir.is_dir() {
        return Err(FintError::ModulesDirNotFound { path: modules_dir });
    }
    let targets_dir = builtin.join(DIR_TARGETS);
    if !targets_dir.is_dir() {
        return Err(FintError::TargetNotFound { path: targets_dir });
    }

    let registry = load_module_configs(&modules_dir)?;

    let target_dir = targets_dir.join(target_id);
    let ruleset_path = target_dir.join(FILE_RULESET);
    if target_id.is_empty() || !ruleset_path.is_file() {
        return Err(FintError::NoMatchingTarget {
            id: target_id.to_string(),
        });
    }

    let file: TargetFile = read_json(&ruleset_path, |path, source| FintError::InvalidConfig {
        path,
        source,
    })?;
    let mut target = build_target(target_id, file, &registry)?;

    let overlays = load_locales(&target_dir.join(DIR_LOCALES))?;
    apply_locales(&mut target, &overlays);

    info!(
        target = %target.id,
        rule_sets = target.rule_sets.len(),
        modules = target.modules().count(),
        locales = ?target.locales,
        "Loaded target"
    );

    Ok(target)
}

/// Read every `<module>/config.json`, keyed by directory name
pub fn load_module_configs(modules_dir: &Path) -> Result<BTreeMap<String, ModuleConfig>> {
    let mut registry = BTreeMap::new();

    for dir in sorted_entries(modules_dir)? {
        if !dir.is_dir() {
            continue;
        }
        let Some(id) = dir.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };

        let mut config: ModuleConfig = read_json(&dir.join(FILE_CONFIG), |path, source| {
            FintError::ModuleConfigUnreadable { path, source }
        })?;
        config.id = id.clone();
        debug!(module = %id, kind = %config.r#type, "Registered module");
        registry.insert(id, config);
    }

    Ok(registry)
}

fn build_target(
    target_id: &str,
    file: TargetFile,
    registry: &BTreeMap<String, ModuleConfig>,
) -> Result<Target> {
    let mut locales = BTreeSet::new();
    let mut rule_sets = Vec::with_capacity(file.rule_sets.len());

    for rs in file.rule_sets {
        let mut modules = Vec::with_capacity(rs.modules.len());
        for module in rs.modules {
            if !registry.contains_key(&module.id) {
                return Err(FintError::UnknownModule { id: module.id });
            }
            for rule in &module.rules {
                locales.extend(rule.message.keys().cloned());
            }
            if let Some(m) = build_module(module)? {
                modules.push(m);
            }
        }
        rule_sets.push(RuleSet {
            id: rs.id,
            description: rs.description,
            modules,
        });
    }

    Ok(Target {
        id: target_id.to_string(),
        rule_sets,
        locales: locales.into_iter().collect(),
    })
}

fn build_module(file: ModuleFile) -> Result<Option<Module>> {
    let Some(kind) = ModuleKind::from_id(&file.id) else {
        warn!(module = %file.id, "Module kind is not built in, skipping");
        return Ok(None);
    };

    let pattern = categories::compile(&file.pattern)?;
    let id = file.id;
    let rules = match kind {
        ModuleKind::PatternMatch => {
            ModuleRules::PatternMatch(build_rules(&id, &file.rules, PatternMatch::from_args)?)
        }
        ModuleKind::MaxLength => {
            ModuleRules::MaxLength(build_rules(&id, &file.rules, MaxLength::from_args)?)
        }
        ModuleKind::Indent => ModuleRules::Indent(build_rules(&id, &file.rules, Indent::from_args)?),
    };

    Ok(Some(Module { id, pattern, rules }))
}

fn build_rules<C>(
    module_id: &str,
    rules: &[RuleFile],
    parse: fn(&RuleArgs<'_>) -> Result<C>,
) -> Result<Vec<Rule<C>>> {
    rules
        .iter()
        .map(|rule| {
            let check = parse(&RuleArgs::new(module_id, &rule.id, &rule.args))?;
            let mut messages = Messages::new();
            for (locale, template) in &rule.message {
                messages.insert(locale.as_str(), template.as_str());
            }
            Ok(Rule {
                id: rule.id.clone(),
                check,
                messages,
            })
        })
        .collect()
}

/// Read every `<locale>.json` in `locales_dir` into a table keyed by rule.
/// A missing directory simply yields no overlays.
fn load_locales(locales_dir: &Path) -> Result<Vec<(String, HashMap<RuleKey, String>)>> {
    if !locales_dir.is_dir() {
        debug!(path = %locales_dir.display(), "No locales directory");
        return Ok(Vec::new());
    }

    let mut overlays = Vec::new();
    for path in sorted_entries(locales_dir)? {
        if path.extension().and_then(|e| e.to_str()) != Some("json") {
            continue;
        }
        let Some(locale) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            continue;
        };

        let localized: LocalizedTarget =
            read_json(&path, |path, source| FintError::InvalidConfig { path, source })?;
        overlays.push((locale, locale_table(&localized, &path)));
    }

    Ok(overlays)
}

fn locale_table(localized: &LocalizedTarget, path: &Path) -> HashMap<RuleKey, String> {
    let mut table = HashMap::new();
    for rs in &localized.rule_sets {
        for module in &rs.modules {
            for rule in &module.rules {
                if rule.id.is_empty() {
                    warn!(
                        file = %path.display(),
                        module = %module.id,
                        "Localized rule has no Id, ignoring"
                    );
                    continue;
                }
                table.insert(
                    (rs.id.clone(), module.id.clone(), rule.id.clone()),
                    rule.message.clone(),
                );
            }
        }
    }
    table
}

/// Attach each overlay's messages to the rules they name
fn apply_locales(target: &mut Target, overlays: &[(String, HashMap<RuleKey, String>)]) {
    let mut locales: BTreeSet<String> = target.locales.iter().cloned().collect();

    for (locale, table) in overlays {
        locales.insert(locale.clone());
        let mut used: HashSet<&RuleKey> = HashSet::new();

        for rs in &mut target.rule_sets {
            for module in &mut rs.modules {
                let module_id = module.id.clone();
                for_each_rule(&mut module.rules, |rule_id, messages| {
                    let key = (rs.id.clone(), module_id.clone(), rule_id.to_string());
                    if let Some((key, message)) = table.get_key_value(&key) {
                        messages.insert(locale.as_str(), message.as_str());
                        used.insert(key);
                    }
                });
            }
        }

        for (rs, module, rule) in table.keys().filter(|k| !used.contains(k)) {
            warn!(
                locale = %locale,
                rule_set = %rs,
                module = %module,
                rule = %rule,
                "Localized message matches no rule"
            );
        }
    }

    target.locales = locales.into_iter().collect();
}

fn for_each_rule(rules: &mut ModuleRules, mut f: impl FnMut(&str, &mut Messages)) {
    match rules {
        ModuleRules::PatternMatch(rules) => rules.iter_mut().for_each(|r| f(&r.id, &mut r.messages)),
        ModuleRules::MaxLength(rules) => rules.iter_mut().for_each(|r| f(&r.id, &mut r.messages)),
        ModuleRules::Indent(rules) => rules.iter_mut().for_each(|r| f(&r.id, &mut r.messages)),
    }
}

fn read_json<T: DeserializeOwned>(
    path: &Path,
    on_parse_error: impl FnOnce(PathBuf, serde_json::Error) -> FintError,
) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| FintError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|e| on_parse_error(path.to_path_buf(), e))
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|source| FintError::ConfigRead {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut paths = entries
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|source| FintError::ConfigRead {
            path: dir.to_path_buf(),
            source,
        })?;
    paths.sort();
    Ok(paths)
}
