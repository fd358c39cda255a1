//! On-disk configuration shapes
//!
//! These mirror the JSON files under the config root one to one. Nothing here
//! is validated; [`loader`](super::loader) turns them into the typed rule model.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// `builtin/modules/<name>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleConfig {
    /// Module id, taken from the directory name
    #[serde(skip)]
    pub id: String,

    #[serde(default)]
    pub r#type: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub executable: String,

    #[serde(default)]
    pub args: Vec<Value>,
}

/// `builtin/targets/<id>/ruleset.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TargetFile {
    #[serde(default)]
    pub rule_sets: Vec<RuleSetFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleSetFile {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub modules: Vec<ModuleFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleFile {
    #[serde(default)]
    pub id: String,

    /// Regex tested against the full path of each file
    #[serde(default)]
    pub pattern: String,

    #[serde(default)]
    pub rules: Vec<RuleFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RuleFile {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub args: Vec<Value>,

    /// Locale code to message template
    #[serde(default)]
    pub message: HashMap<String, String>,
}

/// `builtin/targets/<id>/locales/<locale>.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedTarget {
    #[serde(default)]
    pub rule_sets: Vec<LocalizedRuleSet>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedRuleSet {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub modules: Vec<LocalizedModule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedModule {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub rules: Vec<LocalizedRule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocalizedRule {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_file_parsing() {
        let json = r#"{
            "RuleSets": [{
                "Id": "objc",
                "Description": "Objective-C",
                "Modules": [{
                    "Id": "max_length",
                    "Pattern": "\\.m$",
                    "Rules": [{
                        "Id": "line_length",
                        "Args": [".*", 80],
                        "Message": {"en": "Line length exceeds %d characters"}
                    }]
                }]
            }]
        }"#;
        let target: TargetFile = serde_json::from_str(json).unwrap();
        let rule = &target.rule_sets[0].modules[0].rules[0];
        assert_eq!(rule.id, "line_length");
        assert_eq!(rule.args.len(), 2);
        assert_eq!(rule.message["en"], "Line length exceeds %d characters");
    }

    #[test]
    fn test_module_config_missing_fields_default() {
        let config: ModuleConfig = serde_json::from_str(r#"{"Type": "builtin"}"#).unwrap();
        assert_eq!(config.r#type, "builtin");
        assert!(config.executable.is_empty());
        assert!(config.args.is_empty());
    }
}
