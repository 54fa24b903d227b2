//! Policy store and config-file loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use kp_vedic_base::Graha;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::{DEFAULT_POLICY, EventPolicy, builtin_policies};
use crate::settings::EngineSettings;

/// A policy as written in the config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyEntry {
    #[serde(default)]
    pub label: Option<String>,
    pub positive_houses: Vec<u8>,
    #[serde(default)]
    pub negative_houses: Vec<u8>,
    #[serde(default)]
    pub focus: BTreeMap<String, f64>,
    pub age_min: f64,
    pub age_max: f64,
}

impl PolicyEntry {
    fn into_policy(self, name: &str) -> Result<EventPolicy, ConfigError> {
        let mut focus = BTreeMap::new();
        for (body, weight) in self.focus {
            let graha: Graha = body.parse().map_err(|_| ConfigError::InvalidPolicy {
                name: name.to_string(),
                reason: format!("unknown body '{body}' in focus"),
            })?;
            focus.insert(graha, weight);
        }
        let policy = EventPolicy {
            name: name.to_string(),
            label: self.label.unwrap_or_else(|| name.to_string()),
            positive_houses: self.positive_houses,
            negative_houses: self.negative_houses,
            focus,
            age_min: self.age_min,
            age_max: self.age_max,
        };
        policy.validate()?;
        Ok(policy)
    }
}

/// Whole config file: `[engine]` plus `[policies.<name>]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpConfig {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub policies: BTreeMap<String, PolicyEntry>,
}

impl KpConfig {
    /// Parse config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: KpConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.engine.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.display())))?;
        debug!("loaded config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Load `kp.toml` from the current or `config/` directory, or fall back
    /// to built-in defaults when neither exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [PathBuf::from("kp.toml"), PathBuf::from("config/kp.toml")];
        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        debug!("no kp.toml found, using built-in configuration");
        Ok(Self::default())
    }

    /// Built-in policies with this file's entries layered on top.
    pub fn policy_store(&self) -> Result<PolicyStore, ConfigError> {
        let mut store = PolicyStore::builtin();
        for (name, entry) in &self.policies {
            let key = normalize_name(name);
            store.insert(entry.clone().into_policy(&key)?);
        }
        Ok(store)
    }
}

fn normalize_name(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

/// Named event policies with a guaranteed fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyStore {
    named: BTreeMap<String, EventPolicy>,
    fallback: EventPolicy,
}

impl PolicyStore {
    /// Store holding only the built-in policies.
    pub fn builtin() -> Self {
        let named = builtin_policies()
            .into_iter()
            .filter(|p| p.name != DEFAULT_POLICY)
            .map(|p| (p.name.clone(), p))
            .collect();
        Self {
            named,
            fallback: EventPolicy::fallback(),
        }
    }

    /// Add or replace a policy; its name is the key.
    pub fn insert(&mut self, policy: EventPolicy) {
        if policy.name == DEFAULT_POLICY {
            self.fallback = policy;
        } else {
            self.named.insert(policy.name.clone(), policy);
        }
    }

    /// Policy for `name`, or the default policy when `name` is unknown.
    pub fn resolve(&self, name: &str) -> &EventPolicy {
        match self.lookup(name) {
            Some(p) => p,
            None => {
                warn!("unknown event policy '{name}', falling back to '{DEFAULT_POLICY}'");
                &self.fallback
            }
        }
    }

    /// Policy for `name`, failing when it is not defined.
    pub fn get_strict(&self, name: &str) -> Result<&EventPolicy, ConfigError> {
        self.lookup(name)
            .ok_or_else(|| ConfigError::UnknownPolicy(name.to_string()))
    }

    /// The fallback policy.
    pub fn default_policy(&self) -> &EventPolicy {
        &self.fallback
    }

    /// Defined policy names, sorted, followed by the default.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.named
            .keys()
            .map(String::as_str)
            .chain(std::iter::once(DEFAULT_POLICY))
    }

    fn lookup(&self, name: &str) -> Option<&EventPolicy> {
        let key = normalize_name(name);
        if key == DEFAULT_POLICY {
            return Some(&self.fallback);
        }
        self.named.get(&key)
    }
}

impl Default for PolicyStore {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup() {
        let store = PolicyStore::builtin();
        assert_eq!(store.resolve("Marriage").label, "marriage");
        assert_eq!(store.resolve("travel").label, "foreign travel");
        assert_eq!(store.names().count(), 5);
    }

    #[test]
    fn unknown_falls_back_to_default() {
        let store = PolicyStore::builtin();
        assert_eq!(store.resolve("lottery").name, DEFAULT_POLICY);
        assert!(matches!(
            store.get_strict("lottery"),
            Err(ConfigError::UnknownPolicy(_))
        ));
    }

    #[test]
    fn parse_minimal_config() {
        let config = KpConfig::from_toml_str("").unwrap();
        assert_eq!(config.engine, EngineSettings::default());
        assert!(config.policies.is_empty());
    }

    #[test]
    fn file_policy_overrides_builtin() {
        let toml = r#"
[engine]
result_limit = 3

[policies.marriage]
label = "wedding"
positive_houses = [7, 11]
negative_houses = [6]
age_min = 21.0
age_max = 60.0

[policies.marriage.focus]
venus = 3.0
"#;
        let config = KpConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.engine.result_limit, 3);
        let store = config.policy_store().unwrap();
        let m = store.resolve("marriage");
        assert_eq!(m.label, "wedding");
        assert_eq!(m.positive_houses, vec![7, 11]);
        assert_eq!(m.focus_weight(Graha::Shukra), 3.0);
        assert_eq!(m.focus_weight(Graha::Guru), 0.0);
    }

    #[test]
    fn unknown_focus_body_is_rejected() {
        let toml = r#"
[policies.exam]
positive_houses = [4, 9]
age_min = 5.0
age_max = 40.0
[policies.exam.focus]
pluto = 1.0
"#;
        let config = KpConfig::from_toml_str(toml).unwrap();
        assert!(matches!(
            config.policy_store(),
            Err(ConfigError::InvalidPolicy { .. })
        ));
    }

    #[test]
    fn bad_toml_is_parse_error() {
        assert!(matches!(
            KpConfig::from_toml_str("[engine\nmax_level = 1"),
            Err(ConfigError::Parse(_))
        ));
    }
}
