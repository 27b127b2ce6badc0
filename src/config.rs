//! Configuration loading for the conditions CLI.
//!
//! Configuration follows a precedence chain:
//! 1. Environment variables (highest priority)
//! 2. Project config (`.conditions/config.toml`)
//! 3. User config (`~/.conditions/config.toml`)
//! 4. Defaults (lowest priority)
//!
//! All configuration is optional. Library users construct a
//! [`Marker`](crate::core::Marker) directly and never need this module.

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{Marker, TransitionPolicy, VALID_POLICIES};
use crate::error::{ConditionsError, FailOpen, Result};

/// Environment variable overriding the transition policy.
pub const ENV_TRANSITION_POLICY: &str = "CONDITIONS_TRANSITION_POLICY";

/// Environment variable overriding the user config directory.
pub const ENV_HOME: &str = "CONDITIONS_HOME";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Transition-time bookkeeping.
    pub transition: TransitionConfig,
}

/// Transition-time bookkeeping configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TransitionConfig {
    /// When `lastTransitionTime` is refreshed: "reason" or "status".
    pub policy: TransitionPolicy,
}

impl Config {
    /// Load configuration with the full precedence chain.
    pub fn load() -> Self {
        match env::current_dir() {
            Ok(cwd) => Self::load_from_cwd(&cwd),
            Err(_) => {
                let mut config = Config::default();
                if let Some(user_config) = Self::load_user_config() {
                    config = config.merge(user_config);
                }
                config.apply_env_overrides();
                config
            }
        }
    }

    /// Load configuration with a specific working directory.
    pub fn load_from_cwd(cwd: &Path) -> Self {
        let mut config = Config::default();

        if let Some(user_config) = Self::load_user_config() {
            config = config.merge(user_config);
        }

        if let Some(project_config) = Self::load_project_config(cwd) {
            config = config.merge(project_config);
        }

        config.apply_env_overrides();

        config
    }

    /// A marker configured with this config's policy and the system clock.
    pub fn marker(&self) -> Marker {
        Marker::new(self.transition.policy)
    }

    fn load_user_config() -> Option<Config> {
        let path = conditions_home()?.join("config.toml");
        Self::load_optional(&path)
    }

    fn load_project_config(cwd: &Path) -> Option<Config> {
        let path = cwd.join(".conditions").join("config.toml");
        Self::load_optional(&path)
    }

    /// Load a config file that may legitimately be absent.
    ///
    /// A missing file is silent; an unreadable or invalid one is logged and
    /// skipped.
    fn load_optional(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }
        Self::load_from_file(path)
            .map(Some)
            .fail_open_default(&format!("loading config {}", path.display()))
    }

    /// Load config from a specific file path.
    pub fn load_from_file(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| ConditionsError::io(path, e))?;
        toml::from_str(&content).map_err(|e| ConditionsError::config(e.to_string()))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var(ENV_TRANSITION_POLICY) {
            match val.parse::<TransitionPolicy>() {
                Ok(policy) => self.transition.policy = policy,
                Err(_) => tracing::warn!(
                    "Invalid {} value '{}'. Valid values: {:?}. Using '{}'.",
                    ENV_TRANSITION_POLICY,
                    val,
                    VALID_POLICIES,
                    self.transition.policy
                ),
            }
        }
    }

    /// Merge another config into this one; non-default values in `other` win.
    ///
    /// A layer cannot reset a value back to the default once a lower layer
    /// changed it.
    fn merge(mut self, other: Config) -> Self {
        let default_transition = TransitionConfig::default();
        if other.transition.policy != default_transition.policy {
            self.transition.policy = other.transition.policy;
        }
        self
    }
}

/// Get the user config directory.
///
/// Checks `CONDITIONS_HOME` first, then falls back to `~/.conditions`.
pub fn conditions_home() -> Option<PathBuf> {
    if let Ok(home) = env::var(ENV_HOME) {
        if home.is_empty() {
            tracing::warn!("{} is empty, using default", ENV_HOME);
        } else {
            return Some(PathBuf::from(home));
        }
    }

    dirs::home_dir().map(|home| home.join(".conditions"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write_config(dir: &Path, content: &str) {
        let conf_dir = dir.join(".conditions");
        fs::create_dir_all(&conf_dir).unwrap();
        fs::write(conf_dir.join("config.toml"), content).unwrap();
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.transition.policy, TransitionPolicy::Reason);
        assert_eq!(config.marker().policy(), TransitionPolicy::Reason);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[transition]\npolicy = \"status\"\n").unwrap();

        let config = Config::load_from_file(&path).unwrap();
        assert_eq!(config.transition.policy, TransitionPolicy::Status);
    }

    #[test]
    fn test_load_from_file_missing() {
        let result = Config::load_from_file(Path::new("/nonexistent/config.toml"));
        assert!(matches!(result, Err(ConditionsError::Io { .. })));
    }

    #[test]
    fn test_load_from_file_invalid_policy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[transition]\npolicy = \"sometimes\"\n").unwrap();

        let result = Config::load_from_file(&path);
        assert!(matches!(result, Err(ConditionsError::Config { .. })));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());
    }

    #[test]
    #[serial]
    fn test_project_config_applied() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        env::set_var(ENV_HOME, home.path());
        env::remove_var(ENV_TRANSITION_POLICY);
        write_config(project.path(), "[transition]\npolicy = \"status\"\n");

        let config = Config::load_from_cwd(project.path());
        assert_eq!(config.transition.policy, TransitionPolicy::Status);

        env::remove_var(ENV_HOME);
    }

    #[test]
    #[serial]
    fn test_user_config_applied() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            home.path().join("config.toml"),
            "[transition]\npolicy = \"status\"\n",
        )
        .unwrap();
        env::set_var(ENV_HOME, home.path());
        env::remove_var(ENV_TRANSITION_POLICY);

        let config = Config::load_from_cwd(project.path());
        assert_eq!(config.transition.policy, TransitionPolicy::Status);

        env::remove_var(ENV_HOME);
    }

    #[test]
    #[serial]
    fn test_invalid_project_config_is_skipped() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        env::set_var(ENV_HOME, home.path());
        env::remove_var(ENV_TRANSITION_POLICY);
        write_config(project.path(), "this is not valid toml [[[");

        let config = Config::load_from_cwd(project.path());
        assert_eq!(config, Config::default());

        env::remove_var(ENV_HOME);
    }

    #[test]
    #[serial]
    fn test_env_var_precedence() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        env::set_var(ENV_HOME, home.path());
        write_config(project.path(), "[transition]\npolicy = \"status\"\n");
        env::set_var(ENV_TRANSITION_POLICY, "reason");

        let config = Config::load_from_cwd(project.path());
        assert_eq!(config.transition.policy, TransitionPolicy::Reason);

        env::remove_var(ENV_TRANSITION_POLICY);
        env::remove_var(ENV_HOME);
    }

    #[test]
    #[serial]
    fn test_env_var_invalid_policy_ignored() {
        let home = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        env::set_var(ENV_HOME, home.path());
        env::set_var(ENV_TRANSITION_POLICY, "whenever");

        let config = Config::load_from_cwd(project.path());
        assert_eq!(config.transition.policy, TransitionPolicy::Reason);

        env::remove_var(ENV_TRANSITION_POLICY);
        env::remove_var(ENV_HOME);
    }

    #[test]
    #[serial]
    fn test_conditions_home_with_env() {
        env::set_var(ENV_HOME, "/custom/conditions");
        assert_eq!(conditions_home(), Some(PathBuf::from("/custom/conditions")));
        env::remove_var(ENV_HOME);
    }

    #[test]
    #[serial]
    fn test_conditions_home_empty_env_falls_back() {
        env::set_var(ENV_HOME, "");
        let home = conditions_home();
        if let Some(path) = home {
            assert!(path.ends_with(".conditions"));
        }
        env::remove_var(ENV_HOME);
    }

    #[test]
    fn test_merge_keeps_lower_layer_when_higher_is_default() {
        let lower = Config {
            transition: TransitionConfig {
                policy: TransitionPolicy::Status,
            },
        };
        let merged = lower.clone().merge(Config::default());
        assert_eq!(merged, lower);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = Config {
            transition: TransitionConfig {
                policy: TransitionPolicy::Status,
            },
        };
        let text = toml::to_string_pretty(&config).unwrap();
        assert!(text.contains("policy = \"status\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }
}
