//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/kardex/config.toml)
//! 3. Environment variables (KARDEX_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::access::UserEntry;

/// Environment variable prefix
const ENV_PREFIX: &str = "KARDEX";

/// Default low-stock threshold (items strictly below are reported)
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory for data storage (the inventory file)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Threshold for the low-stock report
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: i64,

    /// Static user table (username -> password + role); empty means
    /// the store is open to everyone
    #[serde(default)]
    pub users: BTreeMap<String, UserEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            users: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (KARDEX_DATA_DIR, KARDEX_LOW_STOCK_THRESHOLD)
    /// 2. Config file (~/.config/kardex/config.toml or KARDEX_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // KARDEX_DATA_DIR
        if let Ok(val) = std::env::var(format!("{}_DATA_DIR", ENV_PREFIX)) {
            self.data_dir = PathBuf::from(val);
        }

        // KARDEX_LOW_STOCK_THRESHOLD
        if let Ok(val) = std::env::var(format!("{}_LOW_STOCK_THRESHOLD", ENV_PREFIX)) {
            if let Ok(threshold) = val.parse() {
                self.low_stock_threshold = threshold;
            }
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with the KARDEX_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("kardex")
            .join("config.toml")
    }

    /// Get the path to the inventory file
    pub fn inventory_path(&self) -> PathBuf {
        self.data_dir.join("inventory.txt")
    }
}

/// Get the default data directory
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("kardex")
}

fn default_low_stock_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::access::Role;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &["KARDEX_DATA_DIR", "KARDEX_LOW_STOCK_THRESHOLD"];

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.low_stock_threshold, 10);
        assert!(config.users.is_empty());
        assert!(config.data_dir.ends_with("kardex"));
    }

    #[test]
    fn test_inventory_path() {
        let config = Config::default();
        assert!(config.inventory_path().ends_with("inventory.txt"));
    }

    #[test]
    fn test_env_override_data_dir() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("KARDEX_DATA_DIR", "/tmp/kardex-test");
        config.apply_env_overrides();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/kardex-test"));
    }

    #[test]
    fn test_env_override_threshold() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("KARDEX_LOW_STOCK_THRESHOLD", "5");
        config.apply_env_overrides();
        assert_eq!(config.low_stock_threshold, 5);

        // Garbage values leave the setting unchanged
        env::set_var("KARDEX_LOW_STOCK_THRESHOLD", "lots");
        config.apply_env_overrides();
        assert_eq!(config.low_stock_threshold, 5);
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            data_dir = "/custom/data"
            low_stock_threshold = 6

            [users.admin]
            password = "admin123"
            role = "admin"

            [users.staff]
            password = "staff123"
            role = "staff"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/custom/data"));
        assert_eq!(config.low_stock_threshold, 6);
        assert_eq!(config.users.len(), 2);
        assert_eq!(config.users["admin"].role, Role::Admin);
        assert_eq!(config.users["staff"].role, Role::Staff);
    }

    #[test]
    fn test_serialization_round_trip() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config {
            data_dir: PathBuf::from("/data/kardex"),
            low_stock_threshold: 7,
            users: BTreeMap::new(),
        };
        config.users.insert(
            "admin".to_string(),
            UserEntry {
                password: "secret".to_string(),
                role: Role::Admin,
            },
        );

        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("data_dir"));
        assert!(toml_str.contains("low_stock_threshold"));
        assert!(toml_str.contains("[users.admin]"));

        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.data_dir, config.data_dir);
        assert_eq!(parsed.low_stock_threshold, 7);
        assert_eq!(parsed.users["admin"].role, Role::Admin);
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        // Should return defaults when file doesn't exist
        assert_eq!(config.low_stock_threshold, DEFAULT_LOW_STOCK_THRESHOLD);
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let config = Config {
            data_dir: PathBuf::from("/data/kardex"),
            low_stock_threshold: 3,
            users: BTreeMap::new(),
        };
        config.save_to_path(&path).unwrap();

        let loaded = Config::load_from_path(&path).unwrap();
        assert_eq!(loaded.low_stock_threshold, 3);
        assert_eq!(loaded.data_dir, PathBuf::from("/data/kardex"));
    }
}
