use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub parsing: ParsingConfig,

    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub database_path: String,

    pub log_level: String,

    /// Number of tokio worker threads (default: 2)
    /// Set to 0 to use the number of CPU cores
    pub worker_threads: usize,

    /// Maximum database connections (default: 5)
    pub max_db_connections: u32,

    /// Minimum database connections (default: 1)
    pub min_db_connections: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            database_path: "sqlite:data/reparr.db".to_string(),
            log_level: "info".to_string(),
            worker_threads: 2,
            max_db_connections: 5,
            min_db_connections: 1,
        }
    }
}

/// One configured release version and the filename substrings that identify it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRuleConfig {
    pub name: String,
    pub terms: Vec<String>,
}

/// Settings feeding the version resolver.
///
/// `version_order` names the evaluation order; versions it does not mention
/// are evaluated afterwards in file order. `default_version` is what a
/// filename resolves to when no rule matches it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsingConfig {
    pub default_version: String,

    pub version_order: Vec<String>,

    pub versions: Vec<VersionRuleConfig>,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            default_version: "1080p".to_string(),
            version_order: vec![
                "2160p".to_string(),
                "1080p".to_string(),
                "720p".to_string(),
                "SD".to_string(),
            ],
            versions: vec![
                VersionRuleConfig {
                    name: "2160p".to_string(),
                    terms: vec!["2160p".to_string(), "4K".to_string(), "UHD".to_string()],
                },
                VersionRuleConfig {
                    name: "1080p".to_string(),
                    terms: vec!["1080p".to_string()],
                },
                VersionRuleConfig {
                    name: "720p".to_string(),
                    terms: vec!["720p".to_string()],
                },
                VersionRuleConfig {
                    name: "SD".to_string(),
                    terms: vec![
                        "480p".to_string(),
                        "576p".to_string(),
                        "DVDRip".to_string(),
                    ],
                },
            ],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub enabled: bool,

    pub check_interval_minutes: u32,

    pub cron_expression: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            check_interval_minutes: 60,
            cron_expression: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            parsing: ParsingConfig::default(),
            scheduler: SchedulerConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("reparr").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".reparr").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }

    pub fn create_default_if_missing() -> Result<bool> {
        let path = Self::default_config_path();
        if path.exists() {
            Ok(false)
        } else {
            let config = Self::default();
            config.save_to_path(&path)?;
            info!("Created default config file: {}", path.display());
            Ok(true)
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.parsing.default_version.trim().is_empty() {
            anyhow::bail!("default_version cannot be empty");
        }

        for (i, version) in self.parsing.versions.iter().enumerate() {
            if version.name.trim().is_empty() {
                anyhow::bail!("version at index {i} has an empty name");
            }
            if self.parsing.versions[..i]
                .iter()
                .any(|other| other.name == version.name)
            {
                anyhow::bail!("duplicate version name '{}'", version.name);
            }
        }

        if self.scheduler.enabled
            && self.scheduler.check_interval_minutes == 0
            && self.scheduler.cron_expression.is_none()
        {
            anyhow::bail!("Scheduler interval must be > 0 or cron expression must be set");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.parsing.default_version, "1080p");
        assert_eq!(config.parsing.versions.len(), 4);
        assert_eq!(config.scheduler.check_interval_minutes, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[general]"));
        assert!(toml_str.contains("[parsing]"));
        assert!(toml_str.contains("[[parsing.versions]]"));
        assert!(toml_str.contains("[scheduler]"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [general]
            log_level = "debug"

            [parsing]
            default_version = "SD"
            version_order = ["4K", "1080p"]

            [[parsing.versions]]
            name = "4K"
            terms = ["2160p", "4K"]

            [[parsing.versions]]
            name = "1080p"
            terms = ["1080p"]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.log_level, "debug");
        assert_eq!(config.parsing.default_version, "SD");
        assert_eq!(config.parsing.version_order, vec!["4K", "1080p"]);
        assert_eq!(config.parsing.versions[0].terms, vec!["2160p", "4K"]);

        assert_eq!(config.general.database_path, "sqlite:data/reparr.db");
    }

    #[test]
    fn test_validate_rejects_empty_default() {
        let mut config = Config::default();
        config.parsing.default_version = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_names() {
        let mut config = Config::default();
        config.parsing.versions.push(VersionRuleConfig {
            name: "1080p".to_string(),
            terms: vec!["FHD".to_string()],
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_version_list_is_legal() {
        let mut config = Config::default();
        config.parsing.versions.clear();
        config.parsing.version_order.clear();
        assert!(config.validate().is_ok());
    }
}
