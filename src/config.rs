use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for the retrofit tracker
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RetrofitConfig {
    /// Workspace snapshot settings
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    /// Observability settings
    #[serde(default)]
    pub observability: ObservabilityConfig,
    /// Administrative settings
    #[serde(default)]
    pub admin: AdminConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    /// Path to the JSON snapshot holding all records
    pub data_file: String,
    /// Seed the workspace with sample records on `init`
    pub seed_on_init: bool,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            data_file: ".retrofit-tracker/workspace.json".to_string(),
            seed_on_init: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines instead of human-readable output
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Actor recorded on transitions when --actor is not given
    pub default_actor: Option<String>,
}

impl RetrofitConfig {
    /// Load configuration from multiple sources with precedence:
    /// 1. Default values
    /// 2. Configuration file (retrofit-tracker.toml)
    /// 3. Environment variables (RETROFIT_TRACKER_SECTION__KEY, e.g.
    ///    RETROFIT_TRACKER_OBSERVABILITY__LOG_LEVEL)
    pub fn load() -> Result<Self> {
        let mut builder = Config::builder();

        if Path::new("retrofit-tracker.toml").exists() {
            builder = builder.add_source(File::with_name("retrofit-tracker"));
        }

        // Keys like log_level contain underscores themselves, so the
        // section separator must be the double underscore
        builder = builder.add_source(
            Environment::with_prefix("RETROFIT_TRACKER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_content = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_content)?;
        Ok(())
    }

    /// Load .env file if it exists
    pub fn load_env_file() -> Result<()> {
        if Path::new(".env").exists() {
            dotenvy::dotenv()?;
            tracing::info!("Loaded environment variables from .env file");
        }
        Ok(())
    }
}

/// Global configuration instance
static CONFIG: std::sync::LazyLock<Result<RetrofitConfig, anyhow::Error>> =
    std::sync::LazyLock::new(|| {
        let _ = RetrofitConfig::load_env_file();
        RetrofitConfig::load()
    });

/// Get the global configuration
pub fn config() -> Result<&'static RetrofitConfig> {
    CONFIG
        .as_ref()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = RetrofitConfig::default();
        assert_eq!(cfg.workspace.data_file, ".retrofit-tracker/workspace.json");
        assert!(cfg.workspace.seed_on_init);
        assert_eq!(cfg.observability.log_level, "info");
        assert!(cfg.admin.default_actor.is_none());
    }

    #[test]
    fn environment_overrides_apply() {
        std::env::set_var("RETROFIT_TRACKER_OBSERVABILITY__LOG_LEVEL", "debug");
        std::env::set_var("RETROFIT_TRACKER_WORKSPACE__SEED_ON_INIT", "false");

        let cfg = RetrofitConfig::load().unwrap();

        std::env::remove_var("RETROFIT_TRACKER_OBSERVABILITY__LOG_LEVEL");
        std::env::remove_var("RETROFIT_TRACKER_WORKSPACE__SEED_ON_INIT");

        assert_eq!(cfg.observability.log_level, "debug");
        assert!(!cfg.workspace.seed_on_init);
        // Untouched settings keep their defaults
        assert_eq!(cfg.workspace.data_file, ".retrofit-tracker/workspace.json");
    }

    #[test]
    fn round_trips_through_toml() {
        let cfg = RetrofitConfig::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back: RetrofitConfig = toml::from_str(&text).unwrap();
        assert_eq!(back.workspace.data_file, cfg.workspace.data_file);
        assert_eq!(back.observability.json_logs, cfg.observability.json_logs);
    }
}
