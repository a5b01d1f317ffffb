use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;

const CONFIG_DIR_ENV: &str = "VERSO_CONFIG_DIR";

/// Top-level configuration structure loaded from layered sources.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub api: ApiSettings,
    #[serde(default)]
    pub runner: RunnerSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Load configuration by layering `.env`, the base file, and `VERSO_*`
    /// environment overrides.
    pub fn load() -> anyhow::Result<Self> {
        // Allow missing `.env` files without failing.
        let _ = dotenvy::dotenv();

        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                // Default to repo root `config` directory.
                std::env::current_dir()
                    .map(|cwd| cwd.join("config"))
                    .expect("unable to resolve current directory")
            });

        let base_path = config_dir.join("base.toml");

        let builder = config::Config::builder()
            .add_source(config::File::from(base_path).required(false))
            .add_source(config::Environment::with_prefix("VERSO").separator("_"));

        let cfg = builder
            .build()
            .with_context(|| "failed to build configuration")?;

        let settings: Settings = cfg
            .try_deserialize()
            .with_context(|| "failed to deserialize configuration")?;

        Ok(settings)
    }
}

/// Target API under test.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSettings {
    #[serde(default = "ApiSettings::default_base_url")]
    pub base_url: String,
    #[serde(default = "ApiSettings::default_user_agent")]
    pub user_agent: String,
}

impl ApiSettings {
    fn default_base_url() -> String {
        "https://fakerestapi.azurewebsites.net".to_string()
    }

    fn default_user_agent() -> String {
        "verso/0.1".to_string()
    }
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            user_agent: Self::default_user_agent(),
        }
    }
}

/// Scenario execution parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct RunnerSettings {
    /// Number of scenarios allowed in flight at once.
    #[serde(default = "RunnerSettings::default_threads")]
    pub threads: usize,
    /// Base seed for fixture generation. Absent means per-run entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl RunnerSettings {
    fn default_threads() -> usize {
        3
    }
}

impl Default for RunnerSettings {
    fn default() -> Self {
        Self {
            threads: Self::default_threads(),
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "ReportSettings::default_dir")]
    pub dir: String,
}

impl ReportSettings {
    fn default_dir() -> String {
        "reports".to_string()
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            dir: Self::default_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TelemetrySettings {
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_base_url_points_at_fakerestapi() {
        let settings = Settings::default();
        assert_eq!(
            settings.api.base_url,
            "https://fakerestapi.azurewebsites.net"
        );
    }

    #[test]
    fn default_thread_count_is_three() {
        let settings = Settings::default();
        assert_eq!(settings.runner.threads, 3);
        assert!(settings.runner.seed.is_none());
    }

    #[test]
    fn default_log_format_is_pretty() {
        let settings = Settings::default();
        assert_eq!(settings.telemetry.log_format, LogFormat::Pretty);
    }
}
