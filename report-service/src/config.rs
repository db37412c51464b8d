use serde::Deserialize;
use std::{fs, path::PathBuf};

pub const CONFIG_ENV_VAR: &str = "ENERGY_REPORT_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "energy-report.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub path: PathBuf,
    /// Year covered by the month and full-year reports.
    pub year: i32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("2025.csv"),
            year: 2025,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("report.txt"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directives, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "report_service=warn".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data: DataConfig,
    pub report: ReportConfig,
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads from `$ENERGY_REPORT_CONFIG`, or `energy-report.toml` when unset.
    ///
    /// A missing default file yields the built-in defaults; a missing file that
    /// was named explicitly is an error.
    pub fn load() -> anyhow::Result<Self> {
        use std::env;

        match env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::from_file(&path),
            Err(_) if !std::path::Path::new(DEFAULT_CONFIG_PATH).exists() => Ok(Self::default()),
            Err(_) => Self::from_file(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config '{path}': {e}"))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let cfg: AppConfig = toml::from_str(contents)?;
        Ok(cfg)
    }
}
