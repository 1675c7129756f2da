use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{debug, warn};

pub const DEFAULT_PRIMARY_URL: &str = "https://data.fixer.io/api";
pub const DEFAULT_SECONDARY_URL: &str = "https://api.exchangerate.host";

/// Upper bound for the hour-valued settings (one hundred years).
pub const MAX_HOURS: u64 = 24 * 365 * 100;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PrimaryProviderConfig {
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SecondaryProviderConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub primary: PrimaryProviderConfig,
    pub secondary: SecondaryProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            primary: PrimaryProviderConfig {
                base_url: DEFAULT_PRIMARY_URL.to_string(),
                api_key: String::new(),
            },
            secondary: SecondaryProviderConfig {
                base_url: DEFAULT_SECONDARY_URL.to_string(),
            },
        }
    }
}

fn default_hours() -> u64 {
    1
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_supported() -> Vec<String> {
    ["USD", "EUR", "MXN", "COP", "ARS", "BRL", "CLP", "JPY", "GBP", "CAD"]
        .iter()
        .map(|c| c.to_string())
        .collect()
}

fn default_anchors() -> Vec<String> {
    vec!["USD".to_string(), "EUR".to_string()]
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default = "default_hours")]
    pub update_interval_hours: u64,
    #[serde(default = "default_hours")]
    pub cache_ttl_hours: u64,
    #[serde(default)]
    pub spread_percent: f64,
    #[serde(default = "default_supported")]
    pub supported_currencies: Vec<String>,
    #[serde(default = "default_anchors")]
    pub anchor_currencies: Vec<String>,
    #[serde(default = "default_timeout_secs")]
    pub request_timeout_secs: u64,
    pub data_path: Option<String>,
    /// Base64-encoded 32 byte key for the rate cache. Generated on first use when unset.
    pub cache_key: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            providers: ProvidersConfig::default(),
            update_interval_hours: default_hours(),
            cache_ttl_hours: default_hours(),
            spread_percent: 0.0,
            supported_currencies: default_supported(),
            anchor_currencies: default_anchors(),
            request_timeout_secs: default_timeout_secs(),
            data_path: None,
            cache_key: None,
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "xrate", "xrate").context("Could not determine project directories")
}

fn parse_codes(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|c| c.trim().to_uppercase())
        .filter(|c| !c.is_empty())
        .collect()
}

impl AppConfig {
    /// Loads the default config file, or built-in defaults when there is none.
    /// Environment overrides are applied in both cases.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        let mut config = if config_path.exists() {
            Self::parse_file(&config_path)?
        } else {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            Self::default()
        };
        config.apply_overrides(&std::env::vars().collect());
        config.validate()?;
        Ok(config)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        Ok(project_dirs()?.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        Ok(project_dirs()?.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let mut config = Self::parse_file(path.as_ref())?;
        config.apply_overrides(&std::env::vars().collect());
        config.validate()?;
        Ok(config)
    }

    fn parse_file(path: &std::path::Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Applies the recognized `KEY=value` overrides. Values that don't parse are skipped.
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) {
        fn parsed<T: std::str::FromStr>(vars: &HashMap<String, String>, key: &str) -> Option<T> {
            let raw = vars.get(key)?;
            match raw.trim().parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!("Ignoring invalid value for {}: {:?}", key, raw);
                    None
                }
            }
        }

        if let Some(hours) = parsed(vars, "UPDATE_INTERVAL_HOURS") {
            self.update_interval_hours = hours;
        }
        if let Some(hours) = parsed(vars, "CACHE_TTL_HOURS") {
            self.cache_ttl_hours = hours;
        }
        if let Some(spread) = parsed(vars, "SPREAD_PERCENT") {
            self.spread_percent = spread;
        }
        if let Some(url) = vars.get("PRIMARY_API_URL").filter(|v| !v.trim().is_empty()) {
            self.providers.primary.base_url = url.trim().to_string();
        }
        if let Some(key) = vars.get("PRIMARY_API_KEY") {
            self.providers.primary.api_key = key.trim().to_string();
        }
        if let Some(url) = vars.get("SECONDARY_API_URL").filter(|v| !v.trim().is_empty()) {
            self.providers.secondary.base_url = url.trim().to_string();
        }
        if let Some(codes) = vars.get("SUPPORTED_CURRENCIES").map(|v| parse_codes(v)) {
            if !codes.is_empty() {
                self.supported_currencies = codes;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.update_interval_hours < 1 {
            bail!("update_interval_hours must be at least 1");
        }
        if self.update_interval_hours > MAX_HOURS {
            bail!("update_interval_hours must be at most {}", MAX_HOURS);
        }
        if self.cache_ttl_hours > MAX_HOURS {
            bail!("cache_ttl_hours must be at most {}", MAX_HOURS);
        }
        if !self.spread_percent.is_finite() {
            bail!("spread_percent must be a finite number");
        }
        if self.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }
        Ok(())
    }

    // Both accessors clamp to MAX_HOURS so an unvalidated config can't overflow.
    pub fn cache_ttl(&self) -> chrono::Duration {
        chrono::Duration::hours(self.cache_ttl_hours.min(MAX_HOURS) as i64)
    }

    pub fn update_interval(&self) -> Duration {
        Duration::from_secs(self.update_interval_hours.min(MAX_HOURS) * 60 * 60)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
