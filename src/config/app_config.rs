use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{validate_file_extension, validate_path, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    pub catalog: Option<CatalogConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 模擬的網路延遲（毫秒）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub fetch_delay_ms: u64,
    pub payment_delay_ms: u64,
    pub confirmation_delay_ms: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 300,
            payment_delay_ms: 2000,
            confirmation_delay_ms: 2000,
        }
    }
}

impl SimulationConfig {
    pub fn fetch_delay(&self) -> Duration {
        Duration::from_millis(self.fetch_delay_ms)
    }

    pub fn payment_delay(&self) -> Duration {
        Duration::from_millis(self.payment_delay_ms)
    }

    pub fn confirmation_delay(&self) -> Duration {
        Duration::from_millis(self.confirmation_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub verbose: bool,
    pub json: bool,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BookingError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_PATH})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BookingError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_ref().map(|c| c.path.as_str())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_range(
            "simulation.fetch_delay_ms",
            self.simulation.fetch_delay_ms,
            0,
            MAX_DELAY_MS,
        )?;
        validate_range(
            "simulation.payment_delay_ms",
            self.simulation.payment_delay_ms,
            0,
            MAX_DELAY_MS,
        )?;
        validate_range(
            "simulation.confirmation_delay_ms",
            self.simulation.confirmation_delay_ms,
            0,
            MAX_DELAY_MS,
        )?;

        if let Some(path) = self.catalog_path() {
            validate_path("catalog.path", path)?;
            validate_file_extension("catalog.path", path, &["toml"])?;
        }

        Ok(())
    }
}
