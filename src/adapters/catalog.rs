use crate::domain::model::{Priest, Service};
use crate::domain::ports::Catalog;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_CATALOG: &str = include_str!("../../data/catalog.toml");

/// 單項價格上限 (₹1 億)
pub const MAX_PRICE: u64 = 100_000_000;

/// 程式啟動時載入一次，之後不再變動
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticCatalog {
    services: Vec<Service>,
    priests: Vec<Priest>,
}

impl StaticCatalog {
    pub fn new(services: Vec<Service>, priests: Vec<Priest>) -> Self {
        Self { services, priests }
    }

    /// 內建的六項服務與三位祭司
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        tracing::debug!("Loading catalog from {}", path.as_ref().display());
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let catalog: StaticCatalog = toml::from_str(content).map_err(|e| BookingError::ConfigError {
            message: format!("Catalog parsing error: {}", e),
        })?;
        catalog.validate()?;
        tracing::debug!(
            "Catalog loaded: {} services, {} priests",
            catalog.services.len(),
            catalog.priests.len()
        );
        Ok(catalog)
    }
}

impl Catalog for StaticCatalog {
    fn list_services(&self) -> &[Service] {
        &self.services
    }

    fn list_priests(&self) -> &[Priest] {
        &self.priests
    }
}

impl Validate for StaticCatalog {
    fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for service in &self.services {
            validate_non_empty_string("services.id", &service.id)?;
            if !seen.insert(service.id.as_str()) {
                return Err(BookingError::InvalidConfigValueError {
                    field: "services.id".to_string(),
                    value: service.id.clone(),
                    reason: "Duplicate service id".to_string(),
                });
            }
            validate_range("services.price", service.price, 1, MAX_PRICE)?;
        }

        let mut seen = HashSet::new();
        for priest in &self.priests {
            validate_non_empty_string("priests.id", &priest.id)?;
            if !seen.insert(priest.id.as_str()) {
                return Err(BookingError::InvalidConfigValueError {
                    field: "priests.id".to_string(),
                    value: priest.id.clone(),
                    reason: "Duplicate priest id".to_string(),
                });
            }
            validate_range("priests.price", priest.price, 1, MAX_PRICE)?;
            validate_range("priests.rating", priest.rating, 0.0, 5.0)?;
        }

        Ok(())
    }
}
