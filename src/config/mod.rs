use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{
    currency::CurrencyCode,
    domain::{
        odds::{OddsBand, DEFAULT_ODDS_BANDS},
        performance::MonthlyLayout,
        plan::{default_plans, Catalog, PlanTier},
        promotion::{Promotion, PromotionTable},
    },
    errors::{ConfigError, ResultsError},
    utils::paths::{app_data_dir, config_file_in, ensure_dir, write_atomic},
};

fn default_bands() -> Vec<OddsBand> {
    DEFAULT_ODDS_BANDS.clone()
}

fn default_systems() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("prod_bsp_lays".to_string(), "BSP Lays".to_string()),
        ("prod_value_backs".to_string(), "Value Backs".to_string()),
        ("prod_each_way".to_string(), "Each-Way Edge".to_string()),
    ])
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub currency: CurrencyCode,
    #[serde(default = "default_bands")]
    pub odds_bands: Vec<OddsBand>,
    #[serde(default)]
    pub monthly_layout: MonthlyLayout,
    #[serde(default = "default_plans")]
    pub plans: Vec<PlanTier>,
    #[serde(default = "default_systems")]
    pub systems: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub promotions: Vec<Promotion>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            odds_bands: default_bands(),
            monthly_layout: MonthlyLayout::default(),
            plans: default_plans(),
            systems: default_systems(),
            promotions: Vec::new(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for band in &self.odds_bands {
            band.validate()?;
        }
        self.catalog().map(|_| ())
    }

    /// Builds the immutable catalog, validating plans and promotions.
    pub fn catalog(&self) -> Result<Catalog, ConfigError> {
        let promotions = PromotionTable::new(self.promotions.clone())?;
        Catalog::new(self.plans.clone(), self.systems.clone(), promotions)
    }
}

pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new() -> Result<Self, ResultsError> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self, ResultsError> {
        ensure_dir(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    /// Reads the configuration, falling back to defaults when no file exists.
    /// Invalid promotions or bands are rejected here rather than at quote time.
    pub fn load(&self) -> Result<Config, ResultsError> {
        let config = if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            serde_json::from_str::<Config>(&data)?
        } else {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<(), ResultsError> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        write_atomic(&self.path, &json)?;
        tracing::info!(path = %self.path.display(), "configuration saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
