use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::AdjustError;

/// Runtime settings for the recipe scaler
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScalerConfig {
    /// Path to the JSON workbook export
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,
    /// Serving count the dataset quantities are written for
    #[serde(default = "default_base_servings")]
    pub base_servings: u32,
    /// Resolution of displayed fractions (0.125 shows eighths)
    #[serde(default = "default_fraction_precision")]
    pub fraction_precision: f64,
    /// Servings used when a request does not name any
    #[serde(default = "default_servings")]
    pub default_servings: u32,
}

impl Default for ScalerConfig {
    fn default() -> Self {
        Self {
            dataset_path: default_dataset_path(),
            base_servings: default_base_servings(),
            fraction_precision: default_fraction_precision(),
            default_servings: default_servings(),
        }
    }
}

// Default value functions
fn default_dataset_path() -> String {
    "recipe_data.json".to_string()
}

fn default_base_servings() -> u32 {
    crate::scaling::BASE_SERVINGS
}

fn default_fraction_precision() -> f64 {
    crate::format::DEFAULT_PRECISION
}

fn default_servings() -> u32 {
    crate::scaling::BASE_SERVINGS
}

impl ScalerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_SCALER__ prefix
    /// 2. recipe_scaler.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_SCALER__DATASET_PATH
    pub fn load() -> Result<Self, AdjustError> {
        let config = load_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that would make scaling or formatting undefined
    pub fn validate(&self) -> Result<(), AdjustError> {
        if self.base_servings < 2 {
            return Err(AdjustError::InvalidBaseServings(self.base_servings));
        }
        if !self.fraction_precision.is_finite() || self.fraction_precision <= 0.0 {
            return Err(AdjustError::ConfigError(ConfigError::Message(format!(
                "fraction_precision must be a positive number, got {}",
                self.fraction_precision
            ))));
        }
        if self.default_servings == 0 {
            return Err(AdjustError::ConfigError(ConfigError::Message(
                "default_servings must be at least 1".to_string(),
            )));
        }
        Ok(())
    }
}

/// Load configuration without validating it
pub fn load_config() -> Result<ScalerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe_scaler").required(false))
        // Use double underscore for nested: RECIPE_SCALER__DATASET_PATH
        .add_source(
            Environment::with_prefix("RECIPE_SCALER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
