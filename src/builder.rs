use log::{debug, error, warn};
use serde_json::Value;

use crate::config::ScalerConfig;
use crate::error::AdjustError;
use crate::format::format_time;
use crate::model::{AdjustRequest, AdjustmentResult, Cell, Workbook};
use crate::parser::parse_ingredient_line;
use crate::resolver::RecipeResolver;
use crate::scaling::{ScalingEngine, BASE_SERVINGS};

/// Builder for configuring a [`RecipeScaler`]
#[derive(Debug)]
pub struct RecipeScalerBuilder {
    workbook: Workbook,
    base_servings: u32,
    fraction_precision: Option<f64>,
    default_servings: u32,
}

impl RecipeScalerBuilder {
    /// Set the serving count the dataset quantities are written for
    ///
    /// # Example
    /// ```
    /// use recipe_scaler::{RecipeScaler, Workbook};
    ///
    /// let scaler = RecipeScaler::builder(Workbook::default())
    ///     .base_servings(4)
    ///     .build()
    ///     .unwrap();
    /// ```
    pub fn base_servings(mut self, servings: u32) -> Self {
        self.base_servings = servings;
        self
    }

    /// Set the resolution of displayed fractions (0.125 shows eighths)
    pub fn fraction_precision(mut self, precision: f64) -> Self {
        self.fraction_precision = Some(precision);
        self
    }

    /// Set the servings used when a request omits them
    pub fn default_servings(mut self, servings: u32) -> Self {
        self.default_servings = servings;
        self
    }

    /// Apply every setting from a loaded configuration
    pub fn config(self, config: &ScalerConfig) -> Self {
        self.base_servings(config.base_servings)
            .fraction_precision(config.fraction_precision)
            .default_servings(config.default_servings)
    }

    /// Build the scaler
    ///
    /// # Errors
    /// - `AdjustError::InvalidBaseServings` when the base is below 2
    /// - `AdjustError::InvalidServings` when the default servings are zero
    pub fn build(self) -> Result<RecipeScaler, AdjustError> {
        if self.default_servings == 0 {
            return Err(AdjustError::InvalidServings(
                "default servings must be at least 1".to_string(),
            ));
        }
        let mut engine = ScalingEngine::new(self.base_servings)?;
        if let Some(precision) = self.fraction_precision {
            engine = engine.with_precision(precision);
        }
        Ok(RecipeScaler {
            workbook: self.workbook,
            engine,
            default_servings: self.default_servings,
        })
    }
}

/// Resolves recipes in a loaded workbook and rescales them on request.
///
/// The workbook is never mutated after construction, so a scaler can be
/// shared across threads behind an `Arc`.
#[derive(Debug)]
pub struct RecipeScaler {
    workbook: Workbook,
    engine: ScalingEngine,
    default_servings: u32,
}

impl RecipeScaler {
    /// Creates a new builder around a loaded workbook
    pub fn builder(workbook: Workbook) -> RecipeScalerBuilder {
        RecipeScalerBuilder {
            workbook,
            base_servings: BASE_SERVINGS,
            fraction_precision: None,
            default_servings: BASE_SERVINGS,
        }
    }

    /// Scaler with the default base of 2 servings
    pub fn new(workbook: Workbook) -> Self {
        RecipeScaler {
            workbook,
            engine: ScalingEngine::default(),
            default_servings: BASE_SERVINGS,
        }
    }

    pub fn base_servings(&self) -> u32 {
        self.engine.base_servings()
    }

    /// Rescale `recipe_name` to `servings`.
    ///
    /// # Errors
    /// - `InvalidServings` if `servings` is zero or negative
    /// - `RecipeNotFound` if no sheet holds the recipe
    /// - `SchemaError` if the matched row has no ingredient column
    pub fn adjust(&self, recipe_name: &str, servings: i64) -> Result<AdjustmentResult, AdjustError> {
        let servings = validate_servings(servings)?;
        let recipe_name = recipe_name.trim();

        let resolution = RecipeResolver::new(&self.workbook)
            .resolve(recipe_name)
            .ok_or_else(|| AdjustError::RecipeNotFound(recipe_name.to_string()))?;

        let ingredient_column = resolution.ingredient_column().ok_or_else(|| {
            error!(
                "Sheet {:?} has no ingredient column for language {:?} (recipe {:?})",
                resolution.sheet.name, resolution.language, recipe_name
            );
            AdjustError::SchemaError {
                recipe: recipe_name.to_string(),
                language: resolution.language.to_string(),
            }
        })?;

        let original_time = match resolution.cooking_column() {
            Some(column) => resolution.cell(column).clone(),
            None => Cell::Text("N/A".to_string()),
        };
        let adjusted_time = self.engine.scale_cooking_time(&original_time, servings);

        let raw_ingredients = resolution.cell(ingredient_column).to_string();
        let ingredients: Vec<_> = parse_ingredient_line(&raw_ingredients)
            .iter()
            .map(|entry| self.engine.scale_ingredient(entry, servings))
            .collect();
        debug!(
            "Scaled {} ingredient(s) of {:?} from column {:?} to {} servings",
            ingredients.len(),
            recipe_name,
            ingredient_column,
            servings
        );

        Ok(AdjustmentResult {
            recipe: recipe_name.to_string(),
            base_servings: self.engine.base_servings(),
            new_servings: servings,
            original_time: format_time(&original_time),
            adjusted_time: format_time(&Cell::from(adjusted_time)),
            ingredients,
        })
    }

    /// Handle a transport payload, falling back to the default servings when
    /// the request names none.
    pub fn adjust_request(&self, request: &AdjustRequest) -> Result<AdjustmentResult, AdjustError> {
        let servings = match &request.servings {
            Some(value) => coerce_servings(value)?,
            None => i64::from(self.default_servings),
        };
        self.adjust(&request.recipe_name, servings)
    }
}

fn validate_servings(servings: i64) -> Result<u32, AdjustError> {
    match u32::try_from(servings) {
        Ok(servings) if servings > 0 => Ok(servings),
        _ => {
            warn!("Rejecting servings value {}", servings);
            Err(AdjustError::InvalidServings(format!(
                "servings must be a positive integer, got {}",
                servings
            )))
        }
    }
}

/// Coerce a raw JSON servings value to an integer.
///
/// Integers pass through, floats truncate toward zero and strings must hold
/// a plain integer. Positivity is checked later by [`RecipeScaler::adjust`].
pub fn coerce_servings(value: &Value) -> Result<i64, AdjustError> {
    let invalid = || AdjustError::InvalidServings(format!("not an integer: {}", value));
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            })
            .ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<i64>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
