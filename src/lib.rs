pub mod builder;
pub mod config;
pub mod dataset;
pub mod error;
pub mod format;
pub mod model;
pub mod parser;
pub mod resolver;
pub mod scaling;

// Re-export types for easier access
pub use builder::{coerce_servings, RecipeScaler, RecipeScalerBuilder};
pub use config::ScalerConfig;
pub use dataset::{load_workbook, parse_workbook};
pub use error::{AdjustError, ErrorBody};
pub use format::{format_time, to_mixed_fraction, to_mixed_fraction_with_precision};
pub use model::{
    AdjustRequest, AdjustmentResult, Cell, IngredientEntry, Row, Sheet, Workbook,
};
pub use parser::parse_ingredient_line;
pub use resolver::{LanguageBinding, RecipeResolver, Resolution, LANGUAGE_BINDINGS};
pub use scaling::{classify, ScaledTime, ScalingClass, ScalingEngine, BASE_SERVINGS};

/// Load the workbook named by `config` and build a scaler around it.
///
/// # Example
/// ```no_run
/// # use recipe_scaler::{load_scaler, ScalerConfig};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let scaler = load_scaler(&ScalerConfig::load()?).await?;
/// let result = scaler.adjust("Pongal", 4)?;
/// println!("{}", result.adjusted_time);
/// # Ok(())
/// # }
/// ```
pub async fn load_scaler(config: &ScalerConfig) -> Result<RecipeScaler, AdjustError> {
    let workbook = load_workbook(&config.dataset_path).await?;
    RecipeScaler::builder(workbook).config(config).build()
}

/// One-shot adjustment against an in-memory workbook with default settings
pub fn adjust_recipe(
    workbook: Workbook,
    recipe_name: &str,
    servings: i64,
) -> Result<AdjustmentResult, AdjustError> {
    RecipeScaler::new(workbook).adjust(recipe_name, servings)
}
