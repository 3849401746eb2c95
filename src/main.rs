use log::{debug, error};
use std::env;
use std::process::ExitCode;

use recipe_scaler::{load_scaler, AdjustError, ScalerConfig};

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    env_logger::init();

    // Get the recipe name and optional servings from command-line arguments
    let args: Vec<String> = env::args().collect();
    let recipe_name = args
        .get(1)
        .ok_or("Usage: recipe-scaler <recipe name> [servings]")?;

    let config = ScalerConfig::load()?;
    debug!("{:#?}", config);

    let servings = match args.get(2) {
        Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
            AdjustError::InvalidServings(format!("not an integer: {}", raw))
        }),
        None => Ok(i64::from(config.default_servings)),
    };

    let scaler = load_scaler(&config).await?;
    match servings.and_then(|servings| scaler.adjust(recipe_name, servings)) {
        Ok(result) => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("{}", serde_json::to_string_pretty(&e.to_body())?);
            Ok(ExitCode::FAILURE)
        }
    }
}
