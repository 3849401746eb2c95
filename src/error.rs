use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while resolving and adjusting a recipe
#[derive(Error, Debug)]
pub enum AdjustError {
    /// No sheet or name column holds the requested recipe
    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    /// The matched row has no ingredient column for its language or English
    #[error("Ingredient column not found for recipe '{recipe}' (language '{language}')")]
    SchemaError { recipe: String, language: String },

    /// Requested servings are missing, not an integer, or not positive
    #[error("Invalid servings: {0}")]
    InvalidServings(String),

    /// Base servings below 2 make logarithmic scaling undefined
    #[error("Base servings must be at least 2, got {0}")]
    InvalidBaseServings(u32),

    /// The workbook export is not shaped as sheets of row objects
    #[error("Invalid dataset: {0}")]
    DatasetError(String),

    /// Failed to read the dataset file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse or serialize JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

/// Body returned to the transport layer alongside a failure status
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl AdjustError {
    /// HTTP-style status the transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            AdjustError::RecipeNotFound(_) => 404,
            AdjustError::InvalidServings(_) => 400,
            _ => 500,
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        let error = match self {
            AdjustError::RecipeNotFound(_) => "Recipe not found".to_string(),
            AdjustError::SchemaError { .. } => "Ingredient column not found".to_string(),
            other => other.to_string(),
        };
        ErrorBody { error }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AdjustError::RecipeNotFound("pongal".to_string()).status_code(),
            404
        );
        assert_eq!(
            AdjustError::SchemaError {
                recipe: "pongal".to_string(),
                language: "ta".to_string(),
            }
            .status_code(),
            500
        );
        assert_eq!(
            AdjustError::InvalidServings("0".to_string()).status_code(),
            400
        );
        assert_eq!(AdjustError::InvalidBaseServings(1).status_code(), 500);
    }

    #[test]
    fn test_error_bodies_match_transport_messages() {
        let body = AdjustError::RecipeNotFound("x".to_string()).to_body();
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"error":"Recipe not found"}"#);

        let body = AdjustError::SchemaError {
            recipe: "x".to_string(),
            language: "en".to_string(),
        }
        .to_body();
        assert_eq!(body.error, "Ingredient column not found");
    }
}
