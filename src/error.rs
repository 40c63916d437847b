use meal_builder::MealBuilderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Failed to read catalog {path}: {source}")]
    CatalogIoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Meal builder error: {0}")]
    MealBuilderError(#[from] MealBuilderError),

    #[error("Unknown meal type: {0}")]
    UnknownMealType(String),

    #[error("Food {0} not found in catalog")]
    UnknownFood(i64),

    #[error("Solver did not finish within {0}s")]
    Timeout(u64),

    #[error("Solver task failed: {0}")]
    TaskError(#[from] tokio::task::JoinError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
