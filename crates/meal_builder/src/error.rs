use thiserror::Error;

#[derive(Error, Debug)]
pub enum MealBuilderError {
    #[error("Invalid macro target: {0}")]
    InvalidTarget(String),

    #[error("Invalid portion grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid food {id}: {reason}")]
    InvalidFood { id: i64, reason: String },

    #[error("Unknown food category: {0}")]
    UnknownCategory(String),

    #[error("Catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),
}

pub type MealBuilderResult<T> = Result<T, MealBuilderError>;
