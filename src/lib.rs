pub mod cli;
pub mod config;
pub mod debounce;
pub mod error;
pub mod observability;
pub mod planner;

pub use config::Config;
pub use error::AppError;
pub use planner::{load_catalog, Planner};
