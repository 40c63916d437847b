//! Meal composition core: macro-target portion solving and food search.
//!
//! Everything here is pure and synchronous. [`MealBuilder`] and
//! [`solver::fit_portions`] can run for a long time on large catalogs, so
//! interactive callers should move them off their main thread and bound
//! them with a timeout.

pub mod builder;
pub mod catalog;
pub mod compatibility;
pub mod error;
pub mod food;
pub mod search;
pub mod selection;
pub mod solver;

pub use builder::{MealBuilder, DEFAULT_VARIANT_COUNT};
pub use catalog::{parse_catalog, FoodRecord};
pub use compatibility::{compatible, group_compatible};
pub use error::{MealBuilderError, MealBuilderResult};
pub use food::{Category, Food, MacroBucket, MacroTarget, MacroTotals, MealItem};
pub use search::{search, FoodRanker, ScoredFood, SearchRequest};
pub use selection::select_combinations;
pub use solver::{fit_portions, ComposedMeal, PortionGrid, PortionLine};
