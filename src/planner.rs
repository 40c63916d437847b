//! Async boundary around the meal builder.
//!
//! Solver calls are CPU bound and can take a long time on big catalogs, so
//! they run on the blocking pool and are cut off after the configured
//! timeout. A timed out call keeps its blocking thread until the search
//! finishes; only the result is discarded.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use meal_builder::{
    fit_portions, parse_catalog, ComposedMeal, Food, MacroTarget, MealBuilder, PortionGrid,
};

use crate::config::SolverConfig;
use crate::error::AppError;

/// Read and validate a JSON food catalog
#[tracing::instrument]
pub async fn load_catalog(path: &Path) -> Result<Vec<Food>, AppError> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| AppError::CatalogIoError {
            path: path.display().to_string(),
            source,
        })?;

    let foods = parse_catalog(&json)?;
    tracing::info!(foods = foods.len(), "Catalog loaded");

    Ok(foods)
}

#[derive(Clone)]
pub struct Planner {
    foods: Arc<Vec<Food>>,
    builder: MealBuilder,
    timeout: Duration,
}

impl Planner {
    pub fn new(foods: Vec<Food>, grid: PortionGrid, timeout: Duration) -> Self {
        Self {
            foods: Arc::new(foods),
            builder: MealBuilder::new(grid),
            timeout,
        }
    }

    pub fn from_config(foods: Vec<Food>, solver: &SolverConfig) -> Result<Self, AppError> {
        Ok(Self::new(foods, solver.grid()?, solver.timeout()))
    }

    pub fn foods(&self) -> &[Food] {
        &self.foods
    }

    pub fn food(&self, id: i64) -> Result<&Food, AppError> {
        self.foods
            .iter()
            .find(|food| food.id == id)
            .ok_or(AppError::UnknownFood(id))
    }

    pub async fn compose(
        &self,
        target: MacroTarget,
        context: Option<String>,
    ) -> Result<Option<ComposedMeal>, AppError> {
        self.run_blocking(move |builder, foods| {
            builder.build_meal(&target, foods, context.as_deref())
        })
        .await
    }

    pub async fn variants(
        &self,
        target: MacroTarget,
        context: Option<String>,
        count: usize,
    ) -> Result<Vec<ComposedMeal>, AppError> {
        self.run_blocking(move |builder, foods| {
            builder.build_meal_variants(&target, foods, context.as_deref(), count)
        })
        .await
    }

    /// Portions for an explicit food list, in the given order
    pub async fn fit(
        &self,
        food_ids: &[i64],
        target: MacroTarget,
    ) -> Result<Option<ComposedMeal>, AppError> {
        if food_ids.is_empty() {
            return Err(AppError::ValidationError(
                "at least one food is required".to_string(),
            ));
        }
        let selected: Vec<Food> = food_ids
            .iter()
            .map(|&id| self.food(id).cloned())
            .collect::<Result<_, _>>()?;

        self.run_blocking(move |builder, _| {
            let group: Vec<&Food> = selected.iter().collect();
            fit_portions(&group, &target, builder.grid())
        })
        .await
    }

    async fn run_blocking<T, F>(&self, job: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(&MealBuilder, &[Food]) -> T + Send + 'static,
    {
        let foods = Arc::clone(&self.foods);
        let builder = self.builder;
        let task = tokio::task::spawn_blocking(move || job(&builder, &foods));

        match tokio::time::timeout(self.timeout, task).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                tracing::warn!(timeout_secs = self.timeout.as_secs(), "Solver timed out");
                Err(AppError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}
