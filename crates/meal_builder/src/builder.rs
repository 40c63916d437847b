use std::collections::HashSet;

use crate::food::{Food, MacroTarget};
use crate::selection::select_combinations;
use crate::solver::{
    fit_portions, ComposedMeal, PortionGrid, ACCEPTANCE_ERROR_PCT, EARLY_EXIT_ERROR_PCT,
};

/// Default number of alternatives offered by [`MealBuilder::build_meal_variants`]
pub const DEFAULT_VARIANT_COUNT: usize = 5;

/// Composes meals from a food catalog to hit a macro target.
///
/// Stateless apart from the portion grid; safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct MealBuilder {
    grid: PortionGrid,
}

impl MealBuilder {
    pub fn new(grid: PortionGrid) -> Self {
        MealBuilder { grid }
    }

    pub fn grid(&self) -> &PortionGrid {
        &self.grid
    }

    /// Best meal across all candidate food groups.
    ///
    /// Keeps the lowest absolute error and stops at the first group whose
    /// new best is below [`EARLY_EXIT_ERROR_PCT`].
    #[tracing::instrument(skip(self, foods), fields(foods = foods.len()))]
    pub fn build_meal(
        &self,
        target: &MacroTarget,
        foods: &[Food],
        context: Option<&str>,
    ) -> Option<ComposedMeal> {
        let groups = select_combinations(foods, target, context);
        if groups.is_empty() {
            tracing::warn!("No compatible food combination found");
            return None;
        }

        let mut best: Option<ComposedMeal> = None;
        for group in &groups {
            let Some(meal) = fit_portions(group, target, &self.grid) else {
                continue;
            };

            let best_error = best.as_ref().map_or(f64::INFINITY, |b| b.error);
            if meal.error < best_error {
                let good_enough = meal.error_pct < EARLY_EXIT_ERROR_PCT;
                best = Some(meal);
                if good_enough {
                    break;
                }
            }
        }

        match &best {
            Some(meal) => tracing::info!(
                groups = groups.len(),
                error_pct = meal.error_pct,
                "Meal built"
            ),
            None => tracing::warn!(
                groups = groups.len(),
                "No food combination fits the target within tolerance"
            ),
        }

        best
    }

    /// Up to `count` meals built from distinct food sets, in candidate order
    #[tracing::instrument(skip(self, foods), fields(foods = foods.len()))]
    pub fn build_meal_variants(
        &self,
        target: &MacroTarget,
        foods: &[Food],
        context: Option<&str>,
        count: usize,
    ) -> Vec<ComposedMeal> {
        let mut meals = Vec::new();
        if count == 0 {
            return meals;
        }

        let groups = select_combinations(foods, target, context);
        let mut used: HashSet<Vec<i64>> = HashSet::new();

        for group in &groups {
            let mut key: Vec<i64> = group.iter().map(|food| food.id).collect();
            key.sort_unstable();
            if used.contains(&key) {
                continue;
            }

            let Some(meal) = fit_portions(group, target, &self.grid) else {
                continue;
            };
            if meal.error_pct < ACCEPTANCE_ERROR_PCT {
                meals.push(meal);
                used.insert(key);
                if meals.len() >= count {
                    break;
                }
            }
        }

        tracing::info!(
            groups = groups.len(),
            variants = meals.len(),
            "Meal variants built"
        );

        meals
    }
}
