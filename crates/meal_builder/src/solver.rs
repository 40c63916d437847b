//! Grid search for per-food portions that approximate a macro target.
//!
//! Every food gets a quantity from the same gram grid and the search walks
//! the Cartesian product depth-first. A leaf is accepted when its mean
//! relative error is below [`ACCEPTANCE_ERROR_PCT`]; among accepted leaves
//! the lowest absolute error wins, earliest first on ties. As soon as the
//! best accepted leaf is below [`EARLY_EXIT_ERROR_PCT`] the whole search
//! stops, so the result is good enough rather than optimal.

use serde::{Deserialize, Serialize};

use crate::error::{MealBuilderError, MealBuilderResult};
use crate::food::{Food, MacroTarget, MacroTotals};

/// A leaf is a valid meal only below this mean percentage error
pub const ACCEPTANCE_ERROR_PCT: f64 = 10.0;

/// Search stops once the best meal is below this mean percentage error
pub const EARLY_EXIT_ERROR_PCT: f64 = 3.0;

pub const DEFAULT_MIN_GRAMS: u32 = 50;
pub const DEFAULT_MAX_GRAMS: u32 = 500;
pub const DEFAULT_STEP_GRAMS: u32 = 10;

/// Inclusive range of gram quantities tried for each food
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortionGrid {
    pub min_grams: u32,
    pub max_grams: u32,
    pub step_grams: u32,
}

impl Default for PortionGrid {
    fn default() -> Self {
        PortionGrid {
            min_grams: DEFAULT_MIN_GRAMS,
            max_grams: DEFAULT_MAX_GRAMS,
            step_grams: DEFAULT_STEP_GRAMS,
        }
    }
}

impl PortionGrid {
    pub fn new(min_grams: u32, max_grams: u32, step_grams: u32) -> MealBuilderResult<Self> {
        if step_grams == 0 {
            return Err(MealBuilderError::InvalidGrid(
                "step must be greater than 0".to_string(),
            ));
        }
        if min_grams > max_grams {
            return Err(MealBuilderError::InvalidGrid(format!(
                "min {min_grams}g is above max {max_grams}g"
            )));
        }
        Ok(PortionGrid {
            min_grams,
            max_grams,
            step_grams,
        })
    }

    pub fn grams(&self) -> impl Iterator<Item = u32> + use<> {
        (self.min_grams..=self.max_grams).step_by(self.step_grams as usize)
    }

    pub fn contains(&self, grams: u32) -> bool {
        (self.min_grams..=self.max_grams).contains(&grams)
            && (grams - self.min_grams) % self.step_grams == 0
    }
}

/// One food of a composed meal with its rounded macro contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortionLine {
    pub food: Food,
    pub grams: u32,
    pub kcal: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

/// Foods with chosen portions, their totals and distance to the target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedMeal {
    pub lines: Vec<PortionLine>,
    pub totals: MacroTotals,
    /// Sum of absolute protein, carb and fat deviations in grams
    pub error: f64,
    /// Mean relative deviation of protein, carb and fat, × 100
    pub error_pct: f64,
}

impl ComposedMeal {
    /// Sorted food ids; two meals with the same key use the same foods
    pub fn food_key(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self.lines.iter().map(|line| line.food.id).collect();
        ids.sort_unstable();
        ids
    }
}

/// Rounded contribution of `grams` of `food`, as used for meal totals
pub fn portion_contribution(food: &Food, grams: u32) -> MacroTotals {
    let factor = f64::from(grams) / food.portion_g;
    MacroTotals {
        kcal: (food.kcal * factor).round(),
        protein: (food.protein * factor).round(),
        carb: (food.carb * factor).round(),
        fat: (food.fat * factor).round(),
    }
}

pub fn absolute_error(target: &MacroTarget, totals: &MacroTotals) -> f64 {
    (target.protein - totals.protein).abs()
        + (target.carb - totals.carb).abs()
        + (target.fat - totals.fat).abs()
}

/// Mean relative error in percent; a zero target component divides by 1
pub fn percentage_error(target: &MacroTarget, totals: &MacroTotals) -> f64 {
    let relative = |wanted: f64, actual: f64| {
        let base = if wanted == 0.0 { 1.0 } else { wanted };
        (wanted - actual).abs() / base
    };
    let sum = relative(target.protein, totals.protein)
        + relative(target.carb, totals.carb)
        + relative(target.fat, totals.fat);
    (sum / 3.0) * 100.0
}

/// Find grams for each food so the meal lands within tolerance of `target`.
///
/// Returns `None` when no grid point is under [`ACCEPTANCE_ERROR_PCT`].
pub fn fit_portions(
    foods: &[&Food],
    target: &MacroTarget,
    grid: &PortionGrid,
) -> Option<ComposedMeal> {
    let grams: Vec<u32> = grid.grams().collect();
    let contributions: Vec<Vec<MacroTotals>> = foods
        .iter()
        .map(|food| grams.iter().map(|&g| portion_contribution(food, g)).collect())
        .collect();

    let mut search = PortionSearch {
        target,
        contributions: &contributions,
        choice: Vec::with_capacity(foods.len()),
        best: None,
        leaves: 0,
    };
    search.descend(MacroTotals::default());

    tracing::trace!(
        foods = foods.len(),
        grid = grams.len(),
        leaves = search.leaves,
        found = search.best.is_some(),
        "Portion search finished"
    );

    let best = search.best?;
    let lines = foods
        .iter()
        .zip(&best.choice)
        .enumerate()
        .map(|(i, (food, &step))| {
            let contribution = contributions[i][step];
            PortionLine {
                food: (*food).clone(),
                grams: grams[step],
                kcal: contribution.kcal,
                protein: contribution.protein,
                carb: contribution.carb,
                fat: contribution.fat,
            }
        })
        .collect();

    Some(ComposedMeal {
        lines,
        totals: best.totals,
        error: best.error,
        error_pct: best.error_pct,
    })
}

struct BestLeaf {
    choice: Vec<usize>,
    totals: MacroTotals,
    error: f64,
    error_pct: f64,
}

struct PortionSearch<'a> {
    target: &'a MacroTarget,
    /// contributions[food][grid step]
    contributions: &'a [Vec<MacroTotals>],
    choice: Vec<usize>,
    best: Option<BestLeaf>,
    leaves: u64,
}

impl PortionSearch<'_> {
    fn descend(&mut self, partial: MacroTotals) {
        let depth = self.choice.len();
        if depth == self.contributions.len() {
            self.evaluate(partial);
            return;
        }

        for step in 0..self.contributions[depth].len() {
            self.choice.push(step);
            self.descend(partial + self.contributions[depth][step]);
            self.choice.pop();

            if self.good_enough() {
                return;
            }
        }
    }

    fn evaluate(&mut self, totals: MacroTotals) {
        self.leaves += 1;
        let error = absolute_error(self.target, &totals);
        let error_pct = percentage_error(self.target, &totals);

        let best_error = self.best.as_ref().map_or(f64::INFINITY, |b| b.error);
        if error_pct < ACCEPTANCE_ERROR_PCT && error < best_error {
            self.best = Some(BestLeaf {
                choice: self.choice.clone(),
                totals,
                error,
                error_pct,
            });
        }
    }

    fn good_enough(&self) -> bool {
        self.best
            .as_ref()
            .is_some_and(|b| b.error_pct < EARLY_EXIT_ERROR_PCT)
    }
}
