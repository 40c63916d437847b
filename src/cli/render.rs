use std::fmt::Write as _;

use meal_builder::{ComposedMeal, MacroTotals, ScoredFood};

pub const NO_MEAL: &str = "no combination found within tolerance";
pub const NO_MATCHES: &str = "no matches";

pub fn meal(meal: &ComposedMeal) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<32} {:>6} {:>6} {:>8} {:>6} {:>6}",
        "Food", "Grams", "kcal", "Protein", "Carb", "Fat"
    );
    for line in &meal.lines {
        let _ = writeln!(
            out,
            "{:<32} {:>6} {:>6} {:>8} {:>6} {:>6}",
            line.food.name, line.grams, line.kcal, line.protein, line.carb, line.fat
        );
    }
    let _ = writeln!(
        out,
        "{:<32} {:>6} {:>6} {:>8} {:>6} {:>6}",
        "Total", "", meal.totals.kcal, meal.totals.protein, meal.totals.carb, meal.totals.fat
    );
    let _ = write!(out, "Error: {}g ({:.1}%)", meal.error, meal.error_pct);
    out
}

pub fn meals(meals: &[ComposedMeal]) -> String {
    if meals.is_empty() {
        return NO_MEAL.to_string();
    }
    meals
        .iter()
        .enumerate()
        .map(|(i, m)| format!("Variant {}\n{}", i + 1, meal(m)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn suggestions(ranked: &[ScoredFood<'_>]) -> String {
    if ranked.is_empty() {
        return NO_MATCHES.to_string();
    }
    ranked
        .iter()
        .map(|s| format!("{:>5} {:<32} {:>8.2}", s.food.id, s.food.name, s.score))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn totals(totals: &MacroTotals) -> String {
    let mut out = format!(
        "kcal {:.1} | protein {:.1}g | carb {:.1}g | fat {:.1}g",
        totals.kcal, totals.protein, totals.carb, totals.fat
    );
    if let Some(ratio) = totals.kcal_per_protein() {
        let _ = write!(out, " | {ratio:.1} kcal per g protein");
    }
    out
}
