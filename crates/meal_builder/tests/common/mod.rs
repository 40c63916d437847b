#![allow(dead_code)]

use meal_builder::{parse_catalog, Category, Food, MacroTarget};

pub fn catalog() -> Vec<Food> {
    parse_catalog(include_str!("../fixtures/alimentos.json")).expect("fixture catalog is valid")
}

pub fn food_by_id(foods: &[Food], id: i64) -> &Food {
    foods
        .iter()
        .find(|food| food.id == id)
        .unwrap_or_else(|| panic!("food {} missing from fixture", id))
}

pub fn target(protein: f64, carb: f64, fat: f64) -> MacroTarget {
    MacroTarget::new(protein, carb, fat).unwrap()
}

/// Bare food for scenarios that don't need the fixture catalog
pub fn create_test_food(
    id: i64,
    name: &str,
    category: Category,
    portion_g: f64,
    macros: (f64, f64, f64),
    context: &str,
    cluster: Option<u8>,
) -> Food {
    let (protein, carb, fat) = macros;
    Food {
        id,
        name: name.to_string(),
        category,
        portion_g,
        kcal: protein * 4.0 + carb * 4.0 + fat * 9.0,
        protein,
        carb,
        fat,
        culinary_context: context.to_string(),
        incompatible_with: String::new(),
        cluster,
    }
}
