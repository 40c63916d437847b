use crate::compatibility::{compatible, group_compatible};
use crate::food::{Food, MacroBucket, MacroTarget};

/// Bucket heads considered for protein + carb pairs
pub const PAIR_PROTEIN_LIMIT: usize = 10;
pub const PAIR_CARB_LIMIT: usize = 10;

/// Bucket heads considered for protein + carb + fat triples
pub const TRIPLE_PROTEIN_LIMIT: usize = 8;
pub const TRIPLE_CARB_LIMIT: usize = 8;
pub const TRIPLE_FAT_LIMIT: usize = 5;

/// Foods of a catalog split by macro bucket, preserving catalog order
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    pub protein: Vec<&'a Food>,
    pub carb: Vec<&'a Food>,
    pub fat: Vec<&'a Food>,
}

impl<'a> Buckets<'a> {
    pub fn partition(foods: impl IntoIterator<Item = &'a Food>) -> Self {
        let mut buckets = Buckets::default();
        for food in foods {
            match food.bucket() {
                Some(MacroBucket::Protein) => buckets.protein.push(food),
                Some(MacroBucket::Carb) => buckets.carb.push(food),
                Some(MacroBucket::Fat) => buckets.fat.push(food),
                None => {}
            }
        }
        buckets
    }
}

/// Enumerate candidate food groups for a meal.
///
/// With a `context`, only foods tagged with it (or universal) are considered.
/// Emits compatible protein × carb pairs first, then compatible
/// protein × carb × fat triples, proteins in the outer loop. The target is
/// not used for selection.
pub fn select_combinations<'a>(
    foods: &'a [Food],
    _target: &MacroTarget,
    context: Option<&str>,
) -> Vec<Vec<&'a Food>> {
    let eligible = foods.iter().filter(|food| match context {
        Some(ctx) => food.has_context_tag(ctx) || food.is_universal(),
        None => true,
    });
    let buckets = Buckets::partition(eligible);

    let mut combinations = Vec::new();

    for &protein in buckets.protein.iter().take(PAIR_PROTEIN_LIMIT) {
        for &carb in buckets.carb.iter().take(PAIR_CARB_LIMIT) {
            if compatible(protein, carb) {
                combinations.push(vec![protein, carb]);
            }
        }
    }

    for &protein in buckets.protein.iter().take(TRIPLE_PROTEIN_LIMIT) {
        for &carb in buckets.carb.iter().take(TRIPLE_CARB_LIMIT) {
            for &fat in buckets.fat.iter().take(TRIPLE_FAT_LIMIT) {
                if group_compatible(&[protein, carb, fat]) {
                    combinations.push(vec![protein, carb, fat]);
                }
            }
        }
    }

    tracing::debug!(
        proteins = buckets.protein.len(),
        carbs = buckets.carb.len(),
        fats = buckets.fat.len(),
        combinations = combinations.len(),
        "Candidate food groups selected"
    );

    combinations
}
