use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

use crate::error::{MealBuilderError, MealBuilderResult};

/// Context tag that makes a food combinable with anything
pub const UNIVERSAL_CONTEXT: &str = "universal";

/// Food category as stored by the catalog backend
#[derive(
    EnumString,
    Display,
    VariantArray,
    AsRefStr,
    Default,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ProteinasMagras,
    ProteinasGordas,
    CarboidratosComplexos,
    CarboidratosSimples,
    GordurasSaudaveis,
    Vegetais,
    Frutas,
    Laticinios,
    Bebidas,
    Suplementos,
    #[default]
    Outros,
}

/// Macro-dominance bucket derived from a food's nutritional cluster id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MacroBucket {
    Protein,
    Carb,
    Fat,
}

impl MacroBucket {
    /// Cluster ids 2/5 are protein-dominant, 3/4 carb-dominant, 0 fat/snack.
    pub fn from_cluster(cluster: u8) -> Option<Self> {
        match cluster {
            2 | 5 => Some(MacroBucket::Protein),
            3 | 4 => Some(MacroBucket::Carb),
            0 => Some(MacroBucket::Fat),
            _ => None,
        }
    }
}

/// Read-only food reference entity.
///
/// Macro values (`kcal`, `protein`, `carb`, `fat`) are given per
/// `portion_g` grams. Context and incompatibility lists are comma-joined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: i64,
    pub name: String,
    pub category: Category,
    pub portion_g: f64,
    pub kcal: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
    pub culinary_context: String,
    #[serde(default)]
    pub incompatible_with: String,
    #[serde(default)]
    pub cluster: Option<u8>,
}

impl Food {
    pub fn context_tags(&self) -> impl Iterator<Item = &str> {
        split_tags(&self.culinary_context)
    }

    pub fn incompatibilities(&self) -> impl Iterator<Item = &str> {
        split_tags(&self.incompatible_with)
    }

    pub fn is_universal(&self) -> bool {
        self.has_context_tag(UNIVERSAL_CONTEXT)
    }

    pub fn has_context_tag(&self, tag: &str) -> bool {
        self.context_tags().any(|t| t == tag)
    }

    pub fn bucket(&self) -> Option<MacroBucket> {
        self.cluster.and_then(MacroBucket::from_cluster)
    }

    /// Unrounded macros for `grams` of this food
    pub fn scaled(&self, grams: f64) -> MacroTotals {
        let factor = grams / self.portion_g;
        MacroTotals {
            kcal: self.kcal * factor,
            protein: self.protein * factor,
            carb: self.carb * factor,
            fat: self.fat * factor,
        }
    }
}

fn split_tags(list: &str) -> impl Iterator<Item = &str> {
    list.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Desired grams of protein, carb and fat for one meal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroTarget {
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

impl MacroTarget {
    pub fn new(protein: f64, carb: f64, fat: f64) -> MealBuilderResult<Self> {
        let target = MacroTarget { protein, carb, fat };
        target.validate()?;
        Ok(target)
    }

    pub fn validate(&self) -> MealBuilderResult<()> {
        for (label, value) in [
            ("protein", self.protein),
            ("carb", self.carb),
            ("fat", self.fat),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MealBuilderError::InvalidTarget(format!(
                    "{label} must be a non-negative finite number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Atwater estimate: 4 kcal/g protein and carb, 9 kcal/g fat
    pub fn kcal(&self) -> f64 {
        self.protein * 4.0 + self.carb * 4.0 + self.fat * 9.0
    }
}

/// Aggregated energy and macros of a meal
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub kcal: f64,
    pub protein: f64,
    pub carb: f64,
    pub fat: f64,
}

impl MacroTotals {
    /// Unrounded totals for a hand-composed meal
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a MealItem<'a>>) -> Self {
        items
            .into_iter()
            .fold(MacroTotals::default(), |acc, item| {
                acc + item.food.scaled(item.grams)
            })
    }

    /// kcal spent per gram of protein; `None` for protein-free meals
    pub fn kcal_per_protein(&self) -> Option<f64> {
        (self.protein > 0.0).then(|| self.kcal / self.protein)
    }
}

impl std::ops::Add for MacroTotals {
    type Output = MacroTotals;

    fn add(self, rhs: MacroTotals) -> MacroTotals {
        MacroTotals {
            kcal: self.kcal + rhs.kcal,
            protein: self.protein + rhs.protein,
            carb: self.carb + rhs.carb,
            fat: self.fat + rhs.fat,
        }
    }
}

/// A food with a chosen quantity, as entered by the user
#[derive(Debug, Clone, Copy)]
pub struct MealItem<'a> {
    pub food: &'a Food,
    pub grams: f64,
}
