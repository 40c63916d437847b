//! Adapter from the catalog backend's JSON food records to [`Food`].
//!
//! The core algorithms never validate their inputs, so this is where
//! malformed foods (zero portions, NaN macros, unknown categories) are
//! rejected.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{MealBuilderError, MealBuilderResult};
use crate::food::{Category, Food};

/// Food record exactly as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodRecord {
    pub id: i64,
    pub nome: String,
    pub categoria: String,
    pub porcao_g: f64,
    pub kcal: f64,
    pub prot_g: f64,
    pub carb_g: f64,
    pub gord_g: f64,
    #[serde(default)]
    pub contexto_culinario: Option<String>,
    #[serde(default)]
    pub incompativel_com: Option<String>,
    #[serde(default)]
    pub cluster_nutricional: Option<u8>,
}

impl TryFrom<FoodRecord> for Food {
    type Error = MealBuilderError;

    fn try_from(record: FoodRecord) -> Result<Self, Self::Error> {
        let invalid = |reason: String| MealBuilderError::InvalidFood {
            id: record.id,
            reason,
        };

        if record.nome.trim().is_empty() {
            return Err(invalid("name is blank".to_string()));
        }
        if !record.porcao_g.is_finite() || record.porcao_g <= 0.0 {
            return Err(invalid(format!(
                "reference portion must be positive, got {}",
                record.porcao_g
            )));
        }
        for (label, value) in [
            ("kcal", record.kcal),
            ("prot_g", record.prot_g),
            ("carb_g", record.carb_g),
            ("gord_g", record.gord_g),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(format!(
                    "{label} must be a non-negative finite number, got {value}"
                )));
            }
        }

        let category = Category::from_str(record.categoria.trim())
            .map_err(|_| MealBuilderError::UnknownCategory(record.categoria.clone()))?;

        Ok(Food {
            id: record.id,
            name: record.nome.trim().to_string(),
            category,
            portion_g: record.porcao_g,
            kcal: record.kcal,
            protein: record.prot_g,
            carb: record.carb_g,
            fat: record.gord_g,
            culinary_context: record.contexto_culinario.unwrap_or_default(),
            incompatible_with: record.incompativel_com.unwrap_or_default(),
            cluster: record.cluster_nutricional,
        })
    }
}

/// Parse and validate a JSON array of backend food records
pub fn parse_catalog(json: &str) -> MealBuilderResult<Vec<Food>> {
    let records: Vec<FoodRecord> = serde_json::from_str(json)?;
    let foods = records
        .into_iter()
        .map(Food::try_from)
        .collect::<MealBuilderResult<Vec<_>>>()?;

    tracing::debug!(foods = foods.len(), "Food catalog parsed");

    Ok(foods)
}
