use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use meal_builder::{MacroTarget, PortionGrid};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub solver: SolverConfig,
    pub search: SearchConfig,
    /// Macro targets per meal type (cafe_manha, almoco, ...)
    #[serde(default)]
    pub targets: BTreeMap<String, MacroTarget>,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SolverConfig {
    pub min_grams: u32,
    pub max_grams: u32,
    pub step_grams: u32,
    /// Upper bound for a single compose/variants/fit call
    pub timeout_secs: u64,
    pub variants: usize,
}

impl SolverConfig {
    pub fn grid(&self) -> meal_builder::MealBuilderResult<PortionGrid> {
        PortionGrid::new(self.min_grams, self.max_grams, self.step_grams)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    pub max_results: usize,
    /// Quiet window before an interactive query is ranked
    pub debounce_ms: u64,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Built-in per-meal-type targets as (protein, carb, fat) grams
const DEFAULT_TARGETS: [(&str, f64, f64, f64); 4] = [
    ("cafe_manha", 20.0, 40.0, 12.0),
    ("almoco", 40.0, 50.0, 15.0),
    ("lanche", 15.0, 25.0, 8.0),
    ("jantar", 35.0, 40.0, 12.0),
];

impl Config {
    /// Load configuration from file and environment variables
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (NUTRIPLAN__SOLVER__TIMEOUT_SECS, etc.)
    /// 2. Config file specified by path
    /// 3. Hardcoded defaults
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("catalog.path", "data/alimentos.json")?
            .set_default("solver.min_grams", 50)?
            .set_default("solver.max_grams", 500)?
            .set_default("solver.step_grams", 10)?
            .set_default("solver.timeout_secs", 30)?
            .set_default("solver.variants", 5)?
            .set_default("search.max_results", 5)?
            .set_default("search.debounce_ms", 150)?;

        for (meal_type, protein, carb, fat) in DEFAULT_TARGETS {
            builder = builder
                .set_default(format!("targets.{meal_type}.protein"), protein)?
                .set_default(format!("targets.{meal_type}.carb"), carb)?
                .set_default(format!("targets.{meal_type}.fat"), fat)?;
        }

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Optional file; missing path falls back to defaults
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        builder = builder.add_source(
            Environment::with_prefix("NUTRIPLAN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.catalog.path.trim().is_empty() {
            return Err("Catalog path must not be empty".to_string());
        }
        self.solver
            .grid()
            .map_err(|e| format!("Solver grid is invalid: {e}"))?;
        if self.solver.timeout_secs == 0 {
            return Err("Solver timeout must be greater than 0".to_string());
        }
        if self.solver.variants == 0 {
            return Err("Solver variants must be greater than 0".to_string());
        }
        if self.search.max_results == 0 {
            return Err("Search max_results must be greater than 0".to_string());
        }
        for (meal_type, target) in &self.targets {
            target
                .validate()
                .map_err(|e| format!("Target for {meal_type} is invalid: {e}"))?;
        }
        Ok(())
    }

    pub fn target(&self, meal_type: &str) -> Option<&MacroTarget> {
        self.targets.get(meal_type)
    }
}
