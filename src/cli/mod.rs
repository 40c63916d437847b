//! Command line surface: argument parsing and command handlers.

pub mod render;

use std::path::Path;

use clap::{Args, Parser, Subcommand};
use meal_builder::{FoodRanker, MacroTarget, MacroTotals, MealItem, SearchRequest};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::debounce::debounce;
use crate::error::AppError;
use crate::planner::{load_catalog, Planner};

/// nutriplan - macro-driven meal composition
#[derive(Parser, Debug)]
#[command(name = "nutriplan")]
#[command(about = "Compose meals that hit a macro target and search foods", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Best meal for a target
    Compose {
        #[command(flatten)]
        target: TargetArgs,

        /// Culinary context (defaults to the meal type)
        #[arg(long)]
        context: Option<String>,
    },
    /// Alternative meals built from distinct food sets
    Variants {
        #[command(flatten)]
        target: TargetArgs,

        #[arg(long)]
        context: Option<String>,

        /// Number of variants (overrides config)
        #[arg(long)]
        count: Option<usize>,
    },
    /// Portions for an explicit list of foods
    Fit {
        /// Catalog food id, repeatable
        #[arg(long = "food", required = true)]
        foods: Vec<i64>,

        #[command(flatten)]
        target: TargetArgs,
    },
    /// Rank catalog foods by a query or by the meal being composed
    Suggest {
        #[arg(long, default_value = "")]
        query: String,

        /// Meal name
        #[arg(long, default_value = "")]
        name: String,

        /// Meal description
        #[arg(long, default_value = "")]
        description: String,

        /// Food id already in the meal, repeatable
        #[arg(long = "exclude")]
        exclude: Vec<i64>,

        /// Overrides config
        #[arg(long)]
        max_results: Option<usize>,

        /// Read queries from stdin, one per line
        #[arg(long)]
        interactive: bool,
    },
    /// Unrounded totals of a hand-composed meal
    Totals {
        /// ID:GRAMS, repeatable
        #[arg(long = "item", required = true, value_parser = parse_item)]
        items: Vec<(i64, f64)>,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Meal type with a configured target (cafe_manha, almoco, lanche, jantar)
    #[arg(long, conflicts_with_all = ["protein", "carb", "fat"])]
    pub meal_type: Option<String>,

    /// Protein grams
    #[arg(long, requires_all = ["carb", "fat"])]
    pub protein: Option<f64>,

    /// Carbohydrate grams
    #[arg(long, requires_all = ["protein", "fat"])]
    pub carb: Option<f64>,

    /// Fat grams
    #[arg(long, requires_all = ["protein", "carb"])]
    pub fat: Option<f64>,
}

impl TargetArgs {
    pub fn resolve(&self, config: &Config) -> Result<MacroTarget, AppError> {
        match (&self.meal_type, self.protein, self.carb, self.fat) {
            (_, Some(protein), Some(carb), Some(fat)) => Ok(MacroTarget::new(protein, carb, fat)?),
            (Some(meal_type), ..) => config
                .target(meal_type)
                .copied()
                .ok_or_else(|| AppError::UnknownMealType(meal_type.clone())),
            _ => Err(AppError::ValidationError(
                "either --meal-type or --protein, --carb and --fat is required".to_string(),
            )),
        }
    }

    /// Explicit context first, then the meal type
    pub fn context(&self, explicit: Option<String>) -> Option<String> {
        explicit.or_else(|| self.meal_type.clone())
    }
}

fn parse_item(value: &str) -> Result<(i64, f64), String> {
    let (id, grams) = value
        .split_once(':')
        .ok_or_else(|| format!("expected ID:GRAMS, got {value}"))?;
    let id = id
        .trim()
        .parse()
        .map_err(|e| format!("invalid food id {id}: {e}"))?;
    let grams: f64 = grams
        .trim()
        .parse()
        .map_err(|e| format!("invalid grams {grams}: {e}"))?;
    if !grams.is_finite() || grams < 0.0 {
        return Err(format!("grams must be non-negative, got {grams}"));
    }
    Ok((id, grams))
}

pub async fn run(command: Commands, config: Config, json: bool) -> anyhow::Result<()> {
    let foods = load_catalog(Path::new(&config.catalog.path)).await?;

    match command {
        Commands::Compose { target, context } => {
            let macros = target.resolve(&config)?;
            let planner = Planner::from_config(foods, &config.solver)?;
            let meal = planner.compose(macros, target.context(context)).await?;
            match &meal {
                Some(meal) => emit(json, meal, || render::meal(meal))?,
                None => emit(json, &meal, || render::NO_MEAL.to_string())?,
            }
        }
        Commands::Variants {
            target,
            context,
            count,
        } => {
            let macros = target.resolve(&config)?;
            let count = count.unwrap_or(config.solver.variants);
            let planner = Planner::from_config(foods, &config.solver)?;
            let meals = planner
                .variants(macros, target.context(context), count)
                .await?;
            emit(json, &meals, || render::meals(&meals))?;
        }
        Commands::Fit { foods: ids, target } => {
            let macros = target.resolve(&config)?;
            let planner = Planner::from_config(foods, &config.solver)?;
            let meal = planner.fit(&ids, macros).await?;
            match &meal {
                Some(meal) => emit(json, meal, || render::meal(meal))?,
                None => emit(json, &meal, || render::NO_MEAL.to_string())?,
            }
        }
        Commands::Suggest {
            query,
            name,
            description,
            exclude,
            max_results,
            interactive,
        } => {
            let max_results = max_results.unwrap_or(config.search.max_results);
            let ranker = FoodRanker::new(&foods);
            let request = |query: &str| {
                ranker.rank(&SearchRequest {
                    name: &name,
                    description: &description,
                    query,
                    excluded_ids: &exclude,
                    max_results,
                })
            };

            if interactive {
                let mut queries = debounce(spawn_stdin_lines(), config.search.debounce());
                while let Some(line) = queries.recv().await {
                    let ranked = request(&line);
                    emit(json, &ranked, || render::suggestions(&ranked))?;
                }
            } else {
                let ranked = request(&query);
                emit(json, &ranked, || render::suggestions(&ranked))?;
            }
        }
        Commands::Totals { items } => {
            let planner = Planner::from_config(foods, &config.solver)?;
            let meal_items = items
                .iter()
                .map(|&(id, grams)| planner.food(id).map(|food| MealItem { food, grams }))
                .collect::<Result<Vec<_>, AppError>>()?;
            let totals = MacroTotals::from_items(&meal_items);
            emit(json, &totals, || render::totals(&totals))?;
        }
    }

    Ok(())
}

fn emit<T: Serialize + ?Sized>(
    json: bool,
    value: &T,
    text: impl FnOnce() -> String,
) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{}", text());
    }
    Ok(())
}

fn spawn_stdin_lines() -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if tx.send(line).await.is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });
    rx
}
