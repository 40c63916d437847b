//! Shared setup for application-level tests

#![allow(dead_code)]

use std::path::Path;
use std::time::Duration;

use meal_builder::{Food, PortionGrid};
use nutriplan::{load_catalog, Planner};

pub const CATALOG_PATH: &str = "data/alimentos.json";

pub async fn catalog() -> Vec<Food> {
    load_catalog(Path::new(CATALOG_PATH))
        .await
        .expect("bundled catalog loads")
}

pub async fn planner() -> Planner {
    Planner::new(catalog().await, PortionGrid::default(), Duration::from_secs(30))
}
