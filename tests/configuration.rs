//! Tests for configuration system

use nutriplan::Config;

#[test]
fn test_config_loads_from_default_toml() {
    let config = Config::load(None).expect("Failed to load config");

    assert_eq!(config.catalog.path, "data/alimentos.json");
    assert_eq!(config.solver.min_grams, 50);
    assert_eq!(config.solver.max_grams, 500);
    assert_eq!(config.solver.step_grams, 10);
    assert_eq!(config.solver.timeout_secs, 30);
    assert_eq!(config.solver.variants, 5);
    assert_eq!(config.search.max_results, 5);
    assert_eq!(config.search.debounce_ms, 150);
    assert_eq!(config.observability.log_level, "info");
}

#[test]
fn test_config_has_all_meal_type_targets() {
    let config = Config::load(None).expect("Failed to load config");

    for meal_type in ["cafe_manha", "almoco", "lanche", "jantar"] {
        let target = config.target(meal_type);
        assert!(target.is_some(), "missing target for {meal_type}");
    }
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_grid_matches_solver_defaults() {
    let config = Config::load(None).expect("Failed to load config");
    let grid = config.solver.grid().expect("valid grid");

    assert_eq!(grid, meal_builder::PortionGrid::default());
}
