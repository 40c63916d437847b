//! Planner over the bundled catalog: the async boundary around the builder.

mod helpers;

use meal_builder::MacroTarget;
use nutriplan::AppError;

#[tokio::test]
async fn test_bundled_catalog_loads() {
    let foods = helpers::catalog().await;
    assert_eq!(foods.len(), 13);
    assert!(foods.iter().any(|food| food.name == "Frango grelhado"));
}

#[tokio::test]
async fn test_compose_lunch() {
    let planner = helpers::planner().await;
    let target = MacroTarget::new(40.0, 50.0, 15.0).unwrap();

    let meal = planner
        .compose(target, Some("almoco".to_string()))
        .await
        .unwrap()
        .expect("lunch fits");

    let ids: Vec<i64> = meal.lines.iter().map(|line| line.food.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(meal.error, 2.0);
}

#[tokio::test]
async fn test_compose_without_candidates_is_none() {
    let planner = helpers::planner().await;
    let target = MacroTarget::new(40.0, 50.0, 15.0).unwrap();

    let meal = planner.compose(target, Some("ceia".to_string())).await.unwrap();
    assert!(meal.is_none());
}

#[tokio::test]
async fn test_variants_respect_count() {
    let planner = helpers::planner().await;
    let target = MacroTarget::new(20.0, 40.0, 12.0).unwrap();

    let meals = planner
        .variants(target, Some("cafe_manha".to_string()), 2)
        .await
        .unwrap();
    assert_eq!(meals.len(), 2);
    assert_ne!(meals[0].food_key(), meals[1].food_key());
}

#[tokio::test]
async fn test_fit_explicit_foods_keeps_order() {
    let planner = helpers::planner().await;
    let target = MacroTarget::new(20.0, 50.0, 15.0).unwrap();

    let meal = planner.fit(&[5, 4], target).await.unwrap().expect("fits");
    let ids: Vec<i64> = meal.lines.iter().map(|line| line.food.id).collect();
    assert_eq!(ids, vec![5, 4]);
    assert!(meal.error_pct < 10.0);
}

#[tokio::test]
async fn test_fit_unknown_food() {
    let planner = helpers::planner().await;
    let target = MacroTarget::new(20.0, 50.0, 15.0).unwrap();

    let result = planner.fit(&[4, 404], target).await;
    assert!(matches!(result, Err(AppError::UnknownFood(404))));
}
