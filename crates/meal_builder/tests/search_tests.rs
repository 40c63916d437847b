//! Food relevance ranking over the fixture catalog.

mod common;

use common::catalog;
use meal_builder::search::ranker::DEFAULT_MAX_RESULTS;
use meal_builder::{search, FoodRanker, SearchRequest};

fn ranked_ids(ranker: &FoodRanker<'_>, request: &SearchRequest<'_>) -> Vec<(i64, f64)> {
    ranker
        .rank(request)
        .into_iter()
        .map(|scored| (scored.food.id, scored.score))
        .collect()
}

fn assert_scores(actual: &[(i64, f64)], expected: &[(i64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "{:?}", actual);
    for ((id, score), (want_id, want_score)) in actual.iter().zip(expected) {
        assert_eq!(id, want_id, "{:?}", actual);
        assert!(
            (score - want_score).abs() < 1e-9,
            "food {}: expected {}, got {}",
            id,
            want_score,
            score
        );
    }
}

#[test]
fn test_prefix_match_outranks_substring_match() {
    let foods = catalog();
    let ranker = FoodRanker::new(&foods);
    let ranked = ranked_ids(
        &ranker,
        &SearchRequest {
            query: "frango",
            ..Default::default()
        },
    );

    // "Frango grelhado": prefix 50 + first token 9
    // "Sopa de frango": substring 20 + second token 6
    assert_scores(&ranked, &[(1, 59.0), (12, 26.0)]);
}

#[test]
fn test_multi_token_query_rewards_order() {
    let foods = catalog();
    let ranker = FoodRanker::new(&foods);
    let ranked = ranked_ids(
        &ranker,
        &SearchRequest {
            query: "Frango Grelhado",
            ..Default::default()
        },
    );

    // exact 100 + prefix 50 + sequence 10 + 9 + 6
    assert_scores(&ranked, &[(1, 175.0), (12, 6.0)]);
}

#[test]
fn test_query_ignores_accents() {
    let foods = catalog();
    let found = search(&foods, "", "", "tilapia", &[], DEFAULT_MAX_RESULTS);
    let names: Vec<&str> = found.iter().map(|food| food.name.as_str()).collect();
    assert_eq!(names, vec!["Tilápia grelhada"]);
}

#[test]
fn test_ties_keep_catalog_order() {
    let foods = catalog();
    let ranker = FoodRanker::new(&foods);
    let ranked = ranked_ids(
        &ranker,
        &SearchRequest {
            query: "grelhad",
            ..Default::default()
        },
    );

    assert_scores(&ranked, &[(1, 20.5), (6, 20.5)]);
}

#[test]
fn test_excluded_foods_are_skipped() {
    let foods = catalog();
    let found = search(&foods, "", "", "frango", &[1], DEFAULT_MAX_RESULTS);
    let ids: Vec<i64> = found.iter().map(|food| food.id).collect();
    assert_eq!(ids, vec![12]);
}

#[test]
fn test_context_mode_uses_meal_name_and_description() {
    let foods = catalog();
    let ranker = FoodRanker::new(&foods);
    let ranked = ranked_ids(
        &ranker,
        &SearchRequest {
            name: "Café da manhã",
            description: "ovos com pão integral",
            ..Default::default()
        },
    );

    assert_scores(
        &ranked,
        &[(5, 10.4), (4, 3.25), (9, 2.6), (13, 2.6), (2, 0.5)],
    );
}

#[test]
fn test_context_mode_truncates_to_max_results() {
    let foods = catalog();
    let ranker = FoodRanker::new(&foods);
    let ranked = ranked_ids(
        &ranker,
        &SearchRequest {
            name: "Jantar leve",
            max_results: 3,
            ..Default::default()
        },
    );

    assert_scores(&ranked, &[(1, 7.8), (2, 7.8), (3, 7.8)]);
}

#[test]
fn test_empty_inputs_return_nothing() {
    let foods = catalog();
    assert!(search(&foods, "", "", "", &[], DEFAULT_MAX_RESULTS).is_empty());
    assert!(search(&foods, "  ", "", "", &[], DEFAULT_MAX_RESULTS).is_empty());
    assert!(search(&[], "", "", "frango", &[], DEFAULT_MAX_RESULTS).is_empty());
}

#[test]
fn test_unmatched_query_returns_nothing() {
    let foods = catalog();
    assert!(search(&foods, "", "", "xyzzy", &[], DEFAULT_MAX_RESULTS).is_empty());
}

#[test]
fn test_ranking_properties() {
    let foods = catalog();
    let ranker = FoodRanker::new(&foods);
    let requests = [
        SearchRequest {
            query: "cozido",
            ..Default::default()
        },
        SearchRequest {
            name: "Almoço",
            description: "arroz com frango",
            max_results: 4,
            ..Default::default()
        },
        SearchRequest {
            name: "Lanche",
            excluded_ids: &[10],
            max_results: 20,
            ..Default::default()
        },
    ];

    for request in &requests {
        let first = ranker.rank(request);
        let second = ranker.rank(request);
        assert_eq!(first, second);

        assert!(first.len() <= request.max_results);
        assert!(first.iter().all(|scored| scored.score > 0.0));
        assert!(first.windows(2).all(|pair| pair[0].score >= pair[1].score));
        assert!(first
            .iter()
            .all(|scored| !request.excluded_ids.contains(&scored.food.id)));
    }
}
