//! Relevance ranking of catalog foods against free text.
//!
//! Two modes:
//! - **query**: a typed search string, scored against the food name with
//!   heavy bonuses for exact, prefix and in-order matches;
//! - **context**: no query, so the meal's name (weight 2) and description
//!   (weight 1) are matched against the food's name, category and culinary
//!   context tokens.

use serde::Serialize;

use super::normalize::{DiacriticFolding, TextNormalizer};
use crate::food::Food;

pub const DEFAULT_MAX_RESULTS: usize = 5;

pub const EXACT_NAME_BONUS: f64 = 100.0;
pub const NAME_PREFIX_BONUS: f64 = 50.0;
pub const NAME_SUBSTRING_BONUS: f64 = 20.0;
pub const TOKEN_SEQUENCE_BONUS: f64 = 10.0;
pub const TOKEN_MATCH_POINTS: f64 = 3.0;
pub const PARTIAL_MATCH_POINTS: f64 = 0.5;
pub const CONTEXT_PHRASE_BONUS: f64 = 8.0;
pub const CONTEXT_OVERLAP_BOOST: f64 = 1.3;
pub const NAME_TOKEN_WEIGHT: f64 = 2.0;
pub const DESCRIPTION_TOKEN_WEIGHT: f64 = 1.0;

/// Multiplier for an exact query token found at `position` in the food name
pub fn position_boost(position: usize) -> f64 {
    match position {
        0 => 3.0,
        1 => 2.0,
        2 => 1.5,
        _ => 1.0,
    }
}

/// Inputs of a single ranking call
#[derive(Debug, Clone, Copy)]
pub struct SearchRequest<'r> {
    /// Meal name being composed
    pub name: &'r str,
    /// Meal description being composed
    pub description: &'r str,
    /// Typed search text; takes priority over name and description
    pub query: &'r str,
    /// Foods already in the meal
    pub excluded_ids: &'r [i64],
    pub max_results: usize,
}

impl Default for SearchRequest<'_> {
    fn default() -> Self {
        SearchRequest {
            name: "",
            description: "",
            query: "",
            excluded_ids: &[],
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredFood<'a> {
    pub food: &'a Food,
    pub score: f64,
}

struct IndexedFood<'a> {
    food: &'a Food,
    /// name, category and culinary context tokens
    tokens: Vec<String>,
    name_tokens: Vec<String>,
    context_tokens: Vec<String>,
    normalized_name: String,
}

/// Pre-tokenized view of a catalog, reusable across searches
pub struct FoodRanker<'a, N = DiacriticFolding> {
    normalizer: N,
    index: Vec<IndexedFood<'a>>,
}

impl<'a> FoodRanker<'a, DiacriticFolding> {
    pub fn new(foods: &'a [Food]) -> Self {
        Self::with_normalizer(foods, DiacriticFolding)
    }
}

impl<'a, N: TextNormalizer> FoodRanker<'a, N> {
    pub fn with_normalizer(foods: &'a [Food], normalizer: N) -> Self {
        let index = foods
            .iter()
            .map(|food| {
                let normalized_name = normalizer.normalize(&food.name);
                let name_tokens = normalizer.tokenize(&normalized_name);
                let context_tokens =
                    normalizer.tokenize(&food.culinary_context.to_lowercase());

                let mut tokens = name_tokens.clone();
                tokens.extend(normalizer.tokenize(&food.category.as_ref().replace('_', " ")));
                tokens.extend(normalizer.tokenize(&food.culinary_context));

                IndexedFood {
                    food,
                    tokens,
                    name_tokens,
                    context_tokens,
                    normalized_name,
                }
            })
            .collect();

        FoodRanker { normalizer, index }
    }

    /// Top foods by descending score; ties keep catalog order
    #[tracing::instrument(skip(self), fields(catalog = self.index.len()))]
    pub fn rank(&self, request: &SearchRequest<'_>) -> Vec<ScoredFood<'a>> {
        let query = self.normalizer.normalize(request.query);
        let scorer = if !query.is_empty() {
            Scorer::Query(QueryScorer {
                tokens: self.normalizer.tokenize(&query),
                query,
            })
        } else if !request.name.trim().is_empty() || !request.description.trim().is_empty() {
            Scorer::Context(ContextScorer::new(&self.normalizer, request))
        } else {
            return Vec::new();
        };

        let mut scored: Vec<ScoredFood<'a>> = self
            .index
            .iter()
            .filter(|entry| !request.excluded_ids.contains(&entry.food.id))
            .map(|entry| ScoredFood {
                food: entry.food,
                score: scorer.score(entry),
            })
            .filter(|candidate| candidate.score > 0.0)
            .collect();

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(request.max_results);

        tracing::debug!(results = scored.len(), "Food search ranked");

        scored
    }

    pub fn search(&self, request: &SearchRequest<'_>) -> Vec<&'a Food> {
        self.rank(request)
            .into_iter()
            .map(|scored| scored.food)
            .collect()
    }
}

/// One-shot search over `foods`, without keeping the index
pub fn search<'a>(
    foods: &'a [Food],
    name: &str,
    description: &str,
    query: &str,
    excluded_ids: &[i64],
    max_results: usize,
) -> Vec<&'a Food> {
    FoodRanker::new(foods).search(&SearchRequest {
        name,
        description,
        query,
        excluded_ids,
        max_results,
    })
}

enum Scorer {
    Query(QueryScorer),
    Context(ContextScorer),
}

impl Scorer {
    fn score(&self, entry: &IndexedFood<'_>) -> f64 {
        match self {
            Scorer::Query(scorer) => scorer.score(entry),
            Scorer::Context(scorer) => scorer.score(entry),
        }
    }
}

struct QueryScorer {
    query: String,
    tokens: Vec<String>,
}

impl QueryScorer {
    fn score(&self, entry: &IndexedFood<'_>) -> f64 {
        let name = entry.normalized_name.as_str();
        let query = self.query.as_str();
        let mut score = 0.0;

        if name == query {
            score += EXACT_NAME_BONUS;
        }
        if name.starts_with(query) {
            score += NAME_PREFIX_BONUS;
        } else if name.contains(query) {
            score += NAME_SUBSTRING_BONUS;
        }

        if self.tokens.len() > 1 && tokens_in_order(name, &self.tokens) {
            score += TOKEN_SEQUENCE_BONUS;
        }

        for token in &self.tokens {
            if let Some(position) = entry.name_tokens.iter().position(|t| t == token) {
                score += TOKEN_MATCH_POINTS * position_boost(position);
            }
        }

        for token in &self.tokens {
            for food_token in &entry.tokens {
                if food_token != token && overlaps(food_token, token) {
                    score += PARTIAL_MATCH_POINTS;
                }
            }
        }

        score
    }
}

struct ContextScorer {
    phrase: String,
    weighted: Vec<(String, f64)>,
    meal_tokens: Vec<String>,
}

impl ContextScorer {
    fn new<N: TextNormalizer>(normalizer: &N, request: &SearchRequest<'_>) -> Self {
        let phrase = [request.name, request.description]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        let name_tokens = normalizer.tokenize(request.name);
        let description_tokens = normalizer.tokenize(request.description);

        let weighted = name_tokens
            .iter()
            .map(|t| (t.clone(), NAME_TOKEN_WEIGHT))
            .chain(
                description_tokens
                    .iter()
                    .map(|t| (t.clone(), DESCRIPTION_TOKEN_WEIGHT)),
            )
            .collect();

        let mut meal_tokens = name_tokens;
        meal_tokens.extend(description_tokens);

        ContextScorer {
            phrase: normalizer.normalize(&phrase),
            weighted,
            meal_tokens,
        }
    }

    fn score(&self, entry: &IndexedFood<'_>) -> f64 {
        let mut score = 0.0;

        if !self.phrase.is_empty() && entry.normalized_name.contains(&self.phrase) {
            score += CONTEXT_PHRASE_BONUS;
        }

        for (token, weight) in &self.weighted {
            for food_token in &entry.tokens {
                if food_token == token {
                    score += TOKEN_MATCH_POINTS * weight;
                } else if overlaps(food_token, token) {
                    score += PARTIAL_MATCH_POINTS * weight;
                }
            }
        }

        let shares_context = self.meal_tokens.iter().any(|token| {
            entry
                .context_tokens
                .iter()
                .any(|food_token| food_token == token || overlaps(food_token, token))
        });
        if shares_context {
            score *= CONTEXT_OVERLAP_BOOST;
        }

        score
    }
}

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

/// Every token occurs in `text` after the end of the previous one
fn tokens_in_order(text: &str, tokens: &[String]) -> bool {
    let mut cursor = 0;
    for token in tokens {
        match text[cursor..].find(token.as_str()) {
            Some(offset) => cursor += offset + token.len(),
            None => return false,
        }
    }
    true
}
