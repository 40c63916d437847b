pub mod normalize;
pub mod ranker;

pub use normalize::{DiacriticFolding, TextNormalizer};
pub use ranker::{search, FoodRanker, ScoredFood, SearchRequest, DEFAULT_MAX_RESULTS};
