// Matching engine: keyword normalization, skill sets, scoring, explanation, ranking.
// Pure and synchronous. Store access lives in `crate::store`; only `handlers` touches it.

pub mod explainer;
pub mod handlers;
pub mod normalizer;
pub mod profile;
pub mod ranker;
pub mod scorer;
pub mod skill_set;
