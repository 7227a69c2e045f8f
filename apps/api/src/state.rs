use std::sync::Arc;

use crate::config::Config;
use crate::matching::normalizer::KeywordNormalizer;
use crate::matching::ranker::RecommendationRanker;
use crate::store::{JobStore, ResumeStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub resumes: Arc<dyn ResumeStore>,
    pub jobs: Arc<dyn JobStore>,
    /// Built once from the alias table; applied to every store row before ranking.
    pub normalizer: Arc<KeywordNormalizer>,
    /// Holds the scorer picked by MATCH_SCORER.
    pub ranker: Arc<RecommendationRanker>,
}
