//! Recommendation Ranker: scores a pool against one subject, sorts and truncates.
//!
//! Works in both directions through `Matchable`: a candidate ranks jobs, a job
//! ranks candidates. Order is descending score, then ascending id.

use std::cmp::Ordering;
use std::sync::Arc;

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::matching::explainer::MatchExplainer;
use crate::matching::profile::{CandidateProfile, JobRequirement, Matchable};
use crate::matching::scorer::{MatchScorer, OverlapRecallScorer};
use crate::matching::skill_set::SkillSet;

/// Pools at least this large are scored on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 256;

#[derive(Debug, Error, PartialEq)]
pub enum MatchError {
    #[error("limit must be a positive integer, got {0}")]
    InvalidLimit(i64),
}

/// One scored pool item. `id` is the job id when ranking jobs and the resume
/// id when ranking resumes.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub id: Uuid,
    pub score: f64,
    pub matched_keywords: SkillSet,
    pub missing_keywords: SkillSet,
    pub detail: String,
}

pub type RecommendationList = Vec<MatchResult>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolFilter {
    /// Drop closed jobs before scoring.
    #[default]
    EligibleOnly,
    /// The caller already filtered the pool; score everything.
    AsGiven,
}

pub struct RecommendationRanker {
    scorer: Arc<dyn MatchScorer>,
    explainer: MatchExplainer,
    parallel_threshold: usize,
}

impl Default for RecommendationRanker {
    fn default() -> Self {
        Self::new(Arc::new(OverlapRecallScorer))
    }
}

impl RecommendationRanker {
    pub fn new(scorer: Arc<dyn MatchScorer>) -> Self {
        Self {
            scorer,
            explainer: MatchExplainer,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Scores one pair directly. Job status is ignored, so closed jobs can
    /// be re-scored.
    pub fn score_pair(&self, candidate: &CandidateProfile, job: &JobRequirement) -> MatchResult {
        self.evaluate(candidate, job, job.id)
    }

    /// Ranks eligible pool items for `subject`.
    pub fn recommend<S: Matchable>(
        &self,
        subject: &S,
        pool: &[S::Counterpart],
        limit: i64,
    ) -> Result<RecommendationList, MatchError> {
        self.recommend_with(subject, pool, limit, PoolFilter::EligibleOnly)
    }

    pub fn recommend_with<S: Matchable>(
        &self,
        subject: &S,
        pool: &[S::Counterpart],
        limit: i64,
        filter: PoolFilter,
    ) -> Result<RecommendationList, MatchError> {
        let limit = validate_limit(limit)?;

        let eligible: Vec<&S::Counterpart> = pool
            .iter()
            .filter(|item| filter == PoolFilter::AsGiven || item.is_eligible())
            .collect();

        let parallel = eligible.len() >= self.parallel_threshold;
        debug!(
            subject = %subject.match_id(),
            pool = pool.len(),
            eligible = eligible.len(),
            parallel,
            "Ranking pool"
        );

        let score_one = |item: &&S::Counterpart| {
            let (candidate, job) = subject.orient(item);
            self.evaluate(candidate, job, item.match_id())
        };

        let mut results: RecommendationList = if parallel {
            eligible.par_iter().map(score_one).collect()
        } else {
            eligible.iter().map(score_one).collect()
        };

        results.sort_by(rank_order);
        results.truncate(limit);
        Ok(results)
    }

    fn evaluate(&self, candidate: &CandidateProfile, job: &JobRequirement, id: Uuid) -> MatchResult {
        let breakdown = self.scorer.score(&candidate.skills, job);
        let detail = self.explainer.explain(&breakdown, job);
        MatchResult {
            id,
            score: breakdown.score,
            matched_keywords: breakdown.matched,
            missing_keywords: breakdown.missing,
            detail,
        }
    }
}

/// Accepts positive limits only. Never clamps.
pub fn validate_limit(limit: i64) -> Result<usize, MatchError> {
    usize::try_from(limit)
        .ok()
        .filter(|l| *l > 0)
        .ok_or(MatchError::InvalidLimit(limit))
}

/// Descending score, ties by ascending id.
fn rank_order(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::matching::normalizer::{AliasTable, KeywordNormalizer};
    use crate::matching::profile::JobStatus;
    use crate::matching::scorer::WeightedScorer;
    use proptest::prelude::*;

    const VOCAB: &[&str] = &["rust", "sql", "kafka", "docker", "aws", "python", "java", "redis"];

    // -- Strategy helpers --

    fn arb_skills() -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(prop::sample::select(VOCAB), 0..6)
    }

    fn arb_status() -> impl Strategy<Value = JobStatus> {
        prop_oneof![Just(JobStatus::Open), Just(JobStatus::Closed)]
    }

    /// Jobs with random requirements and status; ids are drawn so duplicates
    /// in score are common.
    fn arb_pool() -> impl Strategy<Value = Vec<JobRequirement>> {
        prop::collection::vec((any::<u16>(), arb_skills(), arb_status()), 0..40).prop_map(|rows| {
            let normalizer = KeywordNormalizer::new(AliasTable::builtin());
            rows.into_iter()
                .map(|(id, required, status)| {
                    JobRequirement::new(Uuid::from_u128(id as u128), &required, &[], status, &normalizer)
                })
                .collect()
        })
    }

    fn subject(raw: &[&str]) -> CandidateProfile {
        CandidateProfile::new(Uuid::from_u128(0), raw, &KeywordNormalizer::new(AliasTable::builtin()))
    }

    proptest! {
        #[test]
        fn results_are_ordered_by_score_then_id(
            cand in arb_skills(),
            pool in arb_pool(),
            limit in 1i64..60,
        ) {
            let list = RecommendationRanker::default().recommend(&subject(&cand), &pool, limit).unwrap();
            for pair in list.windows(2) {
                prop_assert!(pair[0].score >= pair[1].score);
                if pair[0].score == pair[1].score {
                    prop_assert!(pair[0].id <= pair[1].id);
                }
            }
        }

        #[test]
        fn truncation_keeps_the_best_open_jobs(
            cand in arb_skills(),
            pool in arb_pool(),
            limit in 1i64..60,
        ) {
            let ranker = RecommendationRanker::default();
            let candidate = subject(&cand);
            let open_count = pool.iter().filter(|j| j.is_open()).count();

            let full = ranker.recommend(&candidate, &pool, i64::MAX).unwrap();
            let cut = ranker.recommend(&candidate, &pool, limit).unwrap();

            prop_assert_eq!(full.len(), open_count);
            prop_assert_eq!(cut.len(), open_count.min(limit as usize));
            prop_assert_eq!(&cut[..], &full[..cut.len()]);
        }

        #[test]
        fn parallel_scoring_matches_sequential(
            cand in arb_skills(),
            pool in arb_pool(),
        ) {
            let candidate = subject(&cand);
            let scorer: Arc<dyn MatchScorer> = Arc::new(WeightedScorer::default());
            let sequential = RecommendationRanker::new(scorer.clone())
                .with_parallel_threshold(usize::MAX)
                .recommend(&candidate, &pool, 100)
                .unwrap();
            let parallel = RecommendationRanker::new(scorer)
                .with_parallel_threshold(1)
                .recommend(&candidate, &pool, 100)
                .unwrap();
            prop_assert_eq!(sequential, parallel);
        }
    }
}
