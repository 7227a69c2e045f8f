//! Match Scoring: pluggable, trait-based scorer for one (candidate, job) pair.
//!
//! Default: `OverlapRecallScorer` (share of required keywords the candidate has).
//! Alternative: `WeightedScorer` (required and desired keywords, weighted).
//!
//! `AppState` holds the ranker, which carries an `Arc<dyn MatchScorer>` chosen at
//! startup from `MATCH_SCORER`.

use std::str::FromStr;

use crate::matching::profile::JobRequirement;
use crate::matching::skill_set::SkillSet;

// ────────────────────────────────────────────────────────────────────────────
// Output data model (shared across all scorer backends)
// ────────────────────────────────────────────────────────────────────────────

/// Score plus the keyword split that explains it.
///
/// `matched` and `missing` partition the job's required keywords whenever
/// that set is non-empty; both are empty otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    pub score: f64, // 0.0 – 100.0, one decimal
    pub matched: SkillSet,
    pub missing: SkillSet,
}

impl ScoreBreakdown {
    /// Result for a job with no required keywords.
    pub fn zero_confidence() -> Self {
        Self {
            score: 0.0,
            matched: SkillSet::empty(),
            missing: SkillSet::empty(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to add a scoring strategy without touching the ranker,
/// the explainer or the handlers.
pub trait MatchScorer: Send + Sync {
    fn score(&self, candidate: &SkillSet, job: &JobRequirement) -> ScoreBreakdown;

    /// Backend label reported alongside results.
    fn name(&self) -> &'static str;
}

/// Which scorer to build at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScorerKind {
    Overlap,
    Weighted { required: f64, desired: f64 },
}

impl ScorerKind {
    pub fn build(self) -> Box<dyn MatchScorer> {
        match self {
            ScorerKind::Overlap => Box::new(OverlapRecallScorer),
            ScorerKind::Weighted { required, desired } => {
                Box::new(WeightedScorer::new(required, desired))
            }
        }
    }
}

/// Parses the backend name only; weights come from separate settings.
impl FromStr for ScorerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overlap" => Ok(ScorerKind::Overlap),
            "weighted" => Ok(ScorerKind::Weighted {
                required: WeightedScorer::DEFAULT_REQUIRED_WEIGHT,
                desired: WeightedScorer::DEFAULT_DESIRED_WEIGHT,
            }),
            other => Err(format!("unknown scorer '{other}' (expected 'overlap' or 'weighted')")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// OverlapRecallScorer (default)
// ────────────────────────────────────────────────────────────────────────────

/// Recall against requirements: `100 * |matched| / |required|`.
///
/// Extra candidate skills neither help nor hurt.
pub struct OverlapRecallScorer;

impl MatchScorer for OverlapRecallScorer {
    fn score(&self, candidate: &SkillSet, job: &JobRequirement) -> ScoreBreakdown {
        score_overlap(candidate, &job.required)
    }

    fn name(&self) -> &'static str {
        "overlap"
    }
}

/// Core recall computation over two sets.
pub fn score_overlap(candidate: &SkillSet, required: &SkillSet) -> ScoreBreakdown {
    if required.is_empty() {
        return ScoreBreakdown::zero_confidence();
    }

    let matched = candidate.intersection(required);
    let missing = required.difference(candidate);
    let score = to_percent(matched.len() as f64, required.len() as f64);

    ScoreBreakdown {
        score,
        matched,
        missing,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WeightedScorer
// ────────────────────────────────────────────────────────────────────────────

/// Blends required and desired coverage:
///
/// `100 * (w_req * |matched| + w_des * |desired ∩ candidate|) / (w_req * |required| + w_des * |desired|)`
///
/// With no desired keywords this equals the recall score. Matched/missing
/// are still reported over required keywords only.
pub struct WeightedScorer {
    required_weight: f64,
    desired_weight: f64,
}

impl WeightedScorer {
    pub const DEFAULT_REQUIRED_WEIGHT: f64 = 1.0;
    pub const DEFAULT_DESIRED_WEIGHT: f64 = 0.5;

    /// Negative or non-finite weights are treated as zero. A zero required
    /// weight falls back to the default so the denominator stays positive.
    pub fn new(required_weight: f64, desired_weight: f64) -> Self {
        let sanitize = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        let required_weight = match sanitize(required_weight) {
            w if w > 0.0 => w,
            _ => Self::DEFAULT_REQUIRED_WEIGHT,
        };
        Self {
            required_weight,
            desired_weight: sanitize(desired_weight),
        }
    }
}

impl Default for WeightedScorer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REQUIRED_WEIGHT, Self::DEFAULT_DESIRED_WEIGHT)
    }
}

impl MatchScorer for WeightedScorer {
    fn score(&self, candidate: &SkillSet, job: &JobRequirement) -> ScoreBreakdown {
        let recall = score_overlap(candidate, &job.required);
        if job.required.is_empty() {
            return recall;
        }

        let desired_hits = job.desired.overlap_count(candidate);
        let earned = self.required_weight * recall.matched.len() as f64
            + self.desired_weight * desired_hits as f64;
        let possible = self.required_weight * job.required.len() as f64
            + self.desired_weight * job.desired.len() as f64;

        ScoreBreakdown {
            score: to_percent(earned, possible),
            ..recall
        }
    }

    fn name(&self) -> &'static str {
        "weighted"
    }
}

/// `100 * part / whole`, rounded to one decimal, clamped to [0, 100].
fn to_percent(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    let raw = 100.0 * part / whole;
    ((raw * 10.0).round() / 10.0).clamp(0.0, 100.0)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::matching::normalizer::{AliasTable, KeywordNormalizer};
    use crate::matching::profile::JobStatus;
    use proptest::prelude::*;
    use proptest::sample::Index;
    use uuid::Uuid;

    /// Canonical keywords with no alias relationship between them.
    const VOCAB: &[&str] = &[
        "rust", "sql", "kafka", "docker", "aws", "python", "java", "redis", "graphql", "terraform",
    ];
    /// Keywords that never appear in `VOCAB`.
    const EXTRAS: &[&str] = &["cobol", "fortran", "haskell", "erlang", "elixir"];

    // -- Strategy helpers --

    fn arb_skills(vocab: &'static [&'static str]) -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(prop::sample::select(vocab), 0..8)
    }

    fn arb_non_empty_skills() -> impl Strategy<Value = Vec<&'static str>> {
        prop::collection::vec(prop::sample::select(VOCAB), 1..8)
    }

    fn skills(raw: &[&str]) -> SkillSet {
        SkillSet::from_raw(&KeywordNormalizer::new(AliasTable::builtin()), raw)
    }

    fn job(required: &[&str], desired: &[&str]) -> JobRequirement {
        let normalizer = KeywordNormalizer::new(AliasTable::builtin());
        JobRequirement::new(Uuid::from_u128(1), required, desired, JobStatus::Open, &normalizer)
    }

    fn scorers() -> Vec<Box<dyn MatchScorer>> {
        vec![
            Box::new(OverlapRecallScorer),
            Box::new(WeightedScorer::default()),
            Box::new(WeightedScorer::new(2.0, 1.5)),
        ]
    }

    proptest! {
        #[test]
        fn score_stays_within_bounds(
            cand in arb_skills(VOCAB),
            req in arb_skills(VOCAB),
            des in arb_skills(VOCAB),
        ) {
            let (candidate, j) = (skills(&cand), job(&req, &des));
            for scorer in scorers() {
                let result = scorer.score(&candidate, &j);
                prop_assert!((0.0..=100.0).contains(&result.score), "{} out of range", result.score);
                prop_assert_eq!((result.score * 10.0).round() / 10.0, result.score);
            }
        }

        #[test]
        fn matched_and_missing_partition_required(
            cand in arb_skills(VOCAB),
            req in arb_skills(VOCAB),
            des in arb_skills(VOCAB),
        ) {
            let (candidate, j) = (skills(&cand), job(&req, &des));
            for scorer in scorers() {
                let result = scorer.score(&candidate, &j);
                if j.required.is_empty() {
                    prop_assert_eq!(&result, &ScoreBreakdown::zero_confidence());
                    continue;
                }
                prop_assert_eq!(result.matched.len() + result.missing.len(), j.required.len());
                prop_assert_eq!(result.matched.overlap_count(&result.missing), 0);
                prop_assert!(result.matched.difference(&j.required).is_empty());
                prop_assert!(result.missing.difference(&j.required).is_empty());
                prop_assert_eq!(&result.matched, &candidate.intersection(&j.required));
            }
        }

        #[test]
        fn extra_skills_are_neutral(
            cand in arb_skills(VOCAB),
            extra in arb_skills(EXTRAS),
            req in arb_skills(VOCAB),
            des in arb_skills(VOCAB),
        ) {
            let j = job(&req, &des);
            let base = skills(&cand);
            let widened = skills(&[cand.clone(), extra].concat());
            for scorer in scorers() {
                prop_assert_eq!(scorer.score(&base, &j), scorer.score(&widened, &j));
            }
        }

        #[test]
        fn covering_a_required_skill_never_lowers_score(
            cand in arb_skills(VOCAB),
            req in arb_non_empty_skills(),
            des in arb_skills(VOCAB),
            pick in any::<Index>(),
        ) {
            let j = job(&req, &des);
            let added = req[pick.index(req.len())];
            let before = skills(&cand);
            let after = skills(&[cand.clone(), vec![added]].concat());
            for scorer in scorers() {
                let (old, new) = (scorer.score(&before, &j).score, scorer.score(&after, &j).score);
                prop_assert!(new >= old, "{}: {} < {}", scorer.name(), new, old);
            }
        }

        #[test]
        fn covering_a_desired_skill_never_lowers_weighted_score(
            cand in arb_skills(VOCAB),
            req in arb_non_empty_skills(),
            des in arb_non_empty_skills(),
            pick in any::<Index>(),
        ) {
            let j = job(&req, &des);
            let added = des[pick.index(des.len())];
            let before = skills(&cand);
            let after = skills(&[cand.clone(), vec![added]].concat());
            let scorer = WeightedScorer::default();
            prop_assert!(scorer.score(&after, &j).score >= scorer.score(&before, &j).score);
        }
    }
}
