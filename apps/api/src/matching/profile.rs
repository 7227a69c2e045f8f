//! Request-scoped matching inputs built from store records.
//!
//! Profiles are normalized once at construction and never mutated afterwards.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::matching::normalizer::KeywordNormalizer;
use crate::matching::skill_set::SkillSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Open,
    Closed,
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(JobStatus::Open),
            "closed" => Ok(JobStatus::Closed),
            other => Err(format!("unknown job status '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CandidateProfile {
    pub id: Uuid,
    pub skills: SkillSet,
}

impl CandidateProfile {
    pub fn new<S: AsRef<str>>(id: Uuid, raw_skills: &[S], normalizer: &KeywordNormalizer) -> Self {
        Self {
            id,
            skills: SkillSet::from_raw(normalizer, raw_skills),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JobRequirement {
    pub id: Uuid,
    pub required: SkillSet,
    /// Nice-to-have keywords. Disjoint from `required`.
    pub desired: SkillSet,
    pub status: JobStatus,
}

impl JobRequirement {
    pub fn new<S: AsRef<str>>(
        id: Uuid,
        required_raw: &[S],
        desired_raw: &[S],
        status: JobStatus,
        normalizer: &KeywordNormalizer,
    ) -> Self {
        let required = SkillSet::from_raw(normalizer, required_raw);
        // A keyword listed both ways counts as required.
        let desired = SkillSet::from_raw(normalizer, desired_raw).difference(&required);
        Self {
            id,
            required,
            desired,
            status,
        }
    }

    pub fn is_open(&self) -> bool {
        self.status == JobStatus::Open
    }
}

/// Anything that can be ranked against a pool of its counterparts.
///
/// A candidate ranks jobs; a job ranks candidates. `orient` puts a pair into
/// (candidate, job) order so scoring is the same in both directions.
pub trait Matchable: Sync {
    type Counterpart: Matchable;

    fn match_id(&self) -> Uuid;

    /// Whether this item takes part in recommendation by default.
    fn is_eligible(&self) -> bool;

    fn orient<'a>(
        &'a self,
        other: &'a Self::Counterpart,
    ) -> (&'a CandidateProfile, &'a JobRequirement);
}

impl Matchable for CandidateProfile {
    type Counterpart = JobRequirement;

    fn match_id(&self) -> Uuid {
        self.id
    }

    fn is_eligible(&self) -> bool {
        true
    }

    fn orient<'a>(&'a self, job: &'a JobRequirement) -> (&'a CandidateProfile, &'a JobRequirement) {
        (self, job)
    }
}

impl Matchable for JobRequirement {
    type Counterpart = CandidateProfile;

    fn match_id(&self) -> Uuid {
        self.id
    }

    fn is_eligible(&self) -> bool {
        self.is_open()
    }

    fn orient<'a>(
        &'a self,
        candidate: &'a CandidateProfile,
    ) -> (&'a CandidateProfile, &'a JobRequirement) {
        (candidate, self)
    }
}
