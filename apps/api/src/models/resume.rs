use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::normalizer::KeywordNormalizer;
use crate::matching::profile::CandidateProfile;

/// Resume as written by the extraction pipeline. Skills are raw strings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl ResumeRow {
    pub fn to_profile(&self, normalizer: &KeywordNormalizer) -> CandidateProfile {
        CandidateProfile::new(self.id, &self.skills, normalizer)
    }
}
