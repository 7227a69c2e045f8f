use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use crate::matching::normalizer::KeywordNormalizer;
use crate::matching::profile::{JobRequirement, JobStatus};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPostingRow {
    pub id: Uuid,
    pub title: String,
    pub skill_keywords: Vec<String>,
    pub desired_keywords: Vec<String>,
    /// "open" | "closed"
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl JobPostingRow {
    /// Unknown statuses are treated as closed so they never leak into recommendations.
    pub fn to_requirement(&self, normalizer: &KeywordNormalizer) -> JobRequirement {
        let status = self.status.parse::<JobStatus>().unwrap_or_else(|e| {
            warn!(job_id = %self.id, "{e}; treating job as closed");
            JobStatus::Closed
        });
        JobRequirement::new(
            self.id,
            &self.skill_keywords,
            &self.desired_keywords,
            status,
            normalizer,
        )
    }
}
