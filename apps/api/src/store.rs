//! Read-only access to resumes and job postings.
//!
//! The engine never talks to storage; handlers fetch through these traits and
//! hand fully materialized rows to the ranker. `AppState` carries them as
//! `Arc<dyn ...>` so tests can swap in the in-memory store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::job::JobPostingRow;
use crate::models::resume::ResumeRow;

#[async_trait]
pub trait ResumeStore: Send + Sync {
    async fn fetch_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError>;

    async fn list_resumes(&self) -> Result<Vec<ResumeRow>, AppError>;
}

#[async_trait]
pub trait JobStore: Send + Sync {
    /// Fetches a posting regardless of status.
    async fn fetch_job(&self, id: Uuid) -> Result<Option<JobPostingRow>, AppError>;

    async fn list_open_jobs(&self) -> Result<Vec<JobPostingRow>, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ResumeStore for PgStore {
    async fn fetch_resume(&self, id: Uuid) -> Result<Option<ResumeRow>, AppError> {
        let row = sqlx::query_as::<_, ResumeRow>(
            "SELECT id, skills, created_at FROM candidate_resumes WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_resumes(&self) -> Result<Vec<ResumeRow>, AppError> {
        let rows = sqlx::query_as::<_, ResumeRow>(
            "SELECT id, skills, created_at FROM candidate_resumes ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

#[async_trait]
impl JobStore for PgStore {
    async fn fetch_job(&self, id: Uuid) -> Result<Option<JobPostingRow>, AppError> {
        let row = sqlx::query_as::<_, JobPostingRow>(
            r#"
            SELECT id, title, skill_keywords, desired_keywords, status, created_at
            FROM job_postings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row)
    }

    async fn list_open_jobs(&self) -> Result<Vec<JobPostingRow>, AppError> {
        // One snapshot read per request; the ranker re-checks status anyway.
        let rows = sqlx::query_as::<_, JobPostingRow>(
            r#"
            SELECT id, title, skill_keywords, desired_keywords, status, created_at
            FROM job_postings
            WHERE status = 'open'
            ORDER BY id
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (tests)
// ────────────────────────────────────────────────────────────────────────────
