//! Axum route handlers for the Matching API.
//!
//! Handlers fetch and normalize store rows, then hand them to the ranker.
//! The JSON contract uses camelCase field names.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::profile::{CandidateProfile, JobRequirement, JobStatus};
use crate::matching::ranker::{validate_limit, MatchResult};
use crate::matching::skill_set::SkillSet;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendJobsRequest {
    pub candidate_id: Uuid,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResumesRequest {
    pub job_id: Uuid,
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMatchRequest {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecommendation {
    pub job_id: Uuid,
    pub score: f64,
    pub matched_keywords: SkillSet,
    pub missing_keywords: SkillSet,
    pub detail: String,
}

impl From<MatchResult> for JobRecommendation {
    fn from(r: MatchResult) -> Self {
        Self {
            job_id: r.id,
            score: r.score,
            matched_keywords: r.matched_keywords,
            missing_keywords: r.missing_keywords,
            detail: r.detail,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRecommendation {
    pub resume_id: Uuid,
    pub score: f64,
    pub matched_keywords: SkillSet,
    pub missing_keywords: SkillSet,
    pub detail: String,
}

impl From<MatchResult> for ResumeRecommendation {
    fn from(r: MatchResult) -> Self {
        Self {
            resume_id: r.id,
            score: r.score,
            matched_keywords: r.matched_keywords,
            missing_keywords: r.missing_keywords,
            detail: r.detail,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendJobsResponse {
    pub candidate_id: Uuid,
    pub scorer: &'static str,
    pub recommendations: Vec<JobRecommendation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendResumesResponse {
    pub job_id: Uuid,
    pub scorer: &'static str,
    pub recommendations: Vec<ResumeRecommendation>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreMatchResponse {
    pub candidate_id: Uuid,
    pub job_id: Uuid,
    pub job_status: JobStatus,
    pub scorer: &'static str,
    pub score: f64,
    pub matched_keywords: SkillSet,
    pub missing_keywords: SkillSet,
    pub detail: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommendations/jobs
///
/// Ranks open job postings for one resume.
pub async fn handle_recommend_jobs(
    State(state): State<AppState>,
    payload: Result<Json<RecommendJobsRequest>, JsonRejection>,
) -> Result<Json<RecommendJobsResponse>, AppError> {
    // Malformed bodies (wrong types, fractional or overflowing limit) share the
    // validation envelope instead of axum's plain-text rejection.
    let Json(request) = payload?;
    let limit = request.limit.unwrap_or(state.config.default_limit);
    validate_limit(limit)?;

    let candidate = load_candidate(&state, request.candidate_id).await?;
    let jobs: Vec<JobRequirement> = state
        .jobs
        .list_open_jobs()
        .await?
        .iter()
        .map(|row| row.to_requirement(&state.normalizer))
        .collect();

    let results = state.ranker.recommend(&candidate, &jobs, limit)?;

    Ok(Json(RecommendJobsResponse {
        candidate_id: candidate.id,
        scorer: state.ranker.scorer_name(),
        recommendations: results.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/v1/recommendations/resumes
///
/// Ranks all resumes against one job posting. The posting may be closed.
pub async fn handle_recommend_resumes(
    State(state): State<AppState>,
    payload: Result<Json<RecommendResumesRequest>, JsonRejection>,
) -> Result<Json<RecommendResumesResponse>, AppError> {
    let Json(request) = payload?;
    let limit = request.limit.unwrap_or(state.config.default_limit);
    validate_limit(limit)?;

    let job = load_job(&state, request.job_id).await?;
    let candidates: Vec<CandidateProfile> = state
        .resumes
        .list_resumes()
        .await?
        .iter()
        .map(|row| row.to_profile(&state.normalizer))
        .collect();

    let results = state.ranker.recommend(&job, &candidates, limit)?;

    Ok(Json(RecommendResumesResponse {
        job_id: job.id,
        scorer: state.ranker.scorer_name(),
        recommendations: results.into_iter().map(Into::into).collect(),
    }))
}

/// POST /api/v1/matches/score
///
/// Scores one resume against one posting, whatever the posting's status.
pub async fn handle_score_match(
    State(state): State<AppState>,
    payload: Result<Json<ScoreMatchRequest>, JsonRejection>,
) -> Result<Json<ScoreMatchResponse>, AppError> {
    let Json(request) = payload?;
    let candidate = load_candidate(&state, request.candidate_id).await?;
    let job = load_job(&state, request.job_id).await?;

    let result = state.ranker.score_pair(&candidate, &job);

    Ok(Json(ScoreMatchResponse {
        candidate_id: candidate.id,
        job_id: job.id,
        job_status: job.status,
        scorer: state.ranker.scorer_name(),
        score: result.score,
        matched_keywords: result.matched_keywords,
        missing_keywords: result.missing_keywords,
        detail: result.detail,
    }))
}

async fn load_candidate(state: &AppState, id: Uuid) -> Result<CandidateProfile, AppError> {
    let row = state
        .resumes
        .fetch_resume(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
    Ok(row.to_profile(&state.normalizer))
}

async fn load_job(state: &AppState, id: Uuid) -> Result<JobRequirement, AppError> {
    let row = state
        .jobs
        .fetch_job(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))?;
    Ok(row.to_requirement(&state.normalizer))
}
