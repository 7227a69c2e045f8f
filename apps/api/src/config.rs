use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

use crate::matching::ranker::DEFAULT_PARALLEL_THRESHOLD;
use crate::matching::scorer::{ScorerKind, WeightedScorer};

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a value is malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub port: u16,
    pub rust_log: String,
    pub default_limit: i64,
    pub scorer: ScorerKind,
    pub parallel_threshold: usize,
    pub alias_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow!("Required environment variable 'DATABASE_URL' is not set"))?;

        let default_limit = parse_or(&lookup, "RECOMMENDATION_DEFAULT_LIMIT", 10_i64)?;
        if default_limit <= 0 {
            bail!("RECOMMENDATION_DEFAULT_LIMIT must be a positive integer");
        }

        Ok(Config {
            database_url,
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 10_u32)?,
            port: parse_or(&lookup, "PORT", 8080_u16)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            default_limit,
            scorer: scorer_from(&lookup)?,
            parallel_threshold: parse_or(
                &lookup,
                "SCORING_PARALLEL_THRESHOLD",
                DEFAULT_PARALLEL_THRESHOLD,
            )?,
            alias_file: lookup("SKILL_ALIAS_FILE")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}

fn scorer_from<F>(lookup: &F) -> Result<ScorerKind>
where
    F: Fn(&str) -> Option<String>,
{
    let kind = lookup("MATCH_SCORER")
        .unwrap_or_else(|| "overlap".to_string())
        .parse::<ScorerKind>()
        .map_err(|e| anyhow!("MATCH_SCORER: {e}"))?;

    match kind {
        ScorerKind::Overlap => Ok(kind),
        ScorerKind::Weighted { .. } => {
            let required = parse_or(
                lookup,
                "WEIGHTED_REQUIRED_WEIGHT",
                WeightedScorer::DEFAULT_REQUIRED_WEIGHT,
            )?;
            let desired = parse_or(
                lookup,
                "WEIGHTED_DESIRED_WEIGHT",
                WeightedScorer::DEFAULT_DESIRED_WEIGHT,
            )?;
            if !required.is_finite() || required <= 0.0 || !desired.is_finite() || desired < 0.0 {
                bail!("WEIGHTED_REQUIRED_WEIGHT must be > 0 and WEIGHTED_DESIRED_WEIGHT >= 0");
            }
            Ok(ScorerKind::Weighted { required, desired })
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
