//! Recommendation pipeline: orchestrates one request end to end.
//!
//! Flow: parse skills → match → rank/cap → AI suggest → merge → response.
//!
//! Only input validation can fail. AI problems surface as fewer suggestions or
//! template descriptions, never as an error.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::config::Config;
use crate::dataset::Dataset;
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::job::SkillSet;
use crate::models::recommendation::{Recommendation, Source};
use crate::recommend::describe::Describer;
use crate::recommend::matcher::{rank_matches, SkillMatcher};
use crate::recommend::merger::merge;
use crate::recommend::suggest::SuggestionClient;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Skills as sent by clients: a JSON list or a single comma-separated string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Text(String),
}

impl SkillsInput {
    pub fn to_skill_set(&self) -> SkillSet {
        match self {
            SkillsInput::List(items) => items.iter().flat_map(|s| s.split(',')).collect(),
            SkillsInput::Text(raw) => SkillSet::from_delimited(raw),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    pub skills: SkillsInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub skills: Vec<String>,
    pub recommendations: Vec<Recommendation>,
    pub dataset_count: usize,
    pub ai_count: usize,
    /// False when no AI backend is configured; results are then dataset-only
    /// with template descriptions.
    pub ai_enabled: bool,
    pub generated_at: DateTime<Utc>,
}

/// Tunables for the pipeline, taken from `Config` at startup.
#[derive(Debug, Clone, Copy)]
pub struct RecommendSettings {
    pub fuzzy_threshold: f64,
    pub max_dataset_jobs: usize,
    pub max_ai_jobs: usize,
    pub ai_timeout: Duration,
}

impl From<&Config> for RecommendSettings {
    fn from(config: &Config) -> Self {
        Self {
            fuzzy_threshold: config.fuzzy_threshold,
            max_dataset_jobs: config.max_dataset_jobs,
            max_ai_jobs: config.max_ai_jobs,
            ai_timeout: Duration::from_secs(config.ai_timeout_secs),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Runs the full recommendation pipeline for one request.
///
/// Steps:
/// 1. normalize skills; empty → `AppError::Validation`
/// 2. match_skills() → rank_matches() (top `max_dataset_jobs`)
/// 3. suggest() with the dataset titles excluded (skipped when AI is off)
/// 4. merge() → descriptions attached, dataset entries first
pub async fn recommend(
    dataset: &Dataset,
    llm: &dyn TextGenerator,
    settings: &RecommendSettings,
    request: RecommendRequest,
) -> Result<RecommendationResponse, AppError> {
    // Step 1: Validate input
    let user_skills = request.skills.to_skill_set();
    if user_skills.is_empty() {
        return Err(AppError::Validation(
            "Please enter at least one skill".to_string(),
        ));
    }
    info!("Processing request for skills: {}", user_skills.joined());

    // Step 2: Dataset matches
    let matcher = SkillMatcher::new(settings.fuzzy_threshold);
    let matches = rank_matches(
        matcher.match_skills(&user_skills, dataset.jobs()),
        settings.max_dataset_jobs,
    );
    info!(
        "Found {} matching jobs from dataset (fuzzy threshold {:.2})",
        matches.len(),
        matcher.threshold()
    );

    // Step 3: AI suggestions
    let ai_enabled = llm.is_enabled();
    let suggestions = if ai_enabled {
        let existing: Vec<String> = matches.iter().map(|m| m.job.title.clone()).collect();
        SuggestionClient::new(llm, settings.ai_timeout, settings.max_ai_jobs)
            .suggest(&user_skills, &existing)
            .await
    } else {
        Vec::new()
    };

    // Step 4: Merge
    let describer = Describer::new(llm, settings.ai_timeout);
    let recommendations = merge(matches, &suggestions, &user_skills, &describer).await;

    let dataset_count = recommendations
        .iter()
        .filter(|r| r.source == Source::Dataset)
        .count();

    Ok(RecommendationResponse {
        request_id: Uuid::new_v4(),
        skills: user_skills.to_vec(),
        ai_count: recommendations.len() - dataset_count,
        dataset_count,
        recommendations,
        ai_enabled,
        generated_at: Utc::now(),
    })
}
