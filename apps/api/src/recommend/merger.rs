//! Recommendation Merger: dataset matches first, then new AI titles.
//!
//! Invariants of the returned list:
//! - no two entries share a normalized title
//! - every dataset entry precedes every AI entry
//! - dataset order and AI order are each preserved
//! - every entry carries a non-empty description

use std::collections::HashSet;

use tracing::debug;

use crate::models::job::{normalize, JobRecord, SkillSet};
use crate::models::recommendation::{MatchResult, MatchType, Recommendation, Source};
use crate::recommend::describe::Describer;
use crate::recommend::suggest::AiSuggestion;

pub async fn merge(
    dataset_matches: Vec<MatchResult>,
    ai_suggestions: &[AiSuggestion],
    user_skills: &SkillSet,
    describer: &Describer<'_>,
) -> Vec<Recommendation> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut merged = Vec::with_capacity(dataset_matches.len() + ai_suggestions.len());

    for result in dataset_matches {
        if !seen.insert(result.job.title_key()) {
            debug!("Dropping repeated dataset title '{}'", result.job.title);
            continue;
        }

        let description = if result.job.description.trim().is_empty() {
            describer
                .describe(&result.job.title, &result.covered_skills())
                .await
        } else {
            result.job.description.clone()
        };
        merged.push(Recommendation::from_match(result, description));
    }

    for suggestion in ai_suggestions {
        if !seen.insert(normalize(&suggestion.title)) {
            debug!("Skipping AI title already present: '{}'", suggestion.title);
            continue;
        }

        let result = ai_match(suggestion, user_skills);
        let description = describer
            .describe(&result.job.title, &result.matched_skills)
            .await;
        merged.push(Recommendation::from_match(result, description));
    }

    merged
}

/// AI entries are never EXACT: their skills come from the model, not the dataset.
fn ai_match(suggestion: &AiSuggestion, user_skills: &SkillSet) -> MatchResult {
    let inferable = suggestion
        .required_skills
        .union(&skills_named_in_title(&suggestion.title, user_skills));

    MatchResult {
        job: JobRecord {
            title: suggestion.title.clone(),
            required_skills: suggestion.required_skills.clone(),
            description: String::new(),
            certifications: suggestion.certifications.clone(),
        },
        matched_skills: user_skills.intersection(&inferable),
        near_matches: Vec::new(),
        match_type: MatchType::Fuzzy,
        source: Source::Ai,
    }
}

/// User skills that appear as whole words in a title, e.g. `python` in
/// "Python Developer" or `node.js` in "Node.js Engineer".
fn skills_named_in_title(title: &str, user_skills: &SkillSet) -> SkillSet {
    let words = word_padded(title);
    user_skills
        .iter()
        .filter(|skill| words.contains(&word_padded(skill)))
        .collect()
}

fn word_padded(text: &str) -> String {
    let spaced: String = normalize(text)
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '+' | '#') {
                c
            } else {
                ' '
            }
        })
        .collect();
    format!(" {} ", spaced.split_whitespace().collect::<Vec<_>>().join(" "))
}
