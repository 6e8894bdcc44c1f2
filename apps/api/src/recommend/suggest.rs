//! AI Suggestion Client: asks the LLM for extra job titles the dataset missed.
//!
//! Any LLM failure (transport, timeout, auth, malformed output) becomes an
//! empty suggestion list. Callers never see an error from here.

use std::collections::HashSet;
use std::time::Duration;

use serde::Serialize;
use tracing::{info, warn};

use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::job::{normalize, SkillSet};
use crate::recommend::prompts::{SUGGEST_PROMPT_TEMPLATE, SUGGEST_SYSTEM};

/// A job proposed by the LLM. Only `title` is guaranteed to be meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AiSuggestion {
    pub title: String,
    pub required_skills: SkillSet,
    pub certifications: Option<String>,
}

impl AiSuggestion {
    #[cfg(test)]
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            required_skills: SkillSet::new(),
            certifications: None,
        }
    }
}

pub struct SuggestionClient<'a> {
    llm: &'a dyn TextGenerator,
    timeout: Duration,
    max_suggestions: usize,
}

impl<'a> SuggestionClient<'a> {
    pub fn new(llm: &'a dyn TextGenerator, timeout: Duration, max_suggestions: usize) -> Self {
        Self {
            llm,
            timeout,
            max_suggestions,
        }
    }

    /// Returns up to `max_suggestions` jobs whose titles are not in `exclude_titles`
    /// (case-insensitive). Empty on any failure.
    pub async fn suggest(
        &self,
        user_skills: &SkillSet,
        exclude_titles: &[String],
    ) -> Vec<AiSuggestion> {
        if user_skills.is_empty() || self.max_suggestions == 0 {
            return Vec::new();
        }

        let prompt = build_prompt(user_skills, exclude_titles, self.max_suggestions);
        let system = format!("{PLAIN_TEXT_SYSTEM} {SUGGEST_SYSTEM}");

        info!("Generating AI job suggestions for skills: {}", user_skills.joined());
        let raw = match self.call(&prompt, &system).await {
            Ok(text) => text,
            Err(e) => {
                warn!("AI suggestions unavailable: {e}");
                return Vec::new();
            }
        };

        let suggestions = parse_suggestions(&raw, exclude_titles, self.max_suggestions);
        if suggestions.is_empty() {
            warn!("AI response contained no usable job suggestions");
        } else {
            info!("Generated {} AI job suggestions", suggestions.len());
        }
        suggestions
    }

    async fn call(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        tokio::time::timeout(self.timeout, self.llm.generate(prompt, system))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))?
    }
}

fn build_prompt(user_skills: &SkillSet, exclude_titles: &[String], count: usize) -> String {
    let excluded = if exclude_titles.is_empty() {
        "none".to_string()
    } else {
        exclude_titles.join(", ")
    };

    SUGGEST_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{skills}", &user_skills.joined())
        .replace("{excluded}", &excluded)
}

/// Parses `Title | skill, skill | certs` lines, dropping list markers, excluded
/// and repeated titles, and anything that does not fit the format.
fn parse_suggestions(raw: &str, exclude_titles: &[String], limit: usize) -> Vec<AiSuggestion> {
    let mut seen: HashSet<String> = exclude_titles.iter().map(|t| normalize(t)).collect();
    let mut suggestions = Vec::new();

    for line in raw.lines() {
        if suggestions.len() >= limit {
            break;
        }

        let line = strip_list_marker(line.trim());
        if !line.contains('|') {
            continue;
        }

        let mut parts = line.splitn(3, '|').map(str::trim);
        let (Some(title), Some(skills)) = (parts.next(), parts.next()) else {
            continue;
        };
        let certifications = parts.next().filter(|c| !c.is_empty()).map(str::to_string);

        let title = clean_title(title);
        if title.is_empty() || !seen.insert(normalize(&title)) {
            continue;
        }

        suggestions.push(AiSuggestion {
            title,
            required_skills: SkillSet::from_delimited(skills),
            certifications,
        });
    }

    suggestions
}

/// Removes `1.`, `2)`, `-`, `*` style prefixes.
fn strip_list_marker(line: &str) -> &str {
    let digits_end = line
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(line.len());

    if digits_end > 0 {
        if let Some(rest) = line[digits_end..]
            .strip_prefix('.')
            .or_else(|| line[digits_end..].strip_prefix(')'))
        {
            return rest.trim_start();
        }
        return line;
    }

    line.strip_prefix(&['-', '*', '•'][..])
        .map(str::trim_start)
        .unwrap_or(line)
}

/// Drops a trailing parenthesized qualifier and markdown emphasis from a title.
fn clean_title(title: &str) -> String {
    let title = title.split('(').next().unwrap_or(title);
    title.trim().trim_matches('*').trim().to_string()
}
