//! Description Generator: one LLM call per title, template on any failure.

use std::time::Duration;

use tracing::warn;

use crate::llm_client::prompts::PLAIN_TEXT_SYSTEM;
use crate::llm_client::{LlmError, TextGenerator};
use crate::models::job::SkillSet;
use crate::recommend::prompts::{DESCRIBE_PROMPT_TEMPLATE, GENERIC_SKILLS};

pub struct Describer<'a> {
    llm: &'a dyn TextGenerator,
    timeout: Duration,
}

impl<'a> Describer<'a> {
    pub fn new(llm: &'a dyn TextGenerator, timeout: Duration) -> Self {
        Self { llm, timeout }
    }

    /// Returns a short description of the role. Never empty.
    pub async fn describe(&self, title: &str, matched_skills: &SkillSet) -> String {
        match self.generate(title, matched_skills).await {
            Ok(text) => text,
            Err(LlmError::Disabled) => template_description(title, matched_skills),
            Err(e) => {
                warn!("AI description for '{title}' failed, using template: {e}");
                template_description(title, matched_skills)
            }
        }
    }

    async fn generate(&self, title: &str, matched_skills: &SkillSet) -> Result<String, LlmError> {
        let prompt = DESCRIBE_PROMPT_TEMPLATE
            .replace("{title}", title)
            .replace("{skills}", &skills_text(matched_skills));

        let text = tokio::time::timeout(self.timeout, self.llm.generate(&prompt, PLAIN_TEXT_SYSTEM))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text.to_string())
    }
}

/// Deterministic fallback: `A {title} role focusing on {skills}.`
pub fn template_description(title: &str, matched_skills: &SkillSet) -> String {
    let title = match title.trim() {
        "" => "IT",
        t => t,
    };
    format!("A {title} role focusing on {}.", skills_text(matched_skills))
}

fn skills_text(skills: &SkillSet) -> String {
    if skills.is_empty() {
        GENERIC_SKILLS.to_string()
    } else {
        skills.joined()
    }
}
