use serde::{Deserialize, Serialize};

use crate::models::job::{JobRecord, SkillSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    Fuzzy,
}

/// Provenance of a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Dataset,
    Ai,
}

/// A user skill accepted as a misspelling of a required skill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMatch {
    pub user_skill: String,
    pub job_skill: String,
    pub similarity: f64,
}

/// Per-request match of a job against the user's skills.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub job: JobRecord,
    /// Exact intersection of user skills and `job.required_skills`.
    pub matched_skills: SkillSet,
    pub near_matches: Vec<NearMatch>,
    pub match_type: MatchType,
    pub source: Source,
}

impl MatchResult {
    /// Required skills the user covers, exactly or through a near match.
    pub fn covered_skills(&self) -> SkillSet {
        let near: SkillSet = self.near_matches.iter().map(|m| m.job_skill.as_str()).collect();
        self.matched_skills.union(&near)
    }

    pub fn missing_skills(&self) -> SkillSet {
        self.job.required_skills.difference(&self.covered_skills())
    }
}

/// A rendered entry of the final recommendation list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub title: String,
    pub description: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub near_matches: Vec<NearMatch>,
    pub certifications: Option<String>,
    pub match_type: MatchType,
    pub source: Source,
}

impl Recommendation {
    pub fn from_match(result: MatchResult, description: String) -> Self {
        let missing_skills = result.missing_skills().to_vec();
        Self {
            title: result.job.title,
            description,
            matched_skills: result.matched_skills.to_vec(),
            missing_skills,
            near_matches: result.near_matches,
            certifications: result.job.certifications,
            match_type: result.match_type,
            source: result.source,
        }
    }
}
