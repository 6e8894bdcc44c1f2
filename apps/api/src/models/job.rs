use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Normalizes a single skill or title token: trimmed and lower-cased.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// A set of normalized skill strings.
///
/// Entries are trimmed and lower-cased on insertion; blank entries are dropped.
/// Backed by a `BTreeSet` so iteration (and therefore every rendered list) is sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(BTreeSet<String>);

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a comma-separated list such as `"Python, SQL , git"`.
    pub fn from_delimited(raw: &str) -> Self {
        raw.split(',').collect()
    }

    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = normalize(skill);
        if skill.is_empty() {
            return false;
        }
        self.0.insert(skill)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.0.contains(&normalize(skill))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn intersection(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.intersection(&other.0).cloned().collect())
    }

    pub fn difference(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.difference(&other.0).cloned().collect())
    }

    pub fn union(&self, other: &SkillSet) -> SkillSet {
        SkillSet(self.0.union(&other.0).cloned().collect())
    }

    /// Comma-joined rendering used in prompts and templates.
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill.as_ref());
        }
        set
    }
}

/// One row of the job-role dataset. Immutable after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub title: String,
    pub required_skills: SkillSet,
    /// May be empty; the description generator fills the gap at response time.
    pub description: String,
    pub certifications: Option<String>,
}

impl JobRecord {
    /// Case-insensitive key used for dataset uniqueness and merge deduplication.
    pub fn title_key(&self) -> String {
        normalize(&self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skillset_normalizes_and_dedups() {
        let set: SkillSet = ["Python", " python ", "SQL", ""].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("PYTHON"));
        assert!(set.contains("sql"));
    }

    #[test]
    fn test_from_delimited_drops_blank_entries() {
        let set = SkillSet::from_delimited("python, , Docker,,kubernetes ");
        assert_eq!(set.to_vec(), vec!["docker", "kubernetes", "python"]);
    }

    #[test]
    fn test_empty_input_is_valid_empty_set() {
        assert!(SkillSet::from_delimited("  ").is_empty());
    }

    #[test]
    fn test_joined_is_sorted() {
        let set = SkillSet::from_delimited("sql, aws, python");
        assert_eq!(set.joined(), "aws, python, sql");
    }

    #[test]
    fn test_title_key_ignores_case_and_padding() {
        let job = JobRecord {
            title: "  Data Scientist ".to_string(),
            required_skills: SkillSet::new(),
            description: String::new(),
            certifications: None,
        };
        assert_eq!(job.title_key(), "data scientist");
    }
}
