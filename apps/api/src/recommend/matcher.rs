//! Skill Matcher: pure set matching of user skills against the dataset.
//!
//! Algorithm, per job in dataset order:
//! 1. exact = user_skills ∩ required_skills (both normalized)
//! 2. near  = (user, required) pairs with Jaro-Winkler ≥ threshold, skipping
//!    required skills already matched exactly and tokens shorter than 3 chars
//! 3. exact non-empty → EXACT; else near non-empty → FUZZY; else skip the job
//!
//! No state, no I/O: identical inputs always give identical output.

use std::cmp::Reverse;

use strsim::jaro_winkler;

use crate::models::job::{JobRecord, SkillSet};
use crate::models::recommendation::{MatchResult, MatchType, NearMatch, Source};

/// Default similarity at or above which two skills are considered the same.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.9;

/// Skills shorter than this are only ever compared exactly.
const MIN_FUZZY_LEN: usize = 3;

#[derive(Debug, Clone, Copy)]
pub struct SkillMatcher {
    threshold: f64,
}

impl Default for SkillMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl SkillMatcher {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Returns every job that shares at least one skill with the user, exactly
    /// or fuzzily, in dataset scan order.
    pub fn match_skills(&self, user_skills: &SkillSet, jobs: &[JobRecord]) -> Vec<MatchResult> {
        if user_skills.is_empty() {
            return Vec::new();
        }

        jobs.iter()
            .filter_map(|job| self.match_job(user_skills, job))
            .collect()
    }

    fn match_job(&self, user_skills: &SkillSet, job: &JobRecord) -> Option<MatchResult> {
        let matched_skills = user_skills.intersection(&job.required_skills);
        let near_matches = self.near_matches(user_skills, &job.required_skills, &matched_skills);

        let match_type = if !matched_skills.is_empty() {
            MatchType::Exact
        } else if !near_matches.is_empty() {
            MatchType::Fuzzy
        } else {
            return None;
        };

        Some(MatchResult {
            job: job.clone(),
            matched_skills,
            near_matches,
            match_type,
            source: Source::Dataset,
        })
    }

    /// Best fuzzy partner for each required skill not already matched exactly.
    fn near_matches(
        &self,
        user_skills: &SkillSet,
        required: &SkillSet,
        exact: &SkillSet,
    ) -> Vec<NearMatch> {
        let mut found = Vec::new();

        for job_skill in required.iter().filter(|s| !exact.contains(s)) {
            if job_skill.chars().count() < MIN_FUZZY_LEN {
                continue;
            }

            let best = user_skills
                .iter()
                .filter(|u| *u != job_skill && u.chars().count() >= MIN_FUZZY_LEN)
                .map(|u| (u, jaro_winkler(u, job_skill)))
                .filter(|(_, similarity)| *similarity >= self.threshold)
                .max_by(|a, b| a.1.total_cmp(&b.1));

            if let Some((user_skill, similarity)) = best {
                found.push(NearMatch {
                    user_skill: user_skill.to_string(),
                    job_skill: job_skill.to_string(),
                    similarity,
                });
            }
        }

        found
    }
}

/// Orders matches by exact-match count, then near-match count, both descending,
/// and keeps the first `limit`. The sort is stable, so ties stay in scan order.
pub fn rank_matches(mut matches: Vec<MatchResult>, limit: usize) -> Vec<MatchResult> {
    matches.sort_by_key(|m| Reverse((m.matched_skills.len(), m.near_matches.len())));
    matches.truncate(limit);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(title: &str, skills: &str) -> JobRecord {
        JobRecord {
            title: title.to_string(),
            required_skills: SkillSet::from_delimited(skills),
            description: String::new(),
            certifications: None,
        }
    }

    fn skills(raw: &str) -> SkillSet {
        SkillSet::from_delimited(raw)
    }

    #[test]
    fn test_case_varied_input_matches_exactly() {
        let dataset = vec![job("Backend Developer", "python, sql")];
        let results = SkillMatcher::default().match_skills(&skills("Python, SQL"), &dataset);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].job.title, "Backend Developer");
        assert_eq!(results[0].match_type, MatchType::Exact);
        assert_eq!(results[0].matched_skills.to_vec(), vec!["python", "sql"]);
        assert_eq!(results[0].source, Source::Dataset);
    }

    #[test]
    fn test_typo_matches_fuzzily_above_threshold() {
        let dataset = vec![job("Backend Developer", "python")];
        let results = SkillMatcher::default().match_skills(&skills("Pythn"), &dataset);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_type, MatchType::Fuzzy);
        assert!(results[0].matched_skills.is_empty());
        assert_eq!(results[0].near_matches[0].user_skill, "pythn");
        assert_eq!(results[0].near_matches[0].job_skill, "python");
        assert!(results[0].near_matches[0].similarity >= DEFAULT_FUZZY_THRESHOLD);
    }

    #[test]
    fn test_typo_below_threshold_yields_nothing() {
        let dataset = vec![job("Backend Developer", "python")];
        let results = SkillMatcher::new(0.99).match_skills(&skills("Pythn"), &dataset);
        assert!(results.is_empty());
    }

    #[test]
    fn test_java_does_not_fuzzy_match_javascript() {
        let dataset = vec![job("Frontend Developer", "javascript, react")];
        let results = SkillMatcher::default().match_skills(&skills("java"), &dataset);
        assert!(results.is_empty());
    }

    #[test]
    fn test_short_skills_are_never_fuzzy() {
        let dataset = vec![job("Go Developer", "go")];
        let results = SkillMatcher::new(0.0).match_skills(&skills("git"), &dataset);
        assert!(results.is_empty());
    }

    #[test]
    fn test_empty_skills_match_nothing() {
        let dataset = vec![job("Backend Developer", "python"), job("SRE", "linux")];
        assert!(SkillMatcher::default()
            .match_skills(&SkillSet::new(), &dataset)
            .is_empty());
    }

    #[test]
    fn test_no_overlap_is_excluded() {
        let dataset = vec![
            job("Backend Developer", "python, sql"),
            job("Designer", "figma, photoshop"),
        ];
        let results = SkillMatcher::default().match_skills(&skills("python"), &dataset);
        assert_eq!(results.len(), 1);
        assert!(results
            .iter()
            .all(|r| !r.matched_skills.is_empty() || !r.near_matches.is_empty()));
    }

    #[test]
    fn test_exact_wins_over_fuzzy_for_the_same_job() {
        let dataset = vec![job("Data Engineer", "python, spark")];
        let results = SkillMatcher::default().match_skills(&skills("python, sparkk"), &dataset);
        assert_eq!(results[0].match_type, MatchType::Exact);
        assert_eq!(results[0].near_matches.len(), 1);
        assert_eq!(results[0].near_matches[0].job_skill, "spark");
    }

    #[test]
    fn test_exactly_matched_skill_is_not_also_near() {
        let dataset = vec![job("Backend Developer", "python")];
        let results = SkillMatcher::default().match_skills(&skills("python, pythn"), &dataset);
        assert!(results[0].near_matches.is_empty());
    }

    #[test]
    fn test_match_is_idempotent_and_keeps_scan_order() {
        let dataset = vec![
            job("A", "rust"),
            job("B", "python"),
            job("C", "rust, python"),
        ];
        let matcher = SkillMatcher::default();
        let user = skills("rust, python");
        let first = matcher.match_skills(&user, &dataset);
        let second = matcher.match_skills(&user, &dataset);

        assert_eq!(first, second);
        let titles: Vec<_> = first.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_rank_orders_by_match_count_and_caps() {
        let dataset = vec![
            job("A", "rust"),
            job("B", "rust, python, sql"),
            job("C", "python"),
            job("D", "rust, python"),
        ];
        let matches = SkillMatcher::default().match_skills(&skills("rust, python, sql"), &dataset);
        let ranked = rank_matches(matches, 3);

        let titles: Vec<_> = ranked.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "D", "A"]);
    }

    #[test]
    fn test_rank_ties_keep_scan_order() {
        let dataset = vec![job("First", "rust"), job("Second", "rust")];
        let matches = SkillMatcher::default().match_skills(&skills("rust"), &dataset);
        let ranked = rank_matches(matches, 5);
        assert_eq!(ranked[0].job.title, "First");
        assert_eq!(ranked[1].job.title, "Second");
    }

    #[test]
    fn test_threshold_is_clamped() {
        assert_eq!(SkillMatcher::new(1.7).threshold(), 1.0);
        assert_eq!(SkillMatcher::new(-1.0).threshold(), 0.0);
    }
}
