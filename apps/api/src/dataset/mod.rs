//! Dataset Store: the read-only table of job roles loaded once at startup.
//!
//! The table is built explicitly in `main` and shared through `AppState` as
//! `Arc<Dataset>`; nothing mutates it after load.

use std::collections::HashSet;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use thiserror::Error;
use tracing::info;

use crate::models::job::{normalize, JobRecord, SkillSet};

const TITLE_HEADER: &str = "job title";
const SKILLS_HEADER: &str = "skills";
const DESCRIPTION_HEADER: &str = "job description";
const CERTIFICATIONS_HEADER: &str = "certifications";

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Dataset file not found: {0}")]
    Missing(String),

    #[error("Failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("Dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("Dataset row at line {line} has an empty job title")]
    EmptyTitle { line: u64 },

    #[error("Dataset row at line {line} duplicates job title '{title}'")]
    DuplicateTitle { line: u64, title: String },
}

/// Immutable in-memory job table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    jobs: Vec<JobRecord>,
}

impl Dataset {
    /// Wraps fixture records; callers guarantee unique titles.
    #[cfg(test)]
    pub fn from_records(jobs: Vec<JobRecord>) -> Self {
        Self { jobs }
    }

    /// The five-row table shipped with the service for demos and local runs.
    pub fn sample() -> Self {
        let jobs = SAMPLE_JOBS
            .iter()
            .map(|(title, skills, description, certifications)| JobRecord {
                title: title.to_string(),
                required_skills: SkillSet::from_delimited(skills),
                description: description.to_string(),
                certifications: Some(certifications.to_string()),
            })
            .collect();
        Self { jobs }
    }

    pub fn jobs(&self) -> &[JobRecord] {
        &self.jobs
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn find_by_title(&self, title: &str) -> Option<&JobRecord> {
        let key = normalize(title);
        self.jobs.iter().find(|j| j.title_key() == key)
    }
}

/// Loads the job table from a CSV file with a header row.
///
/// Required columns: `Job Title`, `Skills`. Optional: `Job Description`,
/// `Certifications`. Header names are matched case-insensitively.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset, DatasetError> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DatasetError::Missing(path.display().to_string()));
    }

    info!("Loading dataset from: {}", path.display());
    let reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?;

    let dataset = parse_records(reader)?;
    info!("Loaded {} job roles", dataset.len());
    Ok(dataset)
}

fn parse_records<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Dataset, DatasetError> {
    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| normalize(h) == name);

    let title_idx = column(TITLE_HEADER).ok_or(DatasetError::MissingColumn("Job Title"))?;
    let skills_idx = column(SKILLS_HEADER).ok_or(DatasetError::MissingColumn("Skills"))?;
    let description_idx = column(DESCRIPTION_HEADER);
    let certifications_idx = column(CERTIFICATIONS_HEADER);

    let mut jobs = Vec::new();
    let mut seen = HashSet::new();

    for record in reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let field = |idx: Option<usize>| -> Option<String> {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        if is_blank(&record) {
            continue;
        }

        let title = field(Some(title_idx)).ok_or(DatasetError::EmptyTitle { line })?;
        if !seen.insert(normalize(&title)) {
            return Err(DatasetError::DuplicateTitle { line, title });
        }

        jobs.push(JobRecord {
            required_skills: SkillSet::from_delimited(&field(Some(skills_idx)).unwrap_or_default()),
            description: field(description_idx).unwrap_or_default(),
            certifications: field(certifications_idx),
            title,
        });
    }

    Ok(Dataset { jobs })
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|f| f.trim().is_empty())
}

const SAMPLE_JOBS: &[(&str, &str, &str, &str)] = &[
    (
        "Python Developer",
        "python, django, flask, sql, git",
        "Develops and maintains software applications using Python programming language.",
        "Python Institute Certification (PCEP, PCAP)",
    ),
    (
        "Data Scientist",
        "python, pandas, numpy, scikit-learn, tensorflow, statistics",
        "Analyzes data to extract insights and develop ML models.",
        "IBM Data Science, Microsoft Certified: Azure Data Scientist Associate",
    ),
    (
        "DevOps Engineer",
        "python, aws, docker, kubernetes, jenkins, linux",
        "Manages CI/CD pipelines and cloud infrastructure.",
        "AWS Certified DevOps Engineer, Docker Certified Associate",
    ),
    (
        "Full Stack Developer",
        "python, javascript, react, node.js, html, css, mongodb",
        "Creates both frontend and backend components of web applications.",
        "MongoDB Developer and DBA Certification",
    ),
    (
        "AI Engineer",
        "python, tensorflow, pytorch, computer vision, nlp",
        "Develops AI solutions and deep learning models.",
        "Google TensorFlow Developer Certificate, NVIDIA Deep Learning Institute",
    ),
];
