// All LLM prompt constants for the Recommend module.

/// System prompt for job suggestions, appended to `PLAIN_TEXT_SYSTEM`.
pub const SUGGEST_SYSTEM: &str = "You suggest realistic IT job roles for a candidate. \
    Output exactly one job per line and nothing else.";

/// Job suggestion prompt template.
/// Replace: {count}, {skills}, {excluded}
pub const SUGGEST_PROMPT_TEMPLATE: &str = "Suggest {count} distinct IT jobs for skills: {skills}.
Format each job on a new line as: Job Title | Required Skills (comma separated) | Certifications with Platforms (comma separated)
Avoid these titles: {excluded}.
Include 3-5 skills and 1-2 certifications with provider platforms in parentheses per job.";

/// Description prompt template.
/// Replace: {title}, {skills}
pub const DESCRIBE_PROMPT_TEMPLATE: &str =
    "Write a concise 1-2 sentence job description for a '{title}' role that requires {skills}.";

/// Wording used when a job has no relevant skills to list.
pub const GENERIC_SKILLS: &str = "various IT skills";
