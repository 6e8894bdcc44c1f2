// Shared prompt fragments. Each service that calls the LLM keeps its own
// prompts.rs alongside it and pulls cross-cutting pieces from here.

/// System prompt fragment that keeps answers plain and parseable.
pub const PLAIN_TEXT_SYSTEM: &str = "You are a concise, factual IT career advisor. \
    Respond with plain text only. \
    Do NOT use markdown formatting, headings, or code fences. \
    Do NOT include explanations, greetings, or apologies.";
