// Recommendation engine.
// Implements: skill matching, AI suggestions, descriptions, merging, and the request pipeline.
// All LLM calls go through the `TextGenerator` seam in llm_client.

pub mod describe;
pub mod handlers;
pub mod matcher;
pub mod merger;
pub mod pipeline;
pub mod prompts;
pub mod suggest;
