// Résumé rewriting: keyword extraction and per-section regeneration.
// All LLM calls go through llm_client::TextCompletion.

pub mod keywords;
pub mod prompts;
pub mod reshaper;
pub mod response;

#[cfg(test)]
pub mod testing;

pub use keywords::extract_keywords;
pub use reshaper::Reshaper;
pub use response::ParseFailure;
