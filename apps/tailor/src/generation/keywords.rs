//! Keyword extraction: one call per run turns the job description into the ordered
//! keyword list shared by every section rewrite.

use std::collections::HashSet;

use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::generation::prompts::{KEYWORDS_PROMPT_TEMPLATE, KEYWORDS_SYSTEM};
use crate::llm_client::prompts::json_system;
use crate::llm_client::{strip_json_fences, TextCompletion};

#[derive(Debug, Deserialize)]
struct KeywordsResponse {
    keywords: Vec<String>,
}

/// Asks the generation service for the job description's screening keywords.
///
/// A failed call is fatal for the run: every section rewrite depends on the list.
pub async fn extract_keywords(
    llm: &dyn TextCompletion,
    job_description: &str,
) -> Result<Vec<String>, AppError> {
    info!("Extracting keywords from the job description...");
    let prompt = KEYWORDS_PROMPT_TEMPLATE.replace("{job_description}", job_description);

    let raw = llm
        .complete(&prompt, &json_system(KEYWORDS_SYSTEM))
        .await
        .map_err(|e| AppError::Llm(format!("Keyword extraction failed: {e}")))?;

    let keywords = parse_keywords(&raw);
    if keywords.is_empty() {
        warn!("No keywords found in response: {raw}");
    } else {
        info!("Keywords identified: {}", keywords.join(", "));
    }
    Ok(keywords)
}

/// Accepts `{"keywords": [...]}`, a bare JSON array, or a comma/newline separated list.
/// Trims entries, drops empties and case-insensitive duplicates, keeps first-seen order.
pub fn parse_keywords(raw: &str) -> Vec<String> {
    let text = strip_json_fences(raw);

    let candidates: Vec<String> = serde_json::from_str::<KeywordsResponse>(text)
        .map(|r| r.keywords)
        .or_else(|_| serde_json::from_str::<Vec<String>>(text))
        .unwrap_or_else(|_| {
            text.split([',', '\n'])
                .map(|s| s.trim_start_matches(['-', '*', '•']).to_string())
                .collect()
        });

    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .filter(|k| seen.insert(k.to_lowercase()))
        .collect()
}
