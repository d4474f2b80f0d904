// Shared prompt fragments. Each service that calls the LLM keeps its own prompts.rs
// alongside it; this file only holds the cross-cutting pieces.

/// System prompt fragment that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction shared by every rewrite prompt: target the screening software, stay plausible.
pub const ATS_INSTRUCTION: &str = "\
    We are rewriting a resume so it passes Applicant Tracking System (ATS) screening. \
    Work the target keywords in naturally and keep every claim within the realm of \
    possibility for the role, company and dates given.";

/// Joins a system persona with the JSON-only fragment.
pub fn json_system(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_SYSTEM}")
}
