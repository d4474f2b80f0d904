//! Validation of generation responses against the fixed record shapes.
//!
//! A response that does not deserialize into the expected shape becomes a
//! [`ParseFailure`] carrying the raw text; it never aborts the run.

use serde::Deserialize;

use crate::llm_client::strip_json_fences;
use crate::models::{EducationEntry, ExperienceEntry, SectionKind, SkillCategories};

/// A generation response that could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub section: SectionKind,
    pub raw: String,
    pub reason: String,
}

impl ParseFailure {
    pub fn new(section: SectionKind, raw: &str, reason: impl Into<String>) -> Self {
        Self {
            section,
            raw: raw.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SkillsResponse {
    technical_skills: SkillCategories,
}

/// Parses an experience response, keeping at most `max_bullets` bullet points.
pub fn parse_experience(raw: &str, max_bullets: usize) -> Result<ExperienceEntry, ParseFailure> {
    let mut entry: ExperienceEntry = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| ParseFailure::new(SectionKind::Experience, raw, e.to_string()))?;
    entry.bullet_points.truncate(max_bullets);
    Ok(entry)
}

pub fn parse_education(raw: &str) -> Result<EducationEntry, ParseFailure> {
    serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| ParseFailure::new(SectionKind::Education, raw, e.to_string()))
}

pub fn parse_skills(raw: &str) -> Result<SkillCategories, ParseFailure> {
    serde_json::from_str::<SkillsResponse>(strip_json_fences(raw))
        .map(|r| r.technical_skills)
        .map_err(|e| ParseFailure::new(SectionKind::TechnicalSkills, raw, e.to_string()))
}
