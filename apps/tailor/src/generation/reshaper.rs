//! Reshaper: rewrites extracted records with the generation service.
//!
//! One call per experience entry, one per education entry, one for the whole skills
//! map. A failed call or an unparseable response substitutes an empty record and is
//! reported as a [`ParseFailure`]; the caller decides what to do with empties.

use tracing::{info, warn};

use crate::generation::prompts::{
    EDUCATION_PROMPT_TEMPLATE, EDUCATION_SYSTEM, EXPERIENCE_PROMPT_TEMPLATE, EXPERIENCE_SYSTEM,
    SKILLS_PROMPT_TEMPLATE, SKILLS_SYSTEM,
};
use crate::generation::response::{parse_education, parse_experience, parse_skills, ParseFailure};
use crate::llm_client::prompts::{json_system, ATS_INSTRUCTION};
use crate::llm_client::TextCompletion;
use crate::models::{EducationEntry, ExperienceEntry, SectionKind, SkillCategories};

/// Upper bound on skill categories requested from the service. Not enforced here.
pub const MAX_SKILL_CATEGORIES: usize = 3;

/// Rewritten records for one section plus any responses that failed to parse.
#[derive(Debug, Clone, Default)]
pub struct Reshaped<T> {
    pub records: T,
    pub failures: Vec<ParseFailure>,
}

pub struct Reshaper<'a> {
    llm: &'a dyn TextCompletion,
    keywords: &'a [String],
    bullet_target: usize,
}

impl<'a> Reshaper<'a> {
    pub fn new(llm: &'a dyn TextCompletion, keywords: &'a [String], bullet_target: usize) -> Self {
        Self {
            llm,
            keywords,
            bullet_target: bullet_target.max(1),
        }
    }

    pub async fn reshape_experience(
        &self,
        entries: &[ExperienceEntry],
    ) -> Reshaped<Vec<ExperienceEntry>> {
        info!("Reshaping {} experience entries...", entries.len());
        let mut reshaped: Reshaped<Vec<ExperienceEntry>> = Reshaped::default();

        for original in entries {
            let prompt = self.experience_prompt(original);
            let entry = match self.generate(SectionKind::Experience, &prompt, EXPERIENCE_SYSTEM).await {
                Ok(raw) => parse_experience(&raw, self.bullet_target),
                Err(failure) => Err(failure),
            };

            let entry = match entry {
                Ok(mut entry) => {
                    if entry.job_title != original.job_title {
                        warn!(
                            "Generated title {:?} differs from {:?}; keeping the original",
                            entry.job_title, original.job_title
                        );
                        entry.job_title = original.job_title.clone();
                    }
                    entry
                }
                Err(failure) => {
                    log_failure(&failure);
                    reshaped.failures.push(failure);
                    ExperienceEntry::default()
                }
            };
            reshaped.records.push(entry);
        }

        reshaped
    }

    pub async fn reshape_education(
        &self,
        entries: &[EducationEntry],
    ) -> Reshaped<Vec<EducationEntry>> {
        info!("Reshaping {} education entries...", entries.len());
        let mut reshaped: Reshaped<Vec<EducationEntry>> = Reshaped::default();

        for original in entries {
            let prompt = EDUCATION_PROMPT_TEMPLATE
                .replace("{ats_instruction}", ATS_INSTRUCTION)
                .replace("{keywords}", &self.keywords.join(", "))
                .replace("{institution}", &original.institution)
                .replace("{major}", or_na(&original.major))
                .replace("{dates}", &original.dates);

            let entry = match self.generate(SectionKind::Education, &prompt, EDUCATION_SYSTEM).await {
                Ok(raw) => parse_education(&raw),
                Err(failure) => Err(failure),
            };

            let entry = match entry {
                Ok(mut entry) => {
                    if entry.location.is_none() {
                        entry.location = original.location.clone();
                    }
                    entry
                }
                Err(failure) => {
                    log_failure(&failure);
                    reshaped.failures.push(failure);
                    EducationEntry::default()
                }
            };
            reshaped.records.push(entry);
        }

        reshaped
    }

    pub async fn reshape_skills(&self, skills: &SkillCategories) -> Reshaped<SkillCategories> {
        info!("Reshaping {} skill categories...", skills.len());
        let skills_json = serde_json::to_string_pretty(skills).unwrap_or_default();
        let prompt = SKILLS_PROMPT_TEMPLATE
            .replace("{ats_instruction}", ATS_INSTRUCTION)
            .replace("{keywords}", &self.keywords.join(", "))
            .replace("{max_categories}", &MAX_SKILL_CATEGORIES.to_string())
            .replace("{skills_json}", &skills_json);

        let result = match self.generate(SectionKind::TechnicalSkills, &prompt, SKILLS_SYSTEM).await {
            Ok(raw) => parse_skills(&raw),
            Err(failure) => Err(failure),
        };

        match result {
            Ok(records) => Reshaped {
                records,
                failures: Vec::new(),
            },
            Err(failure) => {
                log_failure(&failure);
                Reshaped {
                    records: SkillCategories::new(),
                    failures: vec![failure],
                }
            }
        }
    }

    fn experience_prompt(&self, entry: &ExperienceEntry) -> String {
        let bullet_points = entry
            .bullet_points
            .iter()
            .map(|b| format!("- {b}"))
            .collect::<Vec<_>>()
            .join("\n");

        EXPERIENCE_PROMPT_TEMPLATE
            .replace("{ats_instruction}", ATS_INSTRUCTION)
            .replace("{keywords}", &self.keywords.join(", "))
            .replace("{bullet_count}", &self.bullet_target.to_string())
            .replace(
                "{bullet_length}",
                &bullet_length_budget(entry, self.bullet_target).to_string(),
            )
            .replace("{job_title}", &entry.job_title)
            .replace("{company}", &entry.company)
            .replace("{location}", &entry.location)
            .replace("{dates}", &entry.dates)
            .replace("{bullet_points}", &bullet_points)
    }

    /// One call to the service. Transport errors become a failure without raw text.
    async fn generate(
        &self,
        section: SectionKind,
        prompt: &str,
        persona: &str,
    ) -> Result<String, ParseFailure> {
        let raw = self
            .llm
            .complete(prompt, &json_system(persona))
            .await
            .map_err(|e| ParseFailure::new(section, "", format!("generation call failed: {e}")))?;
        info!("Generation response for {section}:\n{raw}");
        Ok(raw)
    }
}

/// Target characters per bullet: the entry's original bullet text spread over the
/// requested bullet count, rounded down.
pub fn bullet_length_budget(entry: &ExperienceEntry, bullet_target: usize) -> usize {
    entry.bullet_chars() / bullet_target.max(1)
}

fn or_na(value: &str) -> &str {
    if value.is_empty() {
        "N/A"
    } else {
        value
    }
}

fn log_failure(failure: &ParseFailure) {
    warn!(
        "Could not use the {} generation response ({}). Response was:\n{}",
        failure.section, failure.reason, failure.raw
    );
}
