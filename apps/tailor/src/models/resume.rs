use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The résumé sections the tailor knows how to locate, extract and rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Experience,
    Education,
    TechnicalSkills,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Experience,
        SectionKind::Education,
        SectionKind::TechnicalSkills,
    ];

    /// Name as written inside the section heading, e.g. `\section{Technical Skills}`.
    pub fn heading(self) -> &'static str {
        match self {
            SectionKind::Experience => "Experience",
            SectionKind::Education => "Education",
            SectionKind::TechnicalSkills => "Technical Skills",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::TechnicalSkills => "skills",
        };
        f.write_str(name)
    }
}

impl FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "experience" => Ok(SectionKind::Experience),
            "education" => Ok(SectionKind::Education),
            "skills" | "technical_skills" | "technical-skills" => Ok(SectionKind::TechnicalSkills),
            other => Err(format!(
                "unknown section '{other}' (expected experience, education or skills)"
            )),
        }
    }
}

/// One job from the Experience section.
///
/// Every field is required when deserializing: a generation response missing any of
/// them does not have the expected shape and is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub job_title: String,
    pub company: String,
    pub location: String,
    /// Free text, e.g. "June 2020 -- Present".
    pub dates: String,
    pub bullet_points: Vec<String>,
}

impl ExperienceEntry {
    pub fn is_empty(&self) -> bool {
        self.job_title.is_empty()
            && self.company.is_empty()
            && self.location.is_empty()
            && self.dates.is_empty()
            && self.bullet_points.is_empty()
    }

    /// Total character count across all bullet points.
    pub fn bullet_chars(&self) -> usize {
        self.bullet_points.iter().map(|b| b.chars().count()).sum()
    }
}

/// One entry from the Education section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub institution: String,
    pub major: String,
    pub dates: String,
    /// Fourth subheading field. Generation responses usually omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl EducationEntry {
    pub fn is_empty(&self) -> bool {
        self.institution.is_empty()
            && self.major.is_empty()
            && self.dates.is_empty()
            && self.location.as_deref().map_or(true, str::is_empty)
    }
}

/// Category label → skills, in insertion order.
pub type SkillCategories = IndexMap<String, Vec<String>>;

/// Everything extracted from one résumé document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResumeRecords {
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub technical_skills: SkillCategories,
}

impl ResumeRecords {
    /// Number of records extracted for a section (categories for skills).
    pub fn count(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::Experience => self.experience.len(),
            SectionKind::Education => self.education.len(),
            SectionKind::TechnicalSkills => self.technical_skills.len(),
        }
    }
}
