//! Record Extractor: pulls typed records out of a located section's text.
//!
//! Field values are trimmed and unescaped, so records hold plain text and the
//! renderer can escape them again without doubling backslashes.

use regex::Captures;
use tracing::debug;

use crate::latex::markers::{BOLD_LABEL, ITEM, SUBHEADING};
use crate::latex::renderer::unescape_latex;
use crate::models::{EducationEntry, ExperienceEntry, SkillCategories};

/// Extracts every job from an Experience section.
///
/// Bullets for an entry are taken only from the text between its subheading and the
/// next subheading (or the end of the section), so one job never picks up another's.
pub fn extract_experience(section: &str) -> Vec<ExperienceEntry> {
    let headings: Vec<Captures<'_>> = SUBHEADING.captures_iter(section).collect();

    let entries: Vec<ExperienceEntry> = headings
        .iter()
        .enumerate()
        .map(|(i, caps)| {
            let body_start = caps.get(0).map_or(0, |m| m.end());
            let body_end = headings
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(section.len(), |m| m.start());

            ExperienceEntry {
                job_title: field(caps, 1),
                dates: field(caps, 2),
                company: field(caps, 3),
                location: field(caps, 4),
                bullet_points: extract_items(&section[body_start..body_end]),
            }
        })
        .collect();

    debug!("Extracted {} experience entries", entries.len());
    entries
}

/// Extracts every entry from an Education section.
pub fn extract_education(section: &str) -> Vec<EducationEntry> {
    let entries: Vec<EducationEntry> = SUBHEADING
        .captures_iter(section)
        .map(|caps| {
            let location = field(&caps, 4);
            EducationEntry {
                institution: field(&caps, 1),
                dates: field(&caps, 2),
                major: field(&caps, 3),
                location: (!location.is_empty()).then_some(location),
            }
        })
        .collect();

    debug!("Extracted {} education entries", entries.len());
    entries
}

/// Extracts the `\textbf{Label}{: a, b}` lines of a Technical Skills section.
///
/// Later duplicates of a label replace the earlier skills but keep the first position.
pub fn extract_skills(section: &str) -> SkillCategories {
    let mut skills = SkillCategories::new();

    for caps in BOLD_LABEL.captures_iter(section) {
        let label = field(&caps, 1);
        let values = caps
            .get(2)
            .map(|m| m.as_str())
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| unescape_latex(s).into_owned())
            .collect();
        skills.insert(label, values);
    }

    debug!("Extracted {} skill categories", skills.len());
    skills
}

/// Every `\resumeItem{...}` in `text`, in order.
fn extract_items(text: &str) -> Vec<String> {
    ITEM.captures_iter(text).map(|caps| field(&caps, 1)).collect()
}

fn field(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index)
        .map(|m| unescape_latex(m.as_str().trim()).into_owned())
        .unwrap_or_default()
}
