//! Orchestrator: runs one tailoring pass over a résumé.
//!
//! Flow: extract records → extract keywords → per section, in document order:
//!       regenerate → render → patch → save once at the end.
//!
//! An entry whose generation failed is rendered from its source record, so a section is
//! never shorter than the résumé it came from. Section-level problems (parse failures,
//! missing list terminators) are reported and skipped. Only a failed keyword call or a failed write aborts the run, and since the
//! output is written exactly once at the end, an aborted run writes nothing.

use std::collections::BTreeSet;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::generation::{extract_keywords, ParseFailure, Reshaper};
use crate::latex::{render, Patcher, ResumeDocument, SectionContent};
use crate::llm_client::TextCompletion;
use crate::models::{EducationEntry, ExperienceEntry, ResumeRecords, SectionKind};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub sections: BTreeSet<SectionKind>,
    pub bullet_target: usize,
    pub output: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionOutcome {
    Patched,
    Skipped(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SectionReport {
    pub kind: SectionKind,
    pub located: bool,
    pub extracted: usize,
    pub generated: usize,
    pub failures: Vec<ParseFailure>,
    pub outcome: SectionOutcome,
}

impl SectionReport {
    fn new(kind: SectionKind, located: bool, extracted: usize) -> Self {
        Self {
            kind,
            located,
            extracted,
            generated: 0,
            failures: Vec::new(),
            outcome: SectionOutcome::Skipped(String::new()),
        }
    }

    fn skip(mut self, reason: &str) -> Self {
        info!("Skipping {}: {reason}", self.kind);
        self.outcome = SectionOutcome::Skipped(reason.to_string());
        self
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub keywords: Vec<String>,
    pub sections: Vec<SectionReport>,
    pub output: PathBuf,
}

impl RunReport {
    pub fn section(&self, kind: SectionKind) -> Option<&SectionReport> {
        self.sections.iter().find(|s| s.kind == kind)
    }

    pub fn patched(&self) -> usize {
        self.sections
            .iter()
            .filter(|s| s.outcome == SectionOutcome::Patched)
            .count()
    }
}

/// Tailors `document` to `job_description` and writes the result to `options.output`.
pub async fn run(
    llm: &dyn TextCompletion,
    document: ResumeDocument,
    job_description: &str,
    options: &RunOptions,
) -> Result<RunReport, AppError> {
    let records = document.records();
    for kind in SectionKind::ALL {
        info!(
            "{kind}: {} ({} records)",
            if document.is_located(kind) { "located" } else { "absent" },
            records.count(kind)
        );
    }

    let keywords = extract_keywords(llm, job_description).await?;
    let reshaper = Reshaper::new(llm, &keywords, options.bullet_target);

    // Document order; absent sections are reported after the located ones.
    let mut order = document.sections_in_order();
    order.extend(SectionKind::ALL.into_iter().filter(|k| !document.is_located(*k)));

    let mut patcher = Patcher::new(document);
    let mut sections = Vec::with_capacity(order.len());

    for kind in order {
        let located = patcher.document().is_located(kind);
        let report = SectionReport::new(kind, located, records.count(kind));

        let report = if !located {
            report.skip("section not found in document")
        } else if !options.sections.contains(&kind) {
            report.skip("not selected")
        } else if report.extracted == 0 {
            report.skip("no records extracted")
        } else {
            rewrite_section(&reshaper, &mut patcher, &records, report).await?
        };
        sections.push(report);
    }

    patcher.save(&options.output)?;

    let report = RunReport {
        keywords,
        sections,
        output: options.output.clone(),
    };
    info!(
        "Patched {} of {} sections; saved as {}",
        report.patched(),
        report.sections.len(),
        report.output.display()
    );
    Ok(report)
}

/// Regenerates, renders and patches one located section.
async fn rewrite_section(
    reshaper: &Reshaper<'_>,
    patcher: &mut Patcher,
    records: &ResumeRecords,
    mut report: SectionReport,
) -> Result<SectionReport, AppError> {
    let kind = report.kind;

    let (content, generated, failures) = match kind {
        SectionKind::Experience => {
            let reshaped = reshaper.reshape_experience(&records.experience).await;
            let (entries, generated) = fall_back_to_source(
                reshaped.records,
                &records.experience,
                ExperienceEntry::is_empty,
            );
            (SectionContent::Experience(entries), generated, reshaped.failures)
        }
        SectionKind::Education => {
            let reshaped = reshaper.reshape_education(&records.education).await;
            let (entries, generated) = fall_back_to_source(
                reshaped.records,
                &records.education,
                EducationEntry::is_empty,
            );
            (SectionContent::Education(entries), generated, reshaped.failures)
        }
        SectionKind::TechnicalSkills => {
            let reshaped = reshaper.reshape_skills(&records.technical_skills).await;
            let generated = reshaped.records.len();
            (SectionContent::TechnicalSkills(reshaped.records), generated, reshaped.failures)
        }
    };

    report.generated = generated;
    if !failures.is_empty() {
        warn!("{kind}: {} generation responses unusable", failures.len());
    }
    report.failures = failures;

    if generated == 0 {
        return Ok(report.skip("no usable generated records"));
    }

    match patcher.replace(content.kind(), &render(&content)) {
        Ok(()) => {
            info!("Updated {kind} with {} records", report.generated);
            report.outcome = SectionOutcome::Patched;
        }
        Err(e) if e.is_section_local() => {
            error!("Could not update {kind}: {e}");
            report.outcome = SectionOutcome::Failed(e.to_string());
        }
        Err(e) => return Err(e),
    }
    Ok(report)
}

/// Pairs generated records with their sources, keeping the source wherever the
/// generated record is empty. Returns the merged list and how many were generated.
fn fall_back_to_source<T: Clone>(
    generated: Vec<T>,
    sources: &[T],
    is_empty: impl Fn(&T) -> bool,
) -> (Vec<T>, usize) {
    let mut count = 0;
    let merged = generated
        .into_iter()
        .zip(sources)
        .map(|(record, source)| {
            if is_empty(&record) {
                source.clone()
            } else {
                count += 1;
                record
            }
        })
        .collect();
    (merged, count)
}
