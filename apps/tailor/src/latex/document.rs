//! The résumé document: full text plus the located range of every known section.

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::latex::extractor::{extract_education, extract_experience, extract_skills};
use crate::latex::locator::locate_section;
use crate::models::{ResumeRecords, SectionKind};

/// A loaded résumé.
///
/// Ranges always describe the current `text`: every mutation goes through
/// [`ResumeDocument::splice`], which re-locates all sections afterwards, so an offset
/// captured before a patch is never reused after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeDocument {
    text: String,
    ranges: BTreeMap<SectionKind, Range<usize>>,
}

impl ResumeDocument {
    pub fn parse(text: impl Into<String>) -> Self {
        let mut document = Self {
            text: text.into(),
            ranges: BTreeMap::new(),
        };
        document.relocate();
        document
    }

    /// Reads and parses a document. A missing path is reported as `SourceFileMissing`.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        if !path.is_file() {
            return Err(AppError::SourceFileMissing(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        info!("Loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self::parse(text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current byte range of a section's payload, if its heading is present.
    pub fn range(&self, kind: SectionKind) -> Option<Range<usize>> {
        self.ranges.get(&kind).cloned()
    }

    pub fn is_located(&self, kind: SectionKind) -> bool {
        self.ranges.contains_key(&kind)
    }

    pub fn section_text(&self, kind: SectionKind) -> Option<&str> {
        self.ranges.get(&kind).map(|r| &self.text[r.clone()])
    }

    /// Located sections ordered by their position in the document.
    pub fn sections_in_order(&self) -> Vec<SectionKind> {
        let mut kinds: Vec<(usize, SectionKind)> =
            self.ranges.iter().map(|(k, r)| (r.start, *k)).collect();
        kinds.sort_unstable();
        kinds.into_iter().map(|(_, k)| k).collect()
    }

    /// Extracts records from every located section. Absent sections stay empty.
    pub fn records(&self) -> ResumeRecords {
        ResumeRecords {
            experience: self
                .section_text(SectionKind::Experience)
                .map(extract_experience)
                .unwrap_or_default(),
            education: self
                .section_text(SectionKind::Education)
                .map(extract_education)
                .unwrap_or_default(),
            technical_skills: self
                .section_text(SectionKind::TechnicalSkills)
                .map(extract_skills)
                .unwrap_or_default(),
        }
    }

    /// Replaces `range` of the current text with `replacement`, then re-locates sections.
    pub(crate) fn splice(&mut self, range: Range<usize>, replacement: &str) {
        self.text = splice(&self.text, range, replacement);
        self.relocate();
    }

    /// Mutable access for finalization, which only ever appends past every section.
    pub(crate) fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }

    fn relocate(&mut self) {
        self.ranges = SectionKind::ALL
            .into_iter()
            .filter_map(|kind| locate_section(&self.text, kind).map(|s| (kind, s.range())))
            .collect();
        debug!("Located sections: {:?}", self.ranges);
    }
}

/// `text[..start] + replacement + text[end..]`.
pub fn splice(text: &str, range: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() - range.len() + replacement.len());
    out.push_str(&text[..range.start]);
    out.push_str(replacement);
    out.push_str(&text[range.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ONE_JOB_NO_EDUCATION: &str = r"\documentclass{article}
\begin{document}
\section{Experience}
  \resumeSubHeadingListStart
    \resumeSubheading
      {Engineer}{2020 -- 2022}
      {Acme}{Remote}
      \resumeItemListStart
        \resumeItem{Built the billing pipeline}
        \resumeItem{Reduced deploy time by half}
      \resumeItemListEnd
  \resumeSubHeadingListEnd
\section{Technical Skills}
 \begin{itemize}[leftmargin=0.15in, label={}]
    \small{\item{
     \textbf{Languages}{: Python, Java} \\
    }}
 \end{itemize}
\end{document}
";

    #[test]
    fn test_one_job_and_no_education() {
        let doc = ResumeDocument::parse(ONE_JOB_NO_EDUCATION);
        let records = doc.records();
        assert_eq!(records.experience.len(), 1);
        assert_eq!(records.experience[0].job_title, "Engineer");
        assert_eq!(records.experience[0].bullet_points.len(), 2);
        assert!(records.education.is_empty());
        assert!(!doc.is_located(SectionKind::Education));
    }

    #[test]
    fn test_sections_in_document_order() {
        let doc = ResumeDocument::parse(ONE_JOB_NO_EDUCATION);
        assert_eq!(
            doc.sections_in_order(),
            vec![SectionKind::Experience, SectionKind::TechnicalSkills]
        );
    }

    #[test]
    fn test_splice_relocates_later_sections() {
        let mut doc = ResumeDocument::parse(ONE_JOB_NO_EDUCATION);
        let skills_before = doc.section_text(SectionKind::TechnicalSkills).unwrap().to_string();

        let range = doc.range(SectionKind::Experience).unwrap();
        doc.splice(range, "\nshort\n");

        assert_eq!(doc.section_text(SectionKind::Experience), Some("\nshort\n"));
        assert_eq!(
            doc.section_text(SectionKind::TechnicalSkills).unwrap(),
            skills_before,
            "later range must follow the text, not the stale offset"
        );
    }

    #[test]
    fn test_pure_splice() {
        assert_eq!(splice("abcdef", 2..4, "XYZ"), "abXYZef");
        assert_eq!(splice("abc", 3..3, "!"), "abc!");
    }

    #[test]
    fn test_load_missing_file_is_source_file_missing() {
        let err = ResumeDocument::load(Path::new("/definitely/not/here.tex")).unwrap_err();
        assert!(matches!(err, AppError::SourceFileMissing(_)));
    }

    #[test]
    fn test_load_reads_and_locates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(ONE_JOB_NO_EDUCATION.as_bytes()).unwrap();
        let doc = ResumeDocument::load(file.path()).unwrap();
        assert_eq!(doc.text(), ONE_JOB_NO_EDUCATION);
        assert!(doc.is_located(SectionKind::Experience));
    }
}
