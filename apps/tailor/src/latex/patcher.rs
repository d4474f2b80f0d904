//! Patcher: splices rendered sections into the document and writes it out.
//!
//! The patcher exclusively owns the document for the whole replace sequence, applying
//! one section at a time.

use std::io::Write;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::latex::document::ResumeDocument;
use crate::latex::markers::{section_heading, DOCUMENT_END, ITEMIZE_END, SECTION_PREFIX};
use crate::models::SectionKind;

pub struct Patcher {
    document: ResumeDocument,
}

impl Patcher {
    pub fn new(document: ResumeDocument) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    /// Replaces a section's payload with `markup`.
    ///
    /// Experience and Education replace their whole located range. Technical Skills
    /// only replaces the list block between its heading and the first `\end{itemize}`
    /// after it, leaving whatever follows the block in place.
    pub fn replace(&mut self, kind: SectionKind, markup: &str) -> Result<(), AppError> {
        let range = match kind {
            SectionKind::TechnicalSkills => self.skills_block_range()?,
            _ => self
                .document
                .range(kind)
                .ok_or(AppError::RangeNotFound(kind))?,
        };

        debug!(
            "Replacing {kind} bytes {}..{} with {} bytes",
            range.start,
            range.end,
            markup.len()
        );
        self.document.splice(range, markup);
        Ok(())
    }

    /// Scans forward from the Technical Skills heading to the first list terminator
    /// before the next section heading. Independent of the locator's recorded range.
    fn skills_block_range(&self) -> Result<std::ops::Range<usize>, AppError> {
        let kind = SectionKind::TechnicalSkills;
        let text = self.document.text();
        let heading = section_heading(kind);

        let start = text
            .find(&heading)
            .map(|at| at + heading.len())
            .ok_or(AppError::RangeNotFound(kind))?;
        let limit = text[start..]
            .find(SECTION_PREFIX)
            .map_or(text.len(), |offset| start + offset);
        let end = text[start..limit]
            .find(ITEMIZE_END)
            .map(|offset| start + offset + ITEMIZE_END.len())
            .ok_or(AppError::TerminatorNotFound(kind))?;

        Ok(start..end)
    }

    /// Appends the document-end marker if the text does not already end with it.
    /// Idempotent.
    pub fn finalize(&mut self) -> &str {
        if !self.document.text().trim_end().ends_with(DOCUMENT_END) {
            debug!("Appending missing {DOCUMENT_END}");
            let text = self.document.text_mut();
            text.push('\n');
            text.push_str(DOCUMENT_END);
        }
        self.document.text()
    }

    /// Finalizes and writes the document to `path`.
    ///
    /// The content goes to a temporary file next to the target which is then renamed
    /// over it, so a failed write never leaves a half-written output behind.
    pub fn save(&mut self, path: &Path) -> Result<(), AppError> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let content = self.finalize().to_string();
        let mut file = tempfile::NamedTempFile::new_in(dir)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        file.persist(path).map_err(|e| AppError::Io(e.error))?;

        info!("Wrote {} ({} bytes)", path.display(), content.len());
        Ok(())
    }
}
