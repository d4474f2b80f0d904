//! Section Locator: finds the byte range of a named section by marker search.
//!
//! A section's payload starts right after its heading marker and runs up to the next
//! heading (or the end of the document). An absent heading is `None`, not an error:
//! callers treat the section as empty and skip it.

use std::ops::Range;

use crate::latex::markers::{section_heading, SECTION_PREFIX};
use crate::models::SectionKind;

/// A located section payload, borrowed from the document it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocatedSection<'a> {
    pub text: &'a str,
    /// Offset just past the section marker.
    pub start: usize,
    /// Offset of the next heading, or the document length.
    pub end: usize,
}

impl LocatedSection<'_> {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// Locates the payload following the first `section_marker`, bounded by the first
/// `next_marker` after it. Offsets are relative to `document`.
pub fn locate<'a>(
    document: &'a str,
    section_marker: &str,
    next_marker: &str,
) -> Option<LocatedSection<'a>> {
    let marker_at = document.find(section_marker)?;
    let start = marker_at + section_marker.len();

    let end = document[start..]
        .find(next_marker)
        .map_or(document.len(), |offset| start + offset);

    Some(LocatedSection {
        text: &document[start..end],
        start,
        end,
    })
}

/// Locates one of the known résumé sections by its `\section{...}` heading.
pub fn locate_section(document: &str, kind: SectionKind) -> Option<LocatedSection<'_>> {
    locate(document, &section_heading(kind), SECTION_PREFIX)
}
