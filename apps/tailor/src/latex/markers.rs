//! The fixed vocabulary of structural constructs the tailor recognizes.
//!
//! Anything not listed here is opaque pass-through text.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::SectionKind;

/// Generic "next heading" marker. A section ends where the next one begins.
pub const SECTION_PREFIX: &str = r"\section{";

pub const SUBHEADING_LIST_START: &str = r"\resumeSubHeadingListStart";
pub const SUBHEADING_LIST_END: &str = r"\resumeSubHeadingListEnd";
pub const ITEM_LIST_START: &str = r"\resumeItemListStart";
pub const ITEM_LIST_END: &str = r"\resumeItemListEnd";
pub const ITEMIZE_START: &str = r"\begin{itemize}[leftmargin=0.15in, label={}]";
pub const ITEMIZE_END: &str = r"\end{itemize}";
pub const DOCUMENT_END: &str = r"\end{document}";

/// Body of one braced field. Accepts escaped characters (`\&`, `\}`) and one level of
/// nested braces (`\textbf{x}`), matched lazily so adjacent fields never merge.
const FIELD_BODY: &str = r"(?:[^{}\\]|\\.|\{(?:[^{}\\]|\\.)*\})*?";

/// `\section{<Heading>}` for a section kind.
pub fn section_heading(kind: SectionKind) -> String {
    format!(r"\section{{{}}}", kind.heading())
}

fn braced_field() -> String {
    format!(r"\{{({FIELD_BODY})\}}")
}

/// `\resumeSubheading{a}{b}{c}{d}`, fields possibly split across lines.
pub static SUBHEADING: Lazy<Regex> = Lazy::new(|| {
    let f = braced_field();
    Regex::new(&format!(r"(?s)\\resumeSubheading\s*{f}\s*{f}\s*{f}\s*{f}"))
        .expect("subheading pattern is valid")
});

/// `\resumeItem{text}`. Does not match `\resumeItemListStart` and friends.
pub static ITEM: Lazy<Regex> = Lazy::new(|| {
    let f = braced_field();
    Regex::new(&format!(r"(?s)\\resumeItem\s*{f}")).expect("item pattern is valid")
});

/// `\textbf{Label}{: a, b, c}`.
pub static BOLD_LABEL: Lazy<Regex> = Lazy::new(|| {
    let f = braced_field();
    Regex::new(&format!(r"(?s)\\textbf\s*{f}\s*\{{:\s*({FIELD_BODY})\}}"))
        .expect("bold-label pattern is valid")
});

/// Any escape sequence produced by the renderer's escape table.
pub static ESCAPE_SEQUENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\textasciitilde\{\}|\\textasciicircum\{\}|\\textbackslash\{\}|\\[%$#&_{}]")
        .expect("escape pattern is valid")
});
