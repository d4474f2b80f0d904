// Résumé document layer: locate sections by heading markers, extract typed records,
// render records back into the macro dialect, and splice them into the original text.
// Nothing in here talks to the network.

pub mod document;
pub mod extractor;
pub mod locator;
pub mod markers;
pub mod patcher;
pub mod renderer;

pub use document::ResumeDocument;
pub use patcher::Patcher;
pub use renderer::{render, SectionContent};
