//! # pdfoutline
//!
//! Heading outline inference for PDF manuals.
//!
//! PDFs carry no reliable semantic structure, so headings are inferred from
//! typography: the most common font size is body text, larger sizes that
//! recur often enough are heading tiers, and numbering patterns refine the
//! level of a heading. Every heading gets the text it owns rendered as a
//! small markup fragment, and the headings are assembled into a tree.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_outline, render, OutlineOptions};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let outline = extract_outline("manual.pdf", &OutlineOptions::default())?;
//!
//!     println!("{}", render::to_text(&outline));
//!     println!("{}", render::to_json(&outline, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Font profiling**: body size and heading tiers from a size histogram
//! - **Numbering patterns**: configurable section and subsection patterns
//! - **Section bodies**: paragraphs, bullet lists and tables as markup
//! - **Parallel processing**: uses Rayon for per-page scanning

pub mod detect;
pub mod error;
pub mod model;
pub mod outline;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use detect::{is_pdf_bytes, pdf_version_from_bytes, pdf_version_from_path};
pub use error::{Error, Result};
pub use model::{FontProfile, Heading, HeadingNode, Line, LineKind, OutlineDocument, Word};
pub use outline::{OutlineExtractor, OutlineOptions};
pub use parser::{MemorySource, PageSource, PdfParser};
pub use render::JsonFormat;

use std::path::Path;

/// Infer the outline of a PDF file.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{extract_outline, OutlineOptions};
///
/// let options = OutlineOptions::new().with_max_pages(20);
/// let outline = extract_outline("manual.pdf", &options).unwrap();
/// println!("Headings: {}", outline.heading_count());
/// ```
pub fn extract_outline<P: AsRef<Path>>(path: P, options: &OutlineOptions) -> Result<OutlineDocument> {
    let path = path.as_ref();
    let parser = PdfParser::open(path)?;
    extract_outline_from_source(&parser, path, options)
}

/// Infer the outline of a PDF held in memory.
///
/// `name` is recorded as the document's path.
pub fn extract_outline_from_bytes(
    data: &[u8],
    name: impl AsRef<Path>,
    options: &OutlineOptions,
) -> Result<OutlineDocument> {
    let parser = PdfParser::from_bytes(data)?;
    extract_outline_from_source(&parser, name, options)
}

/// Infer the outline of any page source.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline_from_source, MemorySource, OutlineOptions, Word};
///
/// let title = (0..3).map(|i| Word::new("Title", 50.0 + i as f32 * 40.0, 80.0 + i as f32 * 40.0, 60.0, 24.0));
/// let body = (0..6).map(|i| Word::new("text", 50.0 + i as f32 * 30.0, 70.0 + i as f32 * 30.0, 100.0, 10.0));
/// let source = MemorySource::new(vec![title.chain(body).collect()]);
///
/// let outline = extract_outline_from_source(&source, "synthetic.pdf", &OutlineOptions::default())?;
/// assert_eq!(outline.headings.len(), 1);
/// assert_eq!(outline.headings[0].level, 1);
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub fn extract_outline_from_source<S: PageSource + ?Sized>(
    source: &S,
    pdf_path: impl AsRef<Path>,
    options: &OutlineOptions,
) -> Result<OutlineDocument> {
    OutlineExtractor::new(options.clone()).extract(source, pdf_path)
}

/// Infer the outline of a PDF file and render it as JSON.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{to_json, JsonFormat, OutlineOptions};
///
/// let json = to_json("manual.pdf", &OutlineOptions::default(), JsonFormat::Pretty).unwrap();
/// std::fs::write("outline.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(
    path: P,
    options: &OutlineOptions,
    format: JsonFormat,
) -> Result<String> {
    let outline = extract_outline(path, options)?;
    render::to_json(&outline, format)
}

/// Infer the outline of a PDF file and render it as an indented tree.
pub fn to_text<P: AsRef<Path>>(path: P, options: &OutlineOptions) -> Result<String> {
    let outline = extract_outline(path, options)?;
    Ok(render::to_text(&outline))
}
