//! Outline inference.
//!
//! The pipeline runs in a fixed order over the decoded pages: profile the
//! font sizes, classify grouped lines into headings, render every heading's
//! section body, then assemble the heading tree.

pub mod classifier;
pub mod grouping;
pub mod headings;
mod options;
pub mod profiler;
pub mod sections;
pub mod tree;

use std::path::Path;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::model::{OutlineDocument, Word};
use crate::parser::{load_pages, PageSource};

pub use classifier::LineClassifier;
pub use grouping::group_words;
pub use headings::{extract_headings, sort_reading_order};
pub use options::{
    OutlineOptions, DEFAULT_BULLET_GLYPHS, DEFAULT_SECTION_PATTERN, DEFAULT_SUBSECTION_PATTERN,
};
pub use profiler::{profile_pages, FontStatistics};
pub use sections::{SectionExtractor, SectionSpan};
pub use tree::{build_tree, depth_first, flatten};

/// Runs the outline pipeline with one set of options.
#[derive(Debug, Clone, Default)]
pub struct OutlineExtractor {
    options: OutlineOptions,
}

impl OutlineExtractor {
    /// Create an extractor.
    pub fn new(options: OutlineOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &OutlineOptions {
        &self.options
    }

    /// Decode up to `max_pages` pages from `source` and infer their outline.
    ///
    /// `pdf_path` is recorded in the result; its file name becomes `pdf`.
    pub fn extract<S: PageSource + ?Sized>(
        &self,
        source: &S,
        pdf_path: impl AsRef<Path>,
    ) -> Result<OutlineDocument> {
        let pages = load_pages(source, self.options.max_pages)?;
        log::debug!(
            "Scanning {} of {} page(s)",
            pages.len(),
            source.page_count()
        );
        self.extract_pages(&pages, pdf_path)
    }

    /// Infer the outline of already decoded pages. `pages[0]` is page 1.
    pub fn extract_pages(
        &self,
        pages: &[Vec<Word>],
        pdf_path: impl AsRef<Path>,
    ) -> Result<OutlineDocument> {
        self.options.validate()?;
        let profile = profile_pages(pages, &self.options)?;
        let classifier = LineClassifier::new(profile, &self.options)?;
        log::debug!(
            "{} heading tier(s) over body size {}",
            classifier.profile().tier_count(),
            classifier.profile().body_size
        );

        let mut headings = extract_headings(pages, &classifier, self.options.parallel);
        SectionExtractor::new(&classifier).attach_content(&mut headings, pages);
        let roots = build_tree(&headings);

        let pdf_path = pdf_path.as_ref();
        Ok(OutlineDocument {
            pdf: pdf_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            pdf_path: pdf_path.to_string_lossy().into_owned(),
            profile: classifier.profile().clone(),
            headings: roots,
        })
    }
}

/// Apply `f` to every page, keeping page order in the result.
///
/// With `parallel` set (and the `parallel` feature enabled) pages are mapped
/// on the rayon pool.
pub(crate) fn map_pages<T, F>(pages: &[Vec<Word>], parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &[Word]) -> T + Sync + Send,
{
    if parallel {
        return par_map_pages(pages, f);
    }
    pages
        .iter()
        .enumerate()
        .map(|(index, words)| f(index, words))
        .collect()
}

#[cfg(feature = "parallel")]
fn par_map_pages<T, F>(pages: &[Vec<Word>], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &[Word]) -> T + Sync + Send,
{
    pages
        .par_iter()
        .enumerate()
        .map(|(index, words)| f(index, words))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn par_map_pages<T, F>(pages: &[Vec<Word>], f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize, &[Word]) -> T + Sync + Send,
{
    map_pages(pages, false, f)
}
