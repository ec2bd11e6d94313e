//! Section content extraction.
//!
//! A heading owns everything after its own line up to the next heading of
//! the same or a higher rank (a lower or equal level number). Deeper
//! headings inside that range do not end it.

use crate::model::{Heading, Word};
use crate::render::html::{BodyLine, HtmlRenderer};

use super::classifier::LineClassifier;
use super::grouping::group_words;

/// Offset below a heading's `top` where its section starts.
pub const HEADING_SKIP: f32 = 0.5;

/// Slack applied to both span bounds when filtering words.
const BOUNDARY_SLACK: f32 = 0.2;

/// The page/vertical range owned by one heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionSpan {
    /// First page (1-indexed)
    pub start_page: u32,
    /// Lower bound of `top` on the first page
    pub start_top: f32,
    /// Last page (1-indexed), inclusive
    pub end_page: u32,
    /// Exclusive upper bound of `top` on the last page; `None` runs to the
    /// bottom of the page
    pub end_top: Option<f32>,
}

impl SectionSpan {
    /// Compute the span of `headings[index]`.
    ///
    /// `page_count` is the last scanned page, used when no later heading
    /// closes the section.
    pub fn of(headings: &[Heading], index: usize, page_count: u32) -> Self {
        let heading = &headings[index];
        let closing = headings[index + 1..]
            .iter()
            .find(|next| next.level <= heading.level);

        Self {
            start_page: heading.page,
            start_top: heading.top + HEADING_SKIP,
            end_page: closing.map_or(page_count.max(heading.page), |h| h.page),
            end_top: closing.map(|h| h.top),
        }
    }

    /// Whether a word at `top` on `page` belongs to the span.
    pub fn contains(&self, page: u32, top: f32) -> bool {
        if page < self.start_page || page > self.end_page {
            return false;
        }
        if page == self.start_page && top < self.start_top - BOUNDARY_SLACK {
            return false;
        }
        match self.end_top {
            Some(end_top) if page == self.end_page => top < end_top - BOUNDARY_SLACK,
            _ => true,
        }
    }
}

/// Renders the body of every heading's section.
pub struct SectionExtractor<'c> {
    classifier: &'c LineClassifier,
    renderer: HtmlRenderer,
}

impl<'c> SectionExtractor<'c> {
    /// Create an extractor that types lines with `classifier`.
    pub fn new(classifier: &'c LineClassifier) -> Self {
        Self {
            classifier,
            renderer: HtmlRenderer::new(classifier.bullet_glyphs()),
        }
    }

    /// Fill `content_html` of every heading. `pages[0]` is page 1.
    pub fn attach_content(&self, headings: &mut [Heading], pages: &[Vec<Word>]) {
        let page_count = pages.len() as u32;
        for index in 0..headings.len() {
            let span = SectionSpan::of(headings, index, page_count);
            let lines = self.body_lines(pages, &span);
            log::trace!(
                "Heading {} spans p{}..p{} with {} line(s)",
                headings[index].id,
                span.start_page,
                span.end_page,
                lines.len()
            );
            headings[index].content_html = Some(self.renderer.render(&lines));
        }
    }

    /// Typed body lines inside a span, in reading order.
    pub fn body_lines(&self, pages: &[Vec<Word>], span: &SectionSpan) -> Vec<BodyLine> {
        let mut lines = Vec::new();

        for page in span.start_page..=span.end_page {
            let Some(words) = pages.get(page as usize - 1) else {
                break;
            };
            let in_span = words.iter().filter(|w| span.contains(page, w.top));

            for line in group_words(in_span) {
                let assembled = line.assemble(self.classifier.gap_threshold());
                let kind = self.classifier.body_kind(&assembled);
                lines.push(BodyLine::new(kind, assembled.text));
            }
        }
        lines
    }
}
