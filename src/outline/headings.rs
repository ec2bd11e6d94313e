//! Heading extraction across the whole document.

use crate::model::{Heading, Word};

use super::classifier::LineClassifier;
use super::grouping::group_words;
use super::map_pages;

/// Scan every page and collect heading lines in reading order.
///
/// `pages[0]` is page 1. Ids are assigned sequentially as headings are
/// appended; the final sort by `(page, top)` leaves that order intact.
pub fn extract_headings(
    pages: &[Vec<Word>],
    classifier: &LineClassifier,
    parallel: bool,
) -> Vec<Heading> {
    let per_page = map_pages(pages, parallel, |index, words| {
        group_words(words)
            .iter()
            .filter_map(|line| {
                let (level, text) = classifier.classify_heading(line)?;
                Some(Heading {
                    id: 0,
                    page: index as u32 + 1,
                    top: line.top,
                    level,
                    font_size: line.median_size(),
                    text,
                    content_html: None,
                })
            })
            .collect::<Vec<_>>()
    });

    let mut headings: Vec<Heading> = Vec::new();
    for heading in per_page.into_iter().flatten() {
        let id = headings.len();
        headings.push(Heading { id, ..heading });
    }

    sort_reading_order(&mut headings);
    log::debug!("Detected {} heading(s)", headings.len());
    headings
}

/// Stable sort by page, then vertical position.
pub fn sort_reading_order(headings: &mut [Heading]) {
    headings.sort_by(|a, b| {
        a.page
            .cmp(&b.page)
            .then(a.top.partial_cmp(&b.top).unwrap_or(std::cmp::Ordering::Equal))
    });
}
