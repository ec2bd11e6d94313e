//! Page source abstraction.
//!
//! The outline engine never touches a concrete PDF library. It asks a
//! [`PageSource`] for the page count and for each page's words, which keeps
//! the inference testable with synthetic documents.

use crate::error::{Error, Result};
use crate::model::Word;

/// Abstract interface for reading words out of a paginated document.
pub trait PageSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Words on a page (1-indexed), in content order.
    fn page_words(&self, page: u32) -> Result<Vec<Word>>;
}

/// Read the words of the first `limit` pages (or every page).
pub fn load_pages<S: PageSource + ?Sized>(source: &S, limit: Option<u32>) -> Result<Vec<Vec<Word>>> {
    let total = source.page_count();
    let count = limit.map_or(total, |n| n.min(total));
    log::debug!("Reading {} of {} page(s)", count, total);

    (1..=count).map(|page| source.page_words(page)).collect()
}

/// An in-memory [`PageSource`], one vector of words per page.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Vec<Word>>,
}

impl MemorySource {
    /// Create a source from per-page word lists.
    pub fn new(pages: Vec<Vec<Word>>) -> Self {
        Self { pages }
    }

    /// Append a page.
    pub fn push_page(&mut self, words: Vec<Word>) {
        self.pages.push(words);
    }
}

impl PageSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_words(&self, page: u32) -> Result<Vec<Word>> {
        page.checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(page, self.page_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source() -> MemorySource {
        let mut src = MemorySource::default();
        src.push_page(vec![Word::new("one", 0.0, 10.0, 10.0, 10.0)]);
        src.push_page(vec![Word::new("two", 0.0, 10.0, 10.0, 10.0)]);
        src.push_page(vec![]);
        src
    }

    #[test]
    fn test_memory_source_pages() {
        let src = source();
        assert_eq!(src.page_count(), 3);
        assert_eq!(src.page_words(2).unwrap()[0].text, "two");
        assert!(matches!(src.page_words(0), Err(Error::PageOutOfRange(0, 3))));
        assert!(matches!(src.page_words(4), Err(Error::PageOutOfRange(4, 3))));
    }

    #[test]
    fn test_load_pages_limit() {
        let src = source();
        assert_eq!(load_pages(&src, None).unwrap().len(), 3);
        assert_eq!(load_pages(&src, Some(1)).unwrap().len(), 1);
        assert_eq!(load_pages(&src, Some(10)).unwrap().len(), 3);
    }
}
