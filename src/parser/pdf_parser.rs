//! PDF document reader using lopdf.

use std::io::Read;
use std::path::Path;

use lopdf::{Document as LopdfDocument, ObjectId};

use crate::detect::{pdf_version_from_bytes, pdf_version_from_path};
use crate::error::{Error, Result};
use crate::model::Word;

use super::backend::PageSource;
use super::layout::extract_page_words;

/// A [`PageSource`] backed by `lopdf::Document`.
pub struct PdfParser {
    doc: LopdfDocument,
    page_ids: Vec<ObjectId>,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        pdf_version_from_path(path)?;

        let doc = LopdfDocument::load(path)?;
        Self::from_document(doc)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        pdf_version_from_bytes(data)?;

        let doc = LopdfDocument::load_mem(data)?;
        Self::from_document(doc)
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// Streams of an encrypted file are still ciphertext after loading.
    fn from_document(doc: LopdfDocument) -> Result<Self> {
        if doc.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let page_ids = doc.get_pages().into_values().collect();
        Ok(Self { doc, page_ids })
    }

    /// Get PDF version string.
    pub fn version(&self) -> String {
        self.doc.version.to_string()
    }
}

impl PageSource for PdfParser {
    fn page_count(&self) -> u32 {
        self.page_ids.len() as u32
    }

    fn page_words(&self, page: u32) -> Result<Vec<Word>> {
        let page_id = page
            .checked_sub(1)
            .and_then(|i| self.page_ids.get(i as usize))
            .ok_or(Error::PageOutOfRange(page, self.page_count()))?;

        let words = extract_page_words(&self.doc, *page_id)
            .map_err(|e| Error::Decoder(format!("Page {}: {}", page, e)))?;
        log::trace!("Page {}: {} word(s)", page, words.len());
        Ok(words)
    }
}
