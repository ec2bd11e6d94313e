//! PDF decoding: turns pages into positioned word tokens.

mod backend;
mod layout;
mod pdf_parser;

pub use backend::{load_pages, MemorySource, PageSource};
pub use pdf_parser::PdfParser;
