//! Rendering of outlines and section bodies.

pub mod html;
mod json;
mod text;

pub use html::{escape, BodyLine, HtmlRenderer, EMPTY_SECTION_HTML};
pub use json::{to_json, JsonFormat};
pub use text::to_text;
