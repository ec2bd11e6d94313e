//! Data model shared by the decoder, the outline engine and the renderers.
//!
//! Words come from the decoder, lines are built by the outline engine, and
//! headings flow from the flat reading-order list into the outline tree.

mod heading;
mod line;
mod profile;
mod word;

pub use heading::{Heading, HeadingNode, OutlineDocument};
pub use line::{AssembledLine, Line, LineKind, COLUMN_SEPARATOR};
pub use profile::FontProfile;
pub use word::{tenths, Word};
