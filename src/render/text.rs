//! Indented plain-text dump of an outline.

use std::fmt::Write;

use crate::model::OutlineDocument;
use crate::outline::depth_first;

/// Render the font profile header followed by one line per heading,
/// indented two spaces per tree depth.
pub fn to_text(doc: &OutlineDocument) -> String {
    let mut output = String::new();
    let _ = writeln!(
        output,
        "Body font size (most common): {}",
        doc.profile.body_size
    );
    let _ = writeln!(
        output,
        "Detected heading font sizes (largest first): {:?}",
        doc.profile.heading_sizes
    );
    output.push('\n');

    for (depth, node) in depth_first(&doc.headings) {
        let _ = writeln!(
            output,
            "{}- (L{}, p{}) {}",
            "  ".repeat(depth),
            node.level,
            node.page,
            node.text
        );
    }
    output
}
