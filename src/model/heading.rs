//! Heading records and the outline tree.

use serde::{Deserialize, Serialize};

use super::FontProfile;

/// A heading detected in the document, in the flat reading-order list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    /// Sequential id assigned at creation (reading order)
    pub id: usize,
    /// Page number (1-indexed)
    pub page: u32,
    /// Rounded vertical position of the heading line
    pub top: f32,
    /// Heading level (1 = most prominent)
    pub level: u32,
    /// Median font size of the heading line
    pub font_size: f32,
    /// Heading text
    pub text: String,
    /// Rendered markup of the section body, once extracted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
}

impl Heading {
    /// Position of the heading in reading order.
    pub fn position(&self) -> (u32, f32) {
        (self.page, self.top)
    }
}

/// A node of the outline tree.
///
/// Nodes are deep copies of the flat [`Heading`] records they were built
/// from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadingNode {
    /// Sequential id from the flat list
    pub id: usize,
    /// Page number (1-indexed)
    pub page: u32,
    /// Rounded vertical position of the heading line
    pub top: f32,
    /// Heading level (1 = most prominent)
    pub level: u32,
    /// Median font size of the heading line
    pub font_size: f32,
    /// Heading text
    pub text: String,
    /// Rendered markup of the section body
    pub content_html: String,
    /// Nested headings in reading order
    pub children: Vec<HeadingNode>,
}

impl From<&Heading> for HeadingNode {
    fn from(h: &Heading) -> Self {
        Self {
            id: h.id,
            page: h.page,
            top: h.top,
            level: h.level,
            font_size: h.font_size,
            text: h.text.clone(),
            content_html: h.content_html.clone().unwrap_or_default(),
            children: Vec::new(),
        }
    }
}

impl HeadingNode {
    /// Convert back to a flat record (without children).
    pub fn to_heading(&self) -> Heading {
        Heading {
            id: self.id,
            page: self.page,
            top: self.top,
            level: self.level,
            font_size: self.font_size,
            text: self.text.clone(),
            content_html: Some(self.content_html.clone()),
        }
    }
}

/// The inferred outline of one PDF, as serialized to JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlineDocument {
    /// Source file name
    pub pdf: String,
    /// Source file path as given
    pub pdf_path: String,
    /// Font profile the outline was inferred from
    #[serde(skip)]
    pub profile: FontProfile,
    /// Root headings
    pub headings: Vec<HeadingNode>,
}

impl OutlineDocument {
    /// Total number of headings in the tree.
    pub fn heading_count(&self) -> usize {
        let mut count = 0;
        let mut stack: Vec<&HeadingNode> = self.headings.iter().collect();
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}
