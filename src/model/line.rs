//! Visual lines assembled from words.

use super::Word;

/// Separator inserted where two words are split by a large horizontal gap.
pub const COLUMN_SEPARATOR: &str = "    ";

/// Kind of a line inside a section body.
///
/// Headings are not a body kind: a line becomes a heading through
/// `LineClassifier::classify_heading` and then bounds sections instead of
/// being rendered into one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Ordinary body text
    Paragraph,
    /// A list item starting with a bullet glyph
    Bullet,
    /// A row of column-separated cells
    Table,
    /// Nothing but whitespace
    Blank,
}

/// Words sharing the same (rounded) vertical position, sorted left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// Rounded `top` shared by every word of the line
    pub top: f32,
    /// Words ordered by `x0`
    pub words: Vec<Word>,
}

/// Line text rebuilt with column separators at large gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledLine {
    /// Text including [`COLUMN_SEPARATOR`]s
    pub text: String,
    /// Number of large gaps that were rendered as separators
    pub large_gaps: usize,
}

impl Line {
    /// Create a line. Words are expected to be sorted by `x0` already.
    pub fn new(top: f32, words: Vec<Word>) -> Self {
        Self { top, words }
    }

    /// Words joined with single spaces, trimmed.
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|w| w.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Median font size of the words (mean of the two middle values for an
    /// even count). Returns 0.0 for an empty line.
    pub fn median_size(&self) -> f32 {
        let mut sizes: Vec<f32> = self.words.iter().map(|w| w.size).collect();
        if sizes.is_empty() {
            return 0.0;
        }
        sizes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let mid = sizes.len() / 2;
        if sizes.len() % 2 == 0 {
            (sizes[mid - 1] + sizes[mid]) / 2.0
        } else {
            sizes[mid]
        }
    }

    /// Rebuild the text, rendering gaps wider than `gap_threshold` as
    /// [`COLUMN_SEPARATOR`].
    pub fn assemble(&self, gap_threshold: f32) -> AssembledLine {
        let mut text = String::new();
        let mut large_gaps = 0;

        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                let gap = word.x0 - self.words[i - 1].x1;
                if gap > gap_threshold {
                    text.push_str(COLUMN_SEPARATOR);
                    large_gaps += 1;
                } else {
                    text.push(' ');
                }
            }
            text.push_str(&word.text);
        }

        AssembledLine { text, large_gaps }
    }
}
