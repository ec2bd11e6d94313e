//! Line classification: heading levels and body line types.

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::{AssembledLine, FontProfile, Line, LineKind};

use super::OutlineOptions;

/// Classifies lines against a document's font profile.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    profile: FontProfile,
    size_tolerance: f32,
    max_heading_line_length: usize,
    gap_threshold: f32,
    section: Regex,
    subsection: Regex,
    bullet_glyphs: Vec<char>,
}

impl LineClassifier {
    /// Build a classifier, compiling the configured heading patterns.
    pub fn new(profile: FontProfile, options: &OutlineOptions) -> Result<Self> {
        Ok(Self {
            profile,
            size_tolerance: options.size_tolerance,
            max_heading_line_length: options.max_heading_line_length,
            gap_threshold: options.gap_threshold,
            section: compile(&options.section_pattern)?,
            subsection: compile(&options.subsection_pattern)?,
            bullet_glyphs: options.bullet_glyphs.clone(),
        })
    }

    /// The font profile this classifier works against.
    pub fn profile(&self) -> &FontProfile {
        &self.profile
    }

    /// The gap threshold used for line assembly.
    pub fn gap_threshold(&self) -> f32 {
        self.gap_threshold
    }

    /// Heading level for a line's text and median size, or `None` for body
    /// text.
    ///
    /// The largest tier is always level 1. Other tiers are refined by the
    /// section (level 2) and subsection (level 3) patterns, falling back to
    /// the tier number.
    pub fn heading_level(&self, text: &str, median_size: f32) -> Option<u32> {
        let tier = self.profile.tier_of(median_size, self.size_tolerance)?;
        if tier == 1 {
            return Some(1);
        }

        let text = text.trim();
        if self.section.is_match(text) {
            Some(2)
        } else if self.subsection.is_match(text) {
            Some(3)
        } else {
            Some(2 + (tier as u32 - 2))
        }
    }

    /// Classify a grouped line as a heading, returning its level and text.
    ///
    /// Empty lines and lines longer than the configured maximum are never
    /// headings.
    pub fn classify_heading(&self, line: &Line) -> Option<(u32, String)> {
        let text = line.text();
        if text.is_empty() {
            return None;
        }

        let level = self.heading_level(&text, line.median_size())?;
        if text.chars().count() > self.max_heading_line_length {
            log::trace!("Skipping over-long heading candidate at top {}", line.top);
            return None;
        }
        Some((level, text))
    }

    /// Type a body line from its assembled text.
    ///
    /// Table detection wins over bullet detection: a line split by two or
    /// more large gaps is a table row even if it starts with a bullet glyph.
    pub fn body_kind(&self, line: &AssembledLine) -> LineKind {
        let trimmed = line.text.trim();
        if trimmed.is_empty() {
            LineKind::Blank
        } else if line.large_gaps >= 2 {
            LineKind::Table
        } else if trimmed
            .chars()
            .next()
            .is_some_and(|c| self.bullet_glyphs.contains(&c))
        {
            LineKind::Bullet
        } else {
            LineKind::Paragraph
        }
    }

    /// The configured bullet glyphs.
    pub fn bullet_glyphs(&self) -> &[char] {
        &self.bullet_glyphs
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::InvalidPattern {
        pattern: pattern.to_string(),
        source,
    })
}
