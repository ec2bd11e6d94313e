//! Outline inference options.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default pattern for top-level sections, e.g. "1. INTRODUCTION".
pub const DEFAULT_SECTION_PATTERN: &str = r"^\d+\.\s+[A-Z0-9 ,()/\-]+$";

/// Default pattern for subsections, e.g. "3.1 Paracetamol".
pub const DEFAULT_SUBSECTION_PATTERN: &str = r"^\d+\.\d+";

/// Default bullet glyphs recognized at the start of a body line.
pub const DEFAULT_BULLET_GLYPHS: &[char] = &['•', '-', '–', '—', '▪', '‣', '·'];

/// Options controlling heading detection and content extraction.
///
/// Every field has a default, so a JSON configuration file only needs to
/// name the values it overrides:
///
/// ```
/// use pdfoutline::OutlineOptions;
///
/// let options = OutlineOptions::from_json_str(r#"{ "gap_threshold": 20.0 }"#).unwrap();
/// assert_eq!(options.gap_threshold, 20.0);
/// assert_eq!(options.min_heading_occurrences, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlineOptions {
    /// Maximum distance between a line's median size and a heading tier
    pub size_tolerance: f32,

    /// Minimum number of words a size needs to become a heading tier
    pub min_heading_occurrences: usize,

    /// Lines longer than this (in characters) are never headings
    pub max_heading_line_length: usize,

    /// Horizontal gap that counts as a column break
    pub gap_threshold: f32,

    /// Heading sizes must exceed the body size by more than this
    pub heading_margin: f32,

    /// Pattern for level-2 headings
    pub section_pattern: String,

    /// Pattern for level-3 headings
    pub subsection_pattern: String,

    /// Characters that mark a bullet line
    pub bullet_glyphs: Vec<char>,

    /// Only scan the first N pages
    pub max_pages: Option<u32>,

    /// Whether to scan pages on the rayon pool
    pub parallel: bool,
}

impl OutlineOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    /// Parse options from a JSON string. Missing fields keep their defaults.
    pub fn from_json_str(data: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(data)
            .map_err(|e| Error::InvalidConfig(format!("JSON: {}", e)))?;
        options.validate()?;
        Ok(options)
    }

    /// Set the heading size tolerance.
    pub fn with_size_tolerance(mut self, tolerance: f32) -> Self {
        self.size_tolerance = tolerance;
        self
    }

    /// Set the minimum number of occurrences of a heading size.
    pub fn with_min_heading_occurrences(mut self, count: usize) -> Self {
        self.min_heading_occurrences = count;
        self
    }

    /// Set the maximum heading line length.
    pub fn with_max_heading_line_length(mut self, length: usize) -> Self {
        self.max_heading_line_length = length;
        self
    }

    /// Set the column gap threshold.
    pub fn with_gap_threshold(mut self, threshold: f32) -> Self {
        self.gap_threshold = threshold;
        self
    }

    /// Set the section (level 2) pattern.
    pub fn with_section_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.section_pattern = pattern.into();
        self
    }

    /// Set the subsection (level 3) pattern.
    pub fn with_subsection_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.subsection_pattern = pattern.into();
        self
    }

    /// Set the bullet glyphs.
    pub fn with_bullet_glyphs(mut self, glyphs: impl IntoIterator<Item = char>) -> Self {
        self.bullet_glyphs = glyphs.into_iter().collect();
        self
    }

    /// Only scan the first `pages` pages.
    pub fn with_max_pages(mut self, pages: u32) -> Self {
        self.max_pages = Some(pages);
        self
    }

    /// Enable or disable parallel page scanning.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel page scanning.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Check that numeric options are usable.
    pub fn validate(&self) -> Result<()> {
        if !(self.size_tolerance.is_finite() && self.size_tolerance >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "size_tolerance must be a non-negative number, got {}",
                self.size_tolerance
            )));
        }
        if !(self.gap_threshold.is_finite() && self.gap_threshold > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "gap_threshold must be positive, got {}",
                self.gap_threshold
            )));
        }
        if !(self.heading_margin.is_finite() && self.heading_margin >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "heading_margin must be a non-negative number, got {}",
                self.heading_margin
            )));
        }
        if self.min_heading_occurrences == 0 {
            return Err(Error::InvalidConfig(
                "min_heading_occurrences must be at least 1".to_string(),
            ));
        }
        if self.max_pages == Some(0) {
            return Err(Error::InvalidConfig("max_pages must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self {
            size_tolerance: 0.6,
            min_heading_occurrences: 3,
            max_heading_line_length: 160,
            gap_threshold: 14.0,
            heading_margin: 0.5,
            section_pattern: DEFAULT_SECTION_PATTERN.to_string(),
            subsection_pattern: DEFAULT_SUBSECTION_PATTERN.to_string(),
            bullet_glyphs: DEFAULT_BULLET_GLYPHS.to_vec(),
            max_pages: None,
            parallel: cfg!(feature = "parallel"),
        }
    }
}
