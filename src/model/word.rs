//! Word tokens produced by the PDF decoder.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single word on a page with its position and font.
///
/// Coordinates follow the top-left origin convention: `top` grows downward
/// from the top edge of the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
    /// The text content
    pub text: String,
    /// Left edge
    pub x0: f32,
    /// Right edge
    pub x1: f32,
    /// Distance from the top of the page to the top of the word
    pub top: f32,
    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Font size in points
    pub size: f32,
}

impl Word {
    /// Create a new word with an empty font name.
    pub fn new(text: impl Into<String>, x0: f32, x1: f32, top: f32, size: f32) -> Self {
        Self {
            text: text.into(),
            x0,
            x1,
            top,
            font_name: String::new(),
            size,
        }
    }

    /// Set the font name.
    pub fn with_font(mut self, font_name: impl Into<String>) -> Self {
        self.font_name = font_name.into();
        self
    }

    /// The font size, if it is a usable number.
    ///
    /// Decoders occasionally report NaN or zero sizes for degenerate text
    /// matrices; such tokens are reported as [`Error::TokenCoercion`].
    pub fn checked_size(&self) -> Result<f32> {
        if self.size.is_finite() && self.size > 0.0 {
            Ok(self.size)
        } else {
            Err(Error::TokenCoercion {
                text: self.text.clone(),
                size: self.size,
            })
        }
    }
}

/// A value rounded to one decimal place, as integer tenths.
///
/// Used as a hashable bucket key for font sizes and vertical positions.
pub fn tenths(value: f32) -> i32 {
    (value * 10.0).round() as i32
}
