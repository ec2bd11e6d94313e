//! Font size profiling.
//!
//! The most common size is the body text; larger sizes that occur often
//! enough become heading tiers.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::model::{tenths, FontProfile, Word};

use super::{map_pages, OutlineOptions};

/// Histogram of font sizes rounded to one decimal place.
#[derive(Debug, Clone, Default)]
pub struct FontStatistics {
    counts: HashMap<i32, usize>,
    /// Keys in order of first appearance, for deterministic tie-breaking
    order: Vec<i32>,
}

impl FontStatistics {
    /// Add a font size observation.
    pub fn add_size(&mut self, size: f32) {
        let key = tenths(size);
        let count = self.counts.entry(key).or_insert(0);
        if *count == 0 {
            self.order.push(key);
        }
        *count += 1;
    }

    /// Add the sizes of every word, skipping unusable sizes.
    pub fn add_words(&mut self, words: &[Word]) {
        for word in words {
            match word.checked_size() {
                Ok(size) => self.add_size(size),
                Err(e) => log::trace!("Skipping token in histogram: {}", e),
            }
        }
    }

    /// Merge another histogram that covers later pages.
    pub fn merge(&mut self, other: FontStatistics) {
        for key in other.order {
            let added = other.counts.get(&key).copied().unwrap_or(0);
            let count = self.counts.entry(key).or_insert(0);
            if *count == 0 {
                self.order.push(key);
            }
            *count += added;
        }
    }

    /// Number of observations of a size.
    pub fn count(&self, size: f32) -> usize {
        self.counts.get(&tenths(size)).copied().unwrap_or(0)
    }

    /// Whether no size was observed.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Derive the body size and heading tiers.
    ///
    /// Ties for the most common size go to the size seen first.
    pub fn profile(&self, options: &OutlineOptions) -> Option<FontProfile> {
        let mut body_key = *self.order.first()?;
        for key in &self.order {
            if self.counts[key] > self.counts[&body_key] {
                body_key = *key;
            }
        }

        let threshold = body_key + tenths(options.heading_margin);
        let mut heading_keys: Vec<i32> = self
            .order
            .iter()
            .copied()
            .filter(|key| *key > threshold && self.counts[key] >= options.min_heading_occurrences)
            .collect();
        heading_keys.sort_unstable_by(|a, b| b.cmp(a));

        Some(FontProfile {
            body_size: body_key as f32 / 10.0,
            heading_sizes: heading_keys.into_iter().map(|k| k as f32 / 10.0).collect(),
        })
    }
}

/// Profile the font sizes of the given pages.
pub fn profile_pages(pages: &[Vec<Word>], options: &OutlineOptions) -> Result<FontProfile> {
    let mut stats = FontStatistics::default();
    for page_stats in map_pages(pages, options.parallel, |_, words| {
        let mut stats = FontStatistics::default();
        stats.add_words(words);
        stats
    }) {
        stats.merge(page_stats);
    }

    let profile = stats
        .profile(options)
        .ok_or(Error::Profiling(pages.len() as u32))?;
    log::debug!(
        "Body font size: {}, heading sizes: {:?}",
        profile.body_size,
        profile.heading_sizes
    );
    Ok(profile)
}
