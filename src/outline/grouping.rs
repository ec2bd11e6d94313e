//! Grouping of words into visual lines.

use std::collections::BTreeMap;

use crate::model::{tenths, Line, Word};

/// Group words into lines by their `top` rounded to one decimal place.
///
/// Lines come out ordered top to bottom and words within a line left to
/// right. Words whose font size is not a usable number are dropped.
pub fn group_words<'w, I>(words: I) -> Vec<Line>
where
    I: IntoIterator<Item = &'w Word>,
{
    let mut buckets: BTreeMap<i32, Vec<Word>> = BTreeMap::new();

    for word in words {
        if let Err(e) = word.checked_size() {
            log::trace!("Dropping token: {}", e);
            continue;
        }
        buckets.entry(tenths(word.top)).or_default().push(word.clone());
    }

    buckets
        .into_iter()
        .map(|(key, mut words)| {
            words.sort_by(|a, b| a.x0.partial_cmp(&b.x0).unwrap_or(std::cmp::Ordering::Equal));
            Line::new(key as f32 / 10.0, words)
        })
        .collect()
}
