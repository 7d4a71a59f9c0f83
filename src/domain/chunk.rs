use std::num::NonZeroUsize;

use serde::Serialize;

/// A contiguous group of source units (pages or words) joined into one string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub index: usize,
    pub text: String,
}

impl Chunk {
    pub fn new(index: usize, text: String) -> Self {
        Self { index, text }
    }

    /// Whether the trimmed text has at least `min_chars` characters.
    pub fn is_substantive(&self, min_chars: usize) -> bool {
        self.text.trim().chars().count() >= min_chars
    }
}

/// Groups `units` into chunks of `group_size` consecutive units joined by a single space.
/// The last chunk holds the remainder when the length is not a multiple of `group_size`.
pub fn chunk_units<S: AsRef<str>>(units: &[S], group_size: NonZeroUsize) -> Vec<Chunk> {
    units
        .chunks(group_size.get())
        .enumerate()
        .map(|(index, group)| {
            let text = group
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<_>>()
                .join(" ");
            Chunk::new(index, text)
        })
        .collect()
}

/// Splits `text` on whitespace and groups the words `group_size` at a time.
pub fn chunk_words(text: &str, group_size: NonZeroUsize) -> Vec<Chunk> {
    let words: Vec<&str> = text.split_whitespace().collect();
    chunk_units(&words, group_size)
}
