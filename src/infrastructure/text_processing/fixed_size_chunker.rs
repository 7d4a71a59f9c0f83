use std::num::NonZeroUsize;

use crate::application::ports::TextSplitter;
use crate::domain::{Chunk, chunk_units, chunk_words};

/// Groups whitespace-delimited words (or pre-split units) into fixed-size chunks.
#[derive(Debug, Clone, Copy)]
pub struct FixedSizeChunker {
    group_size: NonZeroUsize,
}

impl FixedSizeChunker {
    pub fn new(group_size: NonZeroUsize) -> Self {
        Self { group_size }
    }

    pub fn group_size(&self) -> NonZeroUsize {
        self.group_size
    }

    pub fn chunk_units<S: AsRef<str>>(&self, units: &[S]) -> Vec<Chunk> {
        chunk_units(units, self.group_size)
    }
}

impl TextSplitter for FixedSizeChunker {
    fn split(&self, text: &str) -> Vec<Chunk> {
        chunk_words(text, self.group_size)
    }
}
