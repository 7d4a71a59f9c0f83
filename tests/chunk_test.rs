use std::num::NonZeroUsize;

use trilha::application::ports::TextSplitter;
use trilha::domain::{Chunk, chunk_units, chunk_words};
use trilha::infrastructure::text_processing::FixedSizeChunker;

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn pages(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("page{i}")).collect()
}

#[test]
fn given_seven_pages_when_grouping_by_three_then_produces_three_chunks() {
    let chunks = chunk_units(&pages(7), size(3));

    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[0].text, "page1 page2 page3");
    assert_eq!(chunks[1].text, "page4 page5 page6");
    assert_eq!(chunks[2].text, "page7");
}

#[test]
fn given_any_page_count_when_chunking_then_count_is_ceiling_of_division() {
    for count in 0..20 {
        for group in 1..6 {
            let chunks = chunk_units(&pages(count), size(group));
            assert_eq!(chunks.len(), count.div_ceil(group));
        }
    }
}

#[test]
fn given_chunks_when_rejoined_then_reconstruct_the_pages() {
    let input = pages(10);

    let chunks = chunk_units(&input, size(4));
    let rejoined = chunks
        .iter()
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");

    assert_eq!(rejoined, input.join(" "));
}

#[test]
fn given_chunks_when_indexed_then_indices_are_sequential() {
    let chunks = chunk_units(&pages(8), size(3));

    let indices: Vec<usize> = chunks.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2]);
}

#[test]
fn given_no_pages_when_chunking_then_returns_no_chunks() {
    let empty: Vec<String> = Vec::new();

    assert!(chunk_units(&empty, size(3)).is_empty());
}

#[test]
fn given_text_when_chunking_words_then_groups_whitespace_tokens() {
    let chunks = chunk_words("a  b\nc d\te", size(2));

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["a b", "c d", "e"]);
}

#[test]
fn given_fixed_size_chunker_when_splitting_then_uses_word_groups() {
    let chunker = FixedSizeChunker::new(size(3));

    let chunks = chunker.split("um dois três quatro cinco");

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[1].text, "quatro cinco");
}

#[test]
fn given_short_padded_text_when_checking_substance_then_ignores_whitespace() {
    let chunk = Chunk::new(0, "   curto   ".to_string());

    assert!(!chunk.is_substantive(10));
    assert!(chunk.is_substantive(5));
}
