use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").unwrap());

/// Canonical form for keyword matching: NFKC, lower-cased, runs of whitespace
/// collapsed to one space. Extracted PDF text often carries decomposed accents
/// ("a\u{301}gua"), which would otherwise miss the composed keyword "água".
pub fn normalize_for_matching(raw: &str) -> String {
    let normalized: String = raw.nfkc().collect::<String>().to_lowercase();

    let mut result = String::with_capacity(normalized.len());
    let mut prev_was_space = true;

    for ch in normalized.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                result.push(' ');
                prev_was_space = true;
            }
        } else {
            result.push(ch);
            prev_was_space = false;
        }
    }

    if result.ends_with(' ') {
        result.pop();
    }

    result
}

/// Word tokens with punctuation dropped.
pub fn word_tokens(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}
