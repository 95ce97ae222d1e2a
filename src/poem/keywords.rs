// PaintMyPoem Keyword Extractor
// Copyright (c) 2026 Xing_The_Creator | SYNOID

/// Maximum number of keywords pulled from a poem.
pub const MAX_KEYWORDS: usize = 5;

const STOP_WORDS: &[&str] = &[
    "the", "is", "in", "and", "to", "a", "of", "it", "i", "you", "we", "he", "she", "they", "on",
    "for", "with", "as", "at", "by", "an", "this", "that", "but", "be", "was", "are",
];

/// Lower-cases the poem, strips punctuation, drops stop words and keeps the
/// first `MAX_KEYWORDS` remaining words in reading order.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .take(MAX_KEYWORDS)
        .map(str::to_string)
        .collect()
}
