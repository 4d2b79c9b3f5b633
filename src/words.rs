/// Common English words that are never guessable, no matter how often they
/// appear in a stock photo title.
const STOPWORDS: &[&str] = &[
    "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by", "from", "up",
    "about", "into", "through", "during", "before", "after", "above", "below", "between",
    "among", "under", "over", "around", "near", "far", "here", "there", "where", "when", "why",
    "how", "what", "who", "which", "that", "this", "these", "those", "some", "any", "all",
    "both", "each", "every", "other", "another", "such", "same", "different", "new", "old",
    "good", "bad", "big", "small", "large", "little", "long", "short", "high", "low", "great",
    "first", "last", "next", "previous", "main", "major", "minor", "important", "necessary",
    "possible", "available", "present", "current", "recent", "early", "late", "young",
    "mature", "fresh", "clean", "dirty", "hot", "cold", "warm", "cool", "dry", "wet", "full",
    "empty", "open", "closed", "free", "busy", "ready", "finished", "complete", "partial",
    "total", "whole", "half", "quarter", "double", "single", "multiple", "several", "many",
    "few", "most", "least", "more", "less", "much", "enough", "too", "very", "quite", "rather",
    "pretty", "fairly", "almost", "nearly", "approximately", "exactly", "precisely", "just",
    "only", "even", "still", "yet", "already", "soon", "now", "then", "today", "yesterday",
    "tomorrow", "always", "never", "sometimes", "often", "usually", "rarely", "hardly",
    "barely", "scarcely", "extremely", "highly", "completely", "totally", "entirely", "fully",
    "partly", "partially", "mostly", "mainly", "primarily", "especially", "particularly",
    "specifically", "generally", "normally", "typically", "commonly", "frequently",
    "regularly", "occasionally", "seldom", "forever", "permanently", "temporarily", "briefly",
    "quickly", "slowly", "suddenly", "gradually", "immediately", "instantly", "eventually",
    "finally", "ultimately", "initially", "originally", "previously", "formerly", "lately",
    "presently", "nowadays", "tonight", "whose", "whom",
];

/// Minimum length for a guessable (or guessed) word.
pub const MIN_WORD_LEN: usize = 3;

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(&word)
}

/// Extracts guessable words from an image title.
///
/// Lowercases, replaces every non-alphanumeric character with a space,
/// splits on whitespace, then drops short words and stopwords. Order is
/// preserved and duplicates are kept as separate entries, so a word that
/// appears twice in the title scores double.
pub fn extract_words(title: &str) -> Vec<String> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    cleaned
        .split_whitespace()
        .filter(|w| w.chars().count() >= MIN_WORD_LEN && !is_stopword(w))
        .map(str::to_string)
        .collect()
}

/// Normalizes a submitted guess the same way title tokens are produced.
pub fn normalize_word(raw: &str) -> String {
    raw.trim().to_lowercase()
}
