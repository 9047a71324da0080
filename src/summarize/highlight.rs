//! Highlight extraction — the fixed keyword/pattern heuristic that condenses
//! a transcript into a short phrase.
//!
//! The heuristic is fixed and narrow: a proper-noun-like
//! subject, two achievement keywords, and a trophy-count pattern gated on
//! `"won"`/`"winner"`. It is not a general summariser and never fails — on
//! input it cannot work with it degrades to returning the input unchanged or
//! the default subject.

use once_cell::sync::Lazy;
use regex::Regex;

/// Subject used when no capitalised word sequence exists in the text.
pub const DEFAULT_SUBJECT: &str = "User";

/// Maximum number of words in a composed summary before truncation.
pub const MAX_SUMMARY_WORDS: usize = 20;

/// Marker appended to a truncated summary.
const ELLIPSIS: &str = "...";

static RE_SENTENCE_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+").unwrap());

/// Maximal run of capitalised words: an uppercase letter followed by
/// lowercase letters, possibly chained with single spaces.
static RE_SUBJECT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Z][a-z]+(?: [A-Z][a-z]+)*").unwrap());

/// A number immediately followed by one or more trophy keywords.
static RE_TROPHY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b\d+(?:\s+(?:icc|ipl|trophy|trophies)\b)+").unwrap());

// ---------------------------------------------------------------------------
// summarize
// ---------------------------------------------------------------------------

/// Condense `text` into a highlight phrase.
///
/// Pure and deterministic — no side effects, identical output for identical
/// input. The steps, applied in order:
///
/// 1. Split on sentence-terminating punctuation (`.`, `!`, `?`, one or
///    more); trim and drop empty fragments. Zero sentences ⇒ the input is
///    returned unchanged.
/// 2. The first capitalised word run in the original text is the subject;
///    without one the subject is [`DEFAULT_SUBJECT`].
/// 3. Case-sensitive substring checks add the tags `captain` and `farmer`.
/// 4. When the text mentions `"won"` or `"winner"`, every number followed by
///    a run of `icc`/`ipl`/`trophy`/`trophies` (case-insensitive) becomes
///    its own tag, lower-cased, in order of appearance.
/// 5. Compose `subject – tag, tag` when tags exist, else the subject alone.
/// 6. Truncate past [`MAX_SUMMARY_WORDS`] words, appending `"..."`.
///
/// ```
/// use voicebrief::summarize::summarize;
///
/// let text = "Mahendra Singh Dhoni was the captain and won 2 icc trophy.";
/// assert_eq!(summarize(text), "Mahendra Singh Dhoni – captain, 2 icc trophy");
/// assert_eq!(summarize("hello there how are you"), "User");
/// ```
pub fn summarize(text: &str) -> String {
    let has_sentences = RE_SENTENCE_SPLIT
        .split(text)
        .map(str::trim)
        .any(|s| !s.is_empty());
    if !has_sentences {
        // Sentence-less input (empty or punctuation-only) is passed through.
        return text.to_string();
    }

    let subject = detect_subject(text);
    let tags = detect_tags(text);

    let summary = if tags.is_empty() {
        subject
    } else {
        format!("{subject} – {}", tags.join(", "))
    };

    truncate_words(&summary)
}

/// First capitalised word run in `text`, or [`DEFAULT_SUBJECT`].
fn detect_subject(text: &str) -> String {
    RE_SUBJECT
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string())
}

/// Achievement tags in a fixed order: keywords first, then trophy counts in
/// order of appearance.
fn detect_tags(text: &str) -> Vec<String> {
    let mut tags = Vec::new();

    // Keyword checks are case-sensitive.
    if text.contains("captain") {
        tags.push("captain".to_string());
    }
    if text.contains("farmer") {
        tags.push("farmer".to_string());
    }

    if text.contains("won") || text.contains("winner") {
        for m in RE_TROPHY.find_iter(text) {
            tags.push(m.as_str().to_lowercase());
        }
    }

    tags
}

/// Cap the summary at [`MAX_SUMMARY_WORDS`] whitespace-separated words.
fn truncate_words(summary: &str) -> String {
    let words: Vec<&str> = summary.split_whitespace().collect();
    if words.len() <= MAX_SUMMARY_WORDS {
        return summary.to_string();
    }
    format!("{}{ELLIPSIS}", words[..MAX_SUMMARY_WORDS].join(" "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
