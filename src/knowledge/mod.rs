//! Knowledge module: encyclopedia-style summary lookups

mod wikipedia;

use std::sync::OnceLock;

use regex::Regex;

pub use wikipedia::WikipediaClient;

/// Result of a summary lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// A short summary of the topic
    Summary(String),
    /// The topic names several pages; candidate titles
    Ambiguous(Vec<String>),
    /// No page for the topic
    NotFound,
    /// The lookup itself failed (network, bad response)
    Failed(String),
}

/// Summary lookup service
#[allow(async_fn_in_trait)]
pub trait KnowledgeSource {
    async fn lookup(&self, topic: &str) -> LookupOutcome;
}

static FILLER: OnceLock<Regex> = OnceLock::new();

fn filler() -> &'static Regex {
    FILLER.get_or_init(|| {
        Regex::new(r"(jarvis|tell me about|can you|look up|search for|who is|what is|from)")
            .expect("invalid topic filler regex")
    })
}

/// Strip the request wording from a lookup utterance, leaving the topic
pub fn extract_topic(utterance: &str) -> String {
    let without_source = utterance.to_lowercase().replace("wikipedia", "");
    filler()
        .replace_all(&without_source, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// The first `count` sentences of `text`
pub fn first_sentences(text: &str, count: usize) -> String {
    let mut seen = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            let end = i + c.len_utf8();
            if text[end..].chars().next().map_or(true, char::is_whitespace) {
                seen += 1;
                if seen == count {
                    return text[..end].trim().to_string();
                }
            }
        }
    }
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_topic() {
        assert_eq!(extract_topic("wikipedia alan turing"), "alan turing");
        assert_eq!(
            extract_topic("jarvis tell me about black holes from wikipedia"),
            "black holes"
        );
        assert_eq!(extract_topic("can you look up Rust on Wikipedia"), "rust on");
    }

    #[test]
    fn test_extract_topic_empty() {
        assert_eq!(extract_topic("wikipedia"), "");
    }

    #[test]
    fn test_first_sentences() {
        let text = "Rust is a language. It is fast. It is safe. Version 1.0 shipped in 2015.";
        assert_eq!(first_sentences(text, 2), "Rust is a language. It is fast.");
        assert_eq!(first_sentences(text, 10), text);
    }

    #[test]
    fn test_decimal_point_is_not_a_sentence_end() {
        let text = "Version 1.0 shipped. Then more.";
        assert_eq!(first_sentences(text, 1), "Version 1.0 shipped.");
    }
}
