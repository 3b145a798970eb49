//! Utterances and the speech input contract

use std::fmt;

use tokio::sync::mpsc;

/// Text handed to a follow-up when the recognizer produced nothing usable
pub const FAILURE_SENTINEL: &str = "none";

/// One normalized unit of user input (lower-cased, trimmed)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance(String);

impl Utterance {
    /// Normalize raw transcription text
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring containment
    pub fn contains(&self, phrase: &str) -> bool {
        self.0.contains(&phrase.to_lowercase())
    }
}

impl fmt::Display for Utterance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of one recognition cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recognition {
    /// A usable transcription
    Heard(Utterance),
    /// Nothing usable was transcribed
    Failed,
}

impl Recognition {
    /// Classify a raw transcript; blank input counts as a failed recognition
    pub fn from_transcript(raw: &str) -> Self {
        let utterance = Utterance::new(raw);
        if utterance.is_empty() {
            Recognition::Failed
        } else {
            Recognition::Heard(utterance)
        }
    }

    /// The literal text a pending follow-up receives for this recognition.
    ///
    /// A failed recognition reads as [`FAILURE_SENTINEL`], so a follow-up
    /// cannot tell it apart from a user who actually said "none".
    pub fn payload(&self) -> &str {
        match self {
            Recognition::Heard(utterance) => utterance.as_str(),
            Recognition::Failed => FAILURE_SENTINEL,
        }
    }
}

/// Source of recognized utterances.
///
/// `acquire` blocks the dialogue turn until the next recognition is
/// available; `None` means the source is closed and no further input
/// will ever arrive.
#[allow(async_fn_in_trait)]
pub trait SpeechInput {
    async fn acquire(&mut self) -> Option<Recognition>;
}

/// Speech input fed by a channel (see [`super::TranscriptListener`])
pub struct ChannelInput {
    rx: mpsc::Receiver<Recognition>,
}

impl ChannelInput {
    pub fn new(rx: mpsc::Receiver<Recognition>) -> Self {
        Self { rx }
    }
}

impl SpeechInput for ChannelInput {
    async fn acquire(&mut self) -> Option<Recognition> {
        self.rx.recv().await
    }
}
