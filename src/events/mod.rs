//! Events module for dialogue transitions
//!
//! Provides structured event types describing each turn: what was
//! classified, which follow-ups opened and closed, and termination.

use serde::{Deserialize, Serialize};

use crate::intent::Intent;
use crate::state::DialogueState;

/// Events emitted by the state machine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DialogueEvent {
    /// A failed recognition arrived while idle and was dropped
    RecognitionIgnored,

    /// An utterance was classified
    IntentMatched { intent: Intent },

    /// No rule matched; the fallback was spoken
    Unmatched { utterance: String },

    /// A follow-up question was asked
    FollowUpStarted { state: DialogueState },

    /// The follow-up received its payload
    FollowUpResolved {
        state: DialogueState,
        /// Milliseconds between the question and the answer
        duration_ms: u64,
    },

    /// The dialogue loop is ending
    Terminated,
}

impl std::fmt::Display for DialogueEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogueEvent::RecognitionIgnored => write!(f, "RECOGNITION_IGNORED"),
            DialogueEvent::IntentMatched { intent } => write!(f, "INTENT_MATCHED ({:?})", intent),
            DialogueEvent::Unmatched { utterance } => write!(f, "UNMATCHED ({:?})", utterance),
            DialogueEvent::FollowUpStarted { state } => write!(f, "FOLLOW_UP_STARTED ({})", state),
            DialogueEvent::FollowUpResolved { state, duration_ms } => {
                write!(f, "FOLLOW_UP_RESOLVED ({}, {}ms)", state, duration_ms)
            }
            DialogueEvent::Terminated => write!(f, "TERMINATED"),
        }
    }
}
