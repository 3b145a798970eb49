//! State machine module for the dialogue
//!
//! Provides an explicit dialogue state machine:
//! - Idle: the next utterance is classified against the intent table
//! - Await*: the next utterance is the literal payload of one follow-up
//!   (alarm time, yes/no confirmation, search query, city, ...)
//!
//! Every follow-up resolves with exactly one utterance and returns to Idle.

mod dialogue;
mod gate;
mod machine;
mod transition;

pub use dialogue::DialogueState;
pub use gate::{confirms, PendingAction};
pub use machine::StateMachine;
pub use transition::{step, Action, Flow, Transition};
