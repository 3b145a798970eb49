//! Speech module: recognized input and rendered output
//!
//! Recognition and synthesis are external; this module only carries
//! their contracts into the dialogue loop.

mod input;
mod listener;
mod output;

pub use input::{ChannelInput, Recognition, SpeechInput, Utterance};
pub use listener::TranscriptListener;
pub use output::{ConsoleVoice, SpeechOutput};
