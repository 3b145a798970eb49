//! The dialogue loop
//!
//! One utterance at a time: acquire, step the state machine, run every
//! action to completion (an alarm wait included), then acquire again.

use chrono::Timelike;
use tracing::{debug, info};

use crate::alarm::Clock;
use crate::chat::ChatResponder;
use crate::executor::Executor;
use crate::knowledge::KnowledgeSource;
use crate::speech::SpeechInput;
use crate::state::{DialogueState, Flow, StateMachine};

/// Why the dialogue loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The user ended the session (exit phrase or confirmed power action)
    Exited,
    /// The speech input closed
    InputClosed,
}

/// Salutation for the local hour
pub fn salutation(hour: u32) -> &'static str {
    match hour {
        0..=11 => "Good Morning!",
        12..=17 => "Good Afternoon!",
        _ => "Good Evening!",
    }
}

pub struct Assistant<I, K, C, T> {
    name: String,
    machine: StateMachine,
    input: I,
    executor: Executor<K, C, T>,
}

impl<I, K, C, T> Assistant<I, K, C, T>
where
    I: SpeechInput,
    K: KnowledgeSource,
    C: ChatResponder,
    T: Clock,
{
    pub fn new(name: &str, machine: StateMachine, input: I, executor: Executor<K, C, T>) -> Self {
        Self {
            name: name.to_string(),
            machine,
            input,
            executor,
        }
    }

    pub fn state(&self) -> DialogueState {
        self.machine.state()
    }

    /// Greet the user according to the time of day
    pub fn greet(&mut self) {
        let hour = self.executor.now().hour();
        self.executor.say(salutation(hour));
        self.executor.say(&format!(
            "I am {}, your personal assistant. How can I help you today?",
            self.name
        ));
    }

    /// Run the dialogue until the user exits or input closes
    pub async fn run(&mut self) -> Outcome {
        info!("dialogue loop started in Idle state");

        while let Some(recognition) = self.input.acquire().await {
            let transition = self.machine.handle(&recognition);
            debug!(
                intent = ?transition.intent,
                actions = transition.actions.len(),
                next = %transition.next,
                "turn classified"
            );

            for action in &transition.actions {
                self.executor.execute(action).await;
            }

            if transition.flow == Flow::Exit {
                info!("dialogue loop ended by user");
                return Outcome::Exited;
            }
        }

        info!(state = %self.machine.state(), "speech input closed");
        Outcome::InputClosed
    }
}
