//! Dialogue state machine
//!
//! Owns the current dialogue state, advances it one recognition at a
//! time through [`step`], and broadcasts a [`DialogueEvent`] for every
//! turn and follow-up transition.

use std::time::Instant;

use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::events::DialogueEvent;
use crate::speech::Recognition;

use super::{step, DialogueState, Flow, Transition};

/// The state machine that routes each utterance
pub struct StateMachine {
    /// Current state
    state: DialogueState,
    /// Time when the current follow-up was entered
    state_entered_at: Option<Instant>,
    /// Channel for emitting dialogue events
    event_tx: broadcast::Sender<DialogueEvent>,
}

impl StateMachine {
    /// Create a new state machine in Idle
    pub fn new(event_tx: broadcast::Sender<DialogueEvent>) -> Self {
        Self {
            state: DialogueState::Idle,
            state_entered_at: None,
            event_tx,
        }
    }

    /// Get the current state
    pub fn state(&self) -> DialogueState {
        self.state
    }

    /// Process one recognition and return what the executor should do
    pub fn handle(&mut self, recognition: &Recognition) -> Transition {
        let transition = step(self.state, recognition);

        self.emit_turn_event(recognition, &transition);

        if transition.next != self.state {
            self.transition_to(transition.next);
        }

        if transition.flow == Flow::Exit {
            info!(state = %self.state, "dialogue terminating");
            self.emit(DialogueEvent::Terminated);
        }

        transition
    }

    /// Describe what this turn did, before any state change
    fn emit_turn_event(&self, recognition: &Recognition, transition: &Transition) {
        if !self.state.is_idle() {
            // Follow-up resolution is reported by `transition_to`
            return;
        }

        let event = match (recognition, transition.intent) {
            (Recognition::Failed, _) => DialogueEvent::RecognitionIgnored,
            (_, Some(intent)) => DialogueEvent::IntentMatched { intent },
            (Recognition::Heard(utterance), None) => DialogueEvent::Unmatched {
                utterance: utterance.to_string(),
            },
        };
        self.emit(event);
    }

    /// Perform a state transition
    fn transition_to(&mut self, new_state: DialogueState) {
        let old_state = self.state;
        let duration_ms = self
            .state_entered_at
            .map(|t| t.elapsed().as_millis() as u64)
            .unwrap_or(0);

        info!(
            from = %old_state,
            to = %new_state,
            duration_ms = duration_ms,
            "state transition"
        );

        if !old_state.is_idle() {
            self.emit(DialogueEvent::FollowUpResolved {
                state: old_state,
                duration_ms,
            });
        }

        self.state = new_state;
        self.state_entered_at = if new_state.is_idle() {
            None
        } else {
            Some(Instant::now())
        };

        if !new_state.is_idle() {
            self.emit(DialogueEvent::FollowUpStarted { state: new_state });
        }
    }

    fn emit(&self, event: DialogueEvent) {
        debug!(?event, "emitting dialogue event");
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::Intent;
    use crate::speech::Utterance;

    fn create_state_machine() -> (StateMachine, broadcast::Receiver<DialogueEvent>) {
        let (tx, rx) = broadcast::channel(16);
        (StateMachine::new(tx), rx)
    }

    fn heard(text: &str) -> Recognition {
        Recognition::Heard(Utterance::new(text))
    }

    fn drain(rx: &mut broadcast::Receiver<DialogueEvent>) -> Vec<DialogueEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn test_initial_state() {
        let (sm, _) = create_state_machine();
        assert_eq!(sm.state(), DialogueState::Idle);
    }

    #[test]
    fn test_idle_to_alarm_and_back() {
        let (mut sm, _) = create_state_machine();

        sm.handle(&heard("set alarm"));
        assert_eq!(sm.state(), DialogueState::AwaitAlarmTime);

        sm.handle(&heard("whatever was said"));
        assert_eq!(sm.state(), DialogueState::Idle);
    }

    #[test]
    fn test_failure_in_idle_changes_nothing() {
        let (mut sm, mut rx) = create_state_machine();

        let transition = sm.handle(&Recognition::Failed);
        assert!(transition.actions.is_empty());
        assert_eq!(sm.state(), DialogueState::Idle);
        assert!(matches!(drain(&mut rx)[..], [DialogueEvent::RecognitionIgnored]));
    }

    #[test]
    fn test_follow_up_events() {
        let (mut sm, mut rx) = create_state_machine();

        sm.handle(&heard("weather"));
        let events = drain(&mut rx);
        assert!(matches!(
            events[..],
            [
                DialogueEvent::IntentMatched { intent: Intent::Weather },
                DialogueEvent::FollowUpStarted { state: DialogueState::AwaitWeatherCity },
            ]
        ));

        sm.handle(&heard("london"));
        let events = drain(&mut rx);
        assert!(matches!(
            events[..],
            [DialogueEvent::FollowUpResolved { state: DialogueState::AwaitWeatherCity, .. }]
        ));
    }

    #[test]
    fn test_shutdown_confirmation_terminates() {
        let (mut sm, mut rx) = create_state_machine();

        sm.handle(&heard("shutdown pc"));
        assert_eq!(sm.state(), DialogueState::AwaitConfirmShutdown);

        let transition = sm.handle(&heard("yes sir"));
        assert_eq!(transition.flow, Flow::Exit);
        assert_eq!(sm.state(), DialogueState::Idle);
        assert!(matches!(drain(&mut rx).last(), Some(DialogueEvent::Terminated)));
    }

    #[test]
    fn test_unmatched_stays_idle() {
        let (mut sm, mut rx) = create_state_machine();

        sm.handle(&heard("sing me a song"));
        sm.handle(&heard("sing me a song"));
        assert_eq!(sm.state(), DialogueState::Idle);

        let events = drain(&mut rx);
        assert_eq!(events.len(), 2);
        assert!(events
            .iter()
            .all(|e| matches!(e, DialogueEvent::Unmatched { utterance } if utterance == "sing me a song")));
    }
}
