//! Dialogue states

use serde::{Deserialize, Serialize};

use super::PendingAction;

/// What the assistant expects the next utterance to mean
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DialogueState {
    /// No pending expectation; the next utterance is classified
    #[default]
    Idle,
    /// Next utterance is a spoken alarm time
    AwaitAlarmTime,
    /// Next utterance answers the shutdown confirmation
    AwaitConfirmShutdown,
    /// Next utterance answers the restart confirmation
    AwaitConfirmRestart,
    /// Next utterance is a web search query
    AwaitSearchQuery,
    /// Next utterance is a city name
    AwaitWeatherCity,
    /// Next utterance is what to play
    AwaitMusicQuery,
    /// Next utterance is the reminder text
    AwaitReminderText,
    /// Next utterance is the text to translate
    AwaitTranslateText,
    /// Next utterance is a free-form question
    AwaitChatQuery,
}

impl DialogueState {
    pub fn is_idle(&self) -> bool {
        matches!(self, DialogueState::Idle)
    }

    /// The deferred action a confirmation state resolves to
    pub fn pending_action(&self) -> Option<PendingAction> {
        match self {
            DialogueState::AwaitConfirmShutdown => Some(PendingAction::Shutdown),
            DialogueState::AwaitConfirmRestart => Some(PendingAction::Restart),
            _ => None,
        }
    }

    /// The state that waits on a confirmation for `action`
    pub fn confirming(action: PendingAction) -> Self {
        match action {
            PendingAction::Shutdown => DialogueState::AwaitConfirmShutdown,
            PendingAction::Restart => DialogueState::AwaitConfirmRestart,
        }
    }
}

impl std::fmt::Display for DialogueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DialogueState::Idle => write!(f, "Idle"),
            DialogueState::AwaitAlarmTime => write!(f, "AwaitAlarmTime"),
            DialogueState::AwaitConfirmShutdown => write!(f, "AwaitConfirmShutdown"),
            DialogueState::AwaitConfirmRestart => write!(f, "AwaitConfirmRestart"),
            DialogueState::AwaitSearchQuery => write!(f, "AwaitSearchQuery"),
            DialogueState::AwaitWeatherCity => write!(f, "AwaitWeatherCity"),
            DialogueState::AwaitMusicQuery => write!(f, "AwaitMusicQuery"),
            DialogueState::AwaitReminderText => write!(f, "AwaitReminderText"),
            DialogueState::AwaitTranslateText => write!(f, "AwaitTranslateText"),
            DialogueState::AwaitChatQuery => write!(f, "AwaitChatQuery"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_idle() {
        assert!(DialogueState::default().is_idle());
        assert_eq!(DialogueState::default().pending_action(), None);
    }

    #[test]
    fn test_confirmation_states_carry_pending_action() {
        for action in [PendingAction::Shutdown, PendingAction::Restart] {
            let state = DialogueState::confirming(action);
            assert!(!state.is_idle());
            assert_eq!(state.pending_action(), Some(action));
        }
        assert_eq!(DialogueState::AwaitSearchQuery.pending_action(), None);
    }
}
