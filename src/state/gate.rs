//! Yes/no confirmation for irreversible actions

use serde::{Deserialize, Serialize};

use crate::desktop::PowerAction;

/// Word whose presence anywhere in the answer confirms
const CONFIRM_WORD: &str = "yes";

/// Whether a confirmation answer accepts the pending action.
///
/// Substring containment, not equality: "yes please" and "yes sir"
/// confirm, and so does "yesterday". Everything else cancels.
pub fn confirms(answer: &str) -> bool {
    answer.to_lowercase().contains(CONFIRM_WORD)
}

/// Destructive action waiting on a confirmation answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingAction {
    Shutdown,
    Restart,
}

impl PendingAction {
    pub fn prompt(&self) -> &'static str {
        match self {
            PendingAction::Shutdown => {
                "Are you sure you want to shut down the computer? Please say yes or no."
            }
            PendingAction::Restart => {
                "Are you sure you want to restart the computer? Please say yes or no."
            }
        }
    }

    pub fn confirmed_message(&self) -> &'static str {
        match self {
            PendingAction::Shutdown => "Shutting down the system. Goodbye!",
            PendingAction::Restart => "Restarting the system. Goodbye!",
        }
    }

    pub fn cancelled_message(&self) -> &'static str {
        match self {
            PendingAction::Shutdown => "Shutdown canceled.",
            PendingAction::Restart => "Restart canceled.",
        }
    }

    pub fn power_action(&self) -> PowerAction {
        match self {
            PendingAction::Shutdown => PowerAction::Shutdown,
            PendingAction::Restart => PowerAction::Restart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::speech::Recognition;

    #[test]
    fn test_containment_confirms() {
        assert!(confirms("yes"));
        assert!(confirms("yes please"));
        assert!(confirms("oh yes sir"));
        assert!(confirms("Yes"));
    }

    #[test]
    fn test_loose_containment_is_kept() {
        assert!(confirms("yesterday"));
    }

    #[test]
    fn test_everything_else_cancels() {
        assert!(!confirms("no"));
        assert!(!confirms(""));
        assert!(!confirms(Recognition::Failed.payload()));
        assert!(!confirms("yeah sure"));
    }

    #[test]
    fn test_pending_action_maps_to_power() {
        assert_eq!(PendingAction::Shutdown.power_action(), PowerAction::Shutdown);
        assert_eq!(PendingAction::Restart.power_action(), PowerAction::Restart);
    }
}
