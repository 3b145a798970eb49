//! First-match intent lookup

use super::{Intent, IntentRule, INTENT_TABLE};
use crate::speech::Utterance;

/// Classify an utterance against the built-in table
pub fn match_intent(utterance: &Utterance) -> Option<Intent> {
    match_in(INTENT_TABLE, utterance)
}

/// First rule in `table` whose trigger occurs in the utterance.
///
/// No ranking and no backtracking: declaration order alone decides
/// between overlapping triggers.
pub fn match_in(table: &[IntentRule], utterance: &Utterance) -> Option<Intent> {
    table
        .iter()
        .find(|rule| rule.matches(utterance))
        .map(|rule| rule.intent)
}
