//! Intent module: the ordered rule table and first-match lookup

mod matcher;
mod table;

pub use matcher::match_intent;
pub use table::{Intent, IntentRule, INTENT_TABLE};
