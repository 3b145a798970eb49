//! The ordered intent table
//!
//! Rules are tried top to bottom and the first hit wins, so a rule whose
//! trigger also appears inside a later rule's phrases shadows that rule.
//! "stop the music" exits, "search wikipedia for rust" looks up rust, and
//! "goodbye" is caught by `bye`.

use serde::{Deserialize, Serialize};

use crate::desktop::{App, Site};
use crate::speech::Utterance;

/// What the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", content = "target", rename_all = "snake_case")]
pub enum Intent {
    Wikipedia,
    OpenSite(Site),
    TellTime,
    TellDate,
    Launch(App),
    SetAlarm,
    Shutdown,
    Exit,
    Greeting,
    WellBeing,
    Thanks,
    Capabilities,
    Joke,
    PlayMusic,
    WebSearch,
    Weather,
    News,
    Reminder,
    Translate,
    Chat,
    Ready,
    Sleep,
    Restart,
    LockScreen,
    WakeScreen,
}

/// One table entry: any trigger phrase selects the intent
#[derive(Debug)]
pub struct IntentRule {
    pub triggers: &'static [&'static str],
    pub intent: Intent,
}

impl IntentRule {
    pub fn matches(&self, utterance: &Utterance) -> bool {
        self.triggers.iter().any(|trigger| utterance.contains(trigger))
    }
}

const fn rule(triggers: &'static [&'static str], intent: Intent) -> IntentRule {
    IntentRule { triggers, intent }
}

pub static INTENT_TABLE: &[IntentRule] = &[
    rule(&["wikipedia"], Intent::Wikipedia),
    rule(&["open youtube"], Intent::OpenSite(Site::YouTube)),
    rule(&["open google"], Intent::OpenSite(Site::Google)),
    rule(&["open stack overflow"], Intent::OpenSite(Site::StackOverflow)),
    rule(&["open github"], Intent::OpenSite(Site::GitHub)),
    rule(&["open instagram"], Intent::OpenSite(Site::Instagram)),
    rule(&["open facebook"], Intent::OpenSite(Site::Facebook)),
    rule(&["open twitter"], Intent::OpenSite(Site::Twitter)),
    rule(&["open linkedin"], Intent::OpenSite(Site::LinkedIn)),
    rule(&["open whatsapp"], Intent::OpenSite(Site::WhatsApp)),
    rule(&["open amazon"], Intent::OpenSite(Site::Amazon)),
    rule(&["open flipkart"], Intent::OpenSite(Site::Flipkart)),
    rule(&["open gmail"], Intent::OpenSite(Site::Gmail)),
    rule(&["the time"], Intent::TellTime),
    rule(&["the date"], Intent::TellDate),
    rule(&["vs code"], Intent::Launch(App::VsCode)),
    rule(&["open discord"], Intent::Launch(App::Discord)),
    rule(&["set alarm"], Intent::SetAlarm),
    rule(
        &["shutdown pc", "shutdown computer", "shutdown the system"],
        Intent::Shutdown,
    ),
    rule(&["exit", "stop", "bye", "goodbye"], Intent::Exit),
    rule(&["hello"], Intent::Greeting),
    rule(&["how are you"], Intent::WellBeing),
    rule(&["thank you"], Intent::Thanks),
    rule(&["what can you do"], Intent::Capabilities),
    rule(&["tell me a joke"], Intent::Joke),
    rule(&["music"], Intent::PlayMusic),
    rule(&["search"], Intent::WebSearch),
    rule(&["weather"], Intent::Weather),
    rule(&["news"], Intent::News),
    rule(&["calculator"], Intent::Launch(App::Calculator)),
    rule(&["notepad"], Intent::Launch(App::Notepad)),
    rule(&["valo"], Intent::Launch(App::Valorant)),
    rule(&["reminder"], Intent::Reminder),
    rule(&["translate"], Intent::Translate),
    rule(&["tell me about"], Intent::Chat),
    rule(&["hotstar"], Intent::OpenSite(Site::Hotstar)),
    rule(&["netflix"], Intent::OpenSite(Site::Netflix)),
    rule(&["spotify"], Intent::OpenSite(Site::Spotify)),
    rule(&["get up baby"], Intent::Ready),
    rule(&["go to sleep"], Intent::Sleep),
    rule(&["restart the system"], Intent::Restart),
    rule(&["open camera"], Intent::Launch(App::Camera)),
    rule(&["lock screen"], Intent::LockScreen),
    rule(&["wake up"], Intent::WakeScreen),
];
