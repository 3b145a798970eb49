//! Pure dialogue transitions
//!
//! `step` maps (state, recognition) to the actions to run and the next
//! state. It performs no I/O; the executor carries the actions out.

use crate::alarm::AlarmTarget;
use crate::desktop::{App, PowerAction, WebTarget};
use crate::intent::{match_intent, Intent};
use crate::knowledge::extract_topic;
use crate::speech::Recognition;

use super::{confirms, DialogueState, PendingAction};

pub const FALLBACK: &str = "Sorry, I didn't understand that. Can you please repeat?";
pub const FAREWELL: &str = "Goodbye! Have a great day.";
pub const ALARM_PROMPT: &str =
    "What time should I set the alarm for? For example, say 6 30 AM or 18 45.";
pub const ALARM_FORMAT_ERROR: &str = "Sorry, I didn't understand the time format.";

/// Phrase stripped from music requests before searching
const MUSIC_FILLER: &str = "jarvis play music";

/// A side effect for the executor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Speak(String),
    /// Visual-only output, never synthesized
    Display(String),
    Open(WebTarget),
    Launch(App),
    Power(PowerAction),
    /// Encyclopedia lookup for a topic
    Lookup(String),
    /// Free-form question for the chat backend
    Chat(String),
    AnnounceTime,
    AnnounceDate,
    /// Block the turn until the target time, then ring
    Alarm(AlarmTarget),
}

/// Whether the dialogue loop keeps running after this turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Outcome of one dialogue turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub actions: Vec<Action>,
    pub next: DialogueState,
    pub flow: Flow,
    /// Intent classified this turn (idle turns only)
    pub intent: Option<Intent>,
}

impl Transition {
    fn done(actions: Vec<Action>) -> Self {
        Self {
            actions,
            next: DialogueState::Idle,
            flow: Flow::Continue,
            intent: None,
        }
    }

    fn say(text: impl Into<String>) -> Self {
        Self::done(vec![Action::Speak(text.into())])
    }

    /// Spoken and also shown on screen
    fn reply(text: &str) -> Self {
        Self::done(vec![
            Action::Speak(text.to_string()),
            Action::Display(text.to_string()),
        ])
    }

    fn ask(prompt: &str, next: DialogueState) -> Self {
        Self {
            next,
            ..Self::say(prompt)
        }
    }

    fn exit(actions: Vec<Action>) -> Self {
        Self {
            flow: Flow::Exit,
            ..Self::done(actions)
        }
    }

    fn ignored() -> Self {
        Self::done(Vec::new())
    }

    fn with_intent(self, intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            ..self
        }
    }
}

/// Advance the dialogue by one recognition
pub fn step(state: DialogueState, recognition: &Recognition) -> Transition {
    match state {
        DialogueState::Idle => match recognition {
            Recognition::Failed => Transition::ignored(),
            Recognition::Heard(utterance) => match match_intent(utterance) {
                Some(intent) => handle(intent, utterance.as_str()).with_intent(intent),
                None => Transition::say(FALLBACK),
            },
        },
        // Follow-ups take the payload literally, failures included
        pending => resume(pending, recognition.payload()),
    }
}

/// Run the handler for a freshly classified intent
fn handle(intent: Intent, utterance: &str) -> Transition {
    match intent {
        Intent::Wikipedia => Transition::done(vec![
            Action::Speak("Searching Wikipedia...".to_string()),
            Action::Lookup(extract_topic(utterance)),
        ]),
        Intent::OpenSite(site) => Transition::done(vec![
            Action::Speak(format!("Opening {}", site.name())),
            Action::Open(WebTarget::Site(site)),
        ]),
        Intent::News => Transition::done(vec![
            Action::Speak("Opening the latest news.".to_string()),
            Action::Open(WebTarget::Site(crate::desktop::Site::GoogleNews)),
        ]),
        Intent::Launch(app) => Transition::done(vec![
            Action::Speak(app.announcement().to_string()),
            Action::Launch(app),
        ]),
        Intent::TellTime => Transition::done(vec![Action::AnnounceTime]),
        Intent::TellDate => Transition::done(vec![Action::AnnounceDate]),
        Intent::SetAlarm => Transition::ask(ALARM_PROMPT, DialogueState::AwaitAlarmTime),
        Intent::Shutdown => confirm(PendingAction::Shutdown),
        Intent::Restart => confirm(PendingAction::Restart),
        Intent::Exit => Transition::exit(vec![Action::Speak(FAREWELL.to_string())]),
        Intent::Greeting => Transition::reply("Hello! How can I assist you today?"),
        Intent::WellBeing => {
            Transition::reply("I am just a program, but thanks for asking! How can I help you?")
        }
        Intent::Thanks => {
            Transition::reply("You're welcome! If you need anything else, just let me know.")
        }
        Intent::Capabilities => Transition::reply(
            "I can assist you with various tasks such as searching Wikipedia, \
             opening websites, setting alarms, and more.",
        ),
        Intent::Joke => {
            Transition::reply("Why don't scientists trust atoms? Because they make up everything!")
        }
        Intent::Ready => Transition::reply("I am up and ready to assist you!"),
        Intent::PlayMusic => {
            Transition::ask("What would you like to listen to?", DialogueState::AwaitMusicQuery)
        }
        Intent::WebSearch => Transition::ask(
            "What would you like to search for?",
            DialogueState::AwaitSearchQuery,
        ),
        Intent::Weather => {
            Transition::ask("Please tell me the city name.", DialogueState::AwaitWeatherCity)
        }
        Intent::Reminder => Transition::ask(
            "What would you like to be reminded about?",
            DialogueState::AwaitReminderText,
        ),
        Intent::Translate => Transition::ask(
            "Please tell me the text you want to translate.",
            DialogueState::AwaitTranslateText,
        ),
        Intent::Chat => {
            Transition::ask("What would you like to ask about?", DialogueState::AwaitChatQuery)
        }
        Intent::Sleep => Transition::done(vec![
            Action::Speak("Your system is going to sleep mode.".to_string()),
            Action::Power(PowerAction::Sleep),
        ]),
        Intent::LockScreen => Transition::done(vec![
            Action::Speak("Locking the screen".to_string()),
            Action::Power(PowerAction::Lock),
        ]),
        // There is no programmatic unlock; the lock command is reissued
        Intent::WakeScreen => Transition::done(vec![
            Action::Speak("Unlocking the screen".to_string()),
            Action::Power(PowerAction::Lock),
        ]),
    }
}

fn confirm(action: PendingAction) -> Transition {
    Transition::ask(action.prompt(), DialogueState::confirming(action))
}

/// Resolve a pending follow-up with its payload; always ends back in Idle
fn resume(state: DialogueState, payload: &str) -> Transition {
    match state {
        DialogueState::Idle => Transition::ignored(),
        DialogueState::AwaitAlarmTime => match AlarmTarget::parse(payload) {
            Ok(target) => Transition::done(vec![
                Action::Speak(format!("Alarm set for {}", target)),
                Action::Alarm(target),
            ]),
            Err(_) => Transition::say(ALARM_FORMAT_ERROR),
        },
        DialogueState::AwaitConfirmShutdown | DialogueState::AwaitConfirmRestart => {
            let Some(action) = state.pending_action() else {
                return Transition::ignored();
            };
            if confirms(payload) {
                Transition::exit(vec![
                    Action::Speak(action.confirmed_message().to_string()),
                    Action::Power(action.power_action()),
                ])
            } else {
                Transition::say(action.cancelled_message())
            }
        }
        DialogueState::AwaitSearchQuery => {
            Transition::done(vec![Action::Open(WebTarget::Search(payload.to_string()))])
        }
        DialogueState::AwaitWeatherCity => {
            Transition::done(vec![Action::Open(WebTarget::Weather(payload.to_string()))])
        }
        DialogueState::AwaitMusicQuery => {
            let query = payload.replace(MUSIC_FILLER, "").trim().to_string();
            Transition::done(vec![
                Action::Speak(format!("Playing {}", query)),
                Action::Open(WebTarget::Video(query)),
            ])
        }
        DialogueState::AwaitReminderText => Transition::say(format!("Reminder set for: {}", payload)),
        DialogueState::AwaitTranslateText => Transition::say(format!("Translating: {}", payload)),
        DialogueState::AwaitChatQuery => Transition::done(vec![Action::Chat(payload.to_string())]),
    }
}
