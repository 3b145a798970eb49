//! Action executor
//!
//! Carries out the actions of a dialogue turn against the collaborators.
//! Every failure is converted into speech or a log line here; nothing
//! propagates back into the dialogue loop.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::alarm::{AlarmScheduler, Clock};
use crate::chat::{ChatError, ChatResponder};
use crate::config::Config;
use crate::desktop::{App, Desktop, WebTarget};
use crate::knowledge::{KnowledgeSource, LookupOutcome};
use crate::speech::SpeechOutput;
use crate::state::Action;

pub const ALARM_RING: &str = "Wake up! It's time!";
pub const LOOKUP_FAILED: &str = "Something went wrong while searching Wikipedia.";
pub const CHAT_UNAVAILABLE: &str = "Sorry, I can't answer that right now.";

pub struct Executor<K, C, T> {
    voice: Box<dyn SpeechOutput>,
    desktop: Box<dyn Desktop>,
    knowledge: K,
    chat: C,
    clock: T,
    scheduler: AlarmScheduler,
    app_commands: HashMap<App, String>,
}

impl<K, C, T> Executor<K, C, T>
where
    K: KnowledgeSource,
    C: ChatResponder,
    T: Clock,
{
    pub fn new(
        voice: Box<dyn SpeechOutput>,
        desktop: Box<dyn Desktop>,
        knowledge: K,
        chat: C,
        clock: T,
        config: &Config,
    ) -> Self {
        Self {
            voice,
            desktop,
            knowledge,
            chat,
            clock,
            scheduler: AlarmScheduler::new(config.alarm_poll_interval),
            app_commands: config.app_commands.clone(),
        }
    }

    /// Current local time
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    pub fn say(&mut self, text: &str) {
        self.voice.render(text);
    }

    /// Run one action to completion
    pub async fn execute(&mut self, action: &Action) {
        debug!(?action, "executing action");

        match action {
            Action::Speak(text) => self.voice.render(text),
            Action::Display(text) => self.voice.display(text),
            Action::Open(target) => self.open(target),
            Action::Launch(app) => self.launch(*app),
            Action::Power(kind) => {
                if let Err(e) = self.desktop.power(*kind) {
                    warn!(?e, ?kind, "power action failed");
                }
            }
            Action::Lookup(topic) => self.lookup(topic).await,
            Action::Chat(query) => self.answer(query).await,
            Action::AnnounceTime => {
                let time = self.clock.now().format("%H:%M:%S");
                self.voice.render(&format!("The time is {}", time));
            }
            Action::AnnounceDate => {
                let date = self.clock.now().format("%Y-%m-%d");
                self.voice.render(&format!("Today's date is {}", date));
            }
            Action::Alarm(target) => {
                self.scheduler.wait_for(*target, &self.clock).await;
                info!(%target, "alarm ringing");
                self.voice.render(ALARM_RING);
            }
        }
    }

    fn open(&mut self, target: &WebTarget) {
        let result = target
            .url()
            .and_then(|url| self.desktop.open_url(url.as_str()));
        if let Err(e) = result {
            warn!(?e, ?target, "failed to open page");
        }
    }

    fn launch(&mut self, app: App) {
        let command = self
            .app_commands
            .get(&app)
            .map(String::as_str)
            .unwrap_or_else(|| app.default_command());

        if let Err(e) = self.desktop.launch(command) {
            warn!(?e, ?app, "failed to launch application");
        }
    }

    async fn lookup(&mut self, topic: &str) {
        match self.knowledge.lookup(topic).await {
            LookupOutcome::Summary(summary) => {
                self.voice.render("According to Wikipedia");
                self.voice.display(&summary);
                self.voice.render(&summary);
            }
            LookupOutcome::Ambiguous(options) => {
                self.voice.render(&format!(
                    "The term '{}' is ambiguous. Please be more specific.",
                    topic
                ));
                self.voice
                    .display(&format!("Disambiguation options: {}", options.join(", ")));
            }
            LookupOutcome::NotFound => {
                self.voice.render(&format!(
                    "Sorry, I couldn't find any results for '{}'.",
                    topic
                ));
            }
            LookupOutcome::Failed(reason) => {
                warn!(%reason, %topic, "knowledge lookup failed");
                self.voice.render(LOOKUP_FAILED);
            }
        }
    }

    async fn answer(&mut self, query: &str) {
        match self.chat.respond(query).await {
            Ok(answer) => {
                self.voice.render(&answer);
                self.voice.display(&answer);
            }
            Err(ChatError::NotConfigured) => {
                info!("chat requested but no backend is configured");
                self.voice.render(CHAT_UNAVAILABLE);
            }
            Err(e) => {
                warn!(?e, "chat request failed");
                self.voice.render(CHAT_UNAVAILABLE);
            }
        }
    }
}
