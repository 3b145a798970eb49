//! Configuration loading and management

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::alarm::DEFAULT_POLL_INTERVAL;
use crate::desktop::App;

/// Assistant configuration
#[derive(Clone)]
pub struct Config {
    /// Name the assistant introduces itself with
    pub assistant_name: String,

    /// Interval between wall-clock checks while an alarm is pending
    pub alarm_poll_interval: Duration,

    /// Sentences kept from a knowledge summary
    pub summary_sentences: usize,

    /// Base url of the Wikipedia instance used for lookups
    pub wiki_url: String,

    /// Base url of the OpenAI-compatible chat API
    pub chat_url: String,
    pub chat_model: String,
    /// Chat is disabled without a key
    pub chat_api_key: Option<String>,

    /// External speech synthesizer invoked with the text as last argument
    pub tts_command: Option<String>,

    /// Timeout for knowledge and chat requests
    pub http_timeout: Duration,

    /// Log desktop actions instead of running them
    pub dry_run: bool,

    /// Shell command per launchable application
    pub app_commands: HashMap<App, String>,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let poll_secs: u64 = parse_or(&var, "JARVIS_ALARM_POLL_SECS", DEFAULT_POLL_INTERVAL.as_secs())?;
        // Longer than a minute and the target minute could be skipped
        if !(1..=60).contains(&poll_secs) {
            bail!("JARVIS_ALARM_POLL_SECS must be between 1 and 60, got {}", poll_secs);
        }

        let app_commands = App::ALL
            .iter()
            .map(|app| {
                let command = var(&format!("JARVIS_APP_{}", app.env_key()))
                    .unwrap_or_else(|| app.default_command().to_string());
                (*app, command)
            })
            .collect();

        Ok(Self {
            assistant_name: var("JARVIS_NAME").unwrap_or_else(|| "Jarvis".to_string()),
            alarm_poll_interval: Duration::from_secs(poll_secs),
            summary_sentences: parse_or(&var, "JARVIS_SUMMARY_SENTENCES", 5)?,
            wiki_url: var("JARVIS_WIKI_URL")
                .unwrap_or_else(|| "https://en.wikipedia.org".to_string()),
            chat_url: var("JARVIS_CHAT_URL")
                .unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            chat_model: var("JARVIS_CHAT_MODEL").unwrap_or_else(|| "gpt-4o-mini".to_string()),
            chat_api_key: var("OPENAI_API_KEY"),
            tts_command: var("JARVIS_TTS_COMMAND"),
            http_timeout: Duration::from_secs(parse_or(&var, "JARVIS_HTTP_TIMEOUT_SECS", 10)?),
            dry_run: parse_or(&var, "JARVIS_DRY_RUN", false)?,
            app_commands,
        })
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(value) => value
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", key, value)),
        None => Ok(default),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("assistant_name", &self.assistant_name)
            .field("alarm_poll_interval", &self.alarm_poll_interval)
            .field("summary_sentences", &self.summary_sentences)
            .field("wiki_url", &self.wiki_url)
            .field("chat_url", &self.chat_url)
            .field("chat_model", &self.chat_model)
            .field("chat_api_key", &self.chat_api_key.as_ref().map(|_| "<redacted>"))
            .field("tts_command", &self.tts_command)
            .field("http_timeout", &self.http_timeout)
            .field("dry_run", &self.dry_run)
            .field("app_commands", &self.app_commands)
            .finish()
    }
}
