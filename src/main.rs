//! jarvis-daemon: voice-driven personal desktop assistant
//!
//! Reads one transcribed utterance per line from stdin, classifies it
//! against an ordered intent table and runs the matching action:
//! - Opening websites, searches and applications
//! - Telling the time and date, setting a blocking alarm
//! - Encyclopedia summaries and chat answers over HTTP
//! - Power actions behind a spoken yes/no confirmation
//!
//! Replies go to stdout (and an optional synthesizer command); logs go
//! to stderr.

mod alarm;
mod assistant;
mod chat;
mod config;
mod desktop;
mod events;
mod executor;
mod intent;
mod knowledge;
mod lifecycle;
mod speech;
mod state;

#[cfg(test)]
mod testing;

use std::io::{self, BufReader};

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::alarm::SystemClock;
use crate::assistant::{Assistant, Outcome};
use crate::chat::OpenAiChat;
use crate::config::Config;
use crate::desktop::SystemDesktop;
use crate::events::DialogueEvent;
use crate::executor::Executor;
use crate::knowledge::WikipediaClient;
use crate::lifecycle::ShutdownSignal;
use crate::speech::{ChannelInput, ConsoleVoice, TranscriptListener};
use crate::state::StateMachine;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Stdout carries the conversation, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "jarvis-daemon starting");

    let config = Config::load()?;
    info!(?config, "configuration loaded");

    let shutdown = ShutdownSignal::new();

    // Transcript listener -> dialogue loop
    let (recognition_tx, recognition_rx) = mpsc::channel(32);
    // State machine -> event log
    let (event_tx, mut event_rx) = broadcast::channel::<DialogueEvent>(64);

    let knowledge = WikipediaClient::new(
        &config.wiki_url,
        config.http_timeout,
        config.summary_sentences,
    )
    .context("failed to build knowledge client")?;

    let chat = OpenAiChat::new(
        &config.chat_url,
        &config.chat_model,
        config.chat_api_key.clone(),
        &config.assistant_name,
        config.http_timeout,
    )
    .context("failed to build chat client")?;
    if !chat.is_configured() {
        warn!("OPENAI_API_KEY not set, chat answers are disabled");
    }

    if config.dry_run {
        info!("dry run: desktop actions are logged, not executed");
    }

    let executor = Executor::new(
        Box::new(ConsoleVoice::new(
            &config.assistant_name,
            config.tts_command.as_deref(),
        )),
        Box::new(SystemDesktop::new(config.dry_run)),
        knowledge,
        chat,
        SystemClock,
        &config,
    );

    let mut assistant = Assistant::new(
        &config.assistant_name,
        StateMachine::new(event_tx.clone()),
        ChannelInput::new(recognition_rx),
        executor,
    );

    // Runs on a dedicated thread; stdin reads block
    let listener = TranscriptListener::new(recognition_tx);
    listener
        .start(BufReader::new(io::stdin()))
        .context("failed to start transcript listener")?;
    info!("transcript listener started");

    assistant.greet();

    tokio::select! {
        outcome = assistant.run() => {
            match outcome {
                Outcome::Exited => info!("session ended by user"),
                Outcome::InputClosed => info!("end of input"),
            }
        }

        // Log dialogue events
        _ = async {
            loop {
                match event_rx.recv().await {
                    Ok(event) => match serde_json::to_string(&event) {
                        Ok(json) => debug!(%event, %json, "dialogue event"),
                        Err(e) => warn!(?e, %event, "failed to encode dialogue event"),
                    },
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "dialogue event receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        } => {
            info!("dialogue event handler exited");
        }

        _ = async {
            if let Err(e) = shutdown.wait().await {
                // Keep serving; only end of input or an exit phrase stops us
                error!(?e, "failed to listen for shutdown signals");
                std::future::pending::<()>().await;
            }
        } => {
            info!("shutdown signal received");
        }
    }

    info!(state = %assistant.state(), "shutting down...");
    if listener.is_running() {
        // The reader thread exits after its current blocking read
        listener.stop();
    }
    info!("jarvis-daemon stopped");

    Ok(())
}
