//! Transcript listener
//!
//! Reads one transcription per line from a blocking reader (stdin in the
//! daemon) on a dedicated thread and forwards each recognition to the
//! dialogue loop. Acoustic recognition happens upstream of this process.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::input::Recognition;

/// Forwards transcripts from a blocking reader to the dialogue loop
pub struct TranscriptListener {
    /// Handed to the reader thread so the channel closes at end of input
    recognition_tx: Mutex<Option<mpsc::Sender<Recognition>>>,
    running: Arc<AtomicBool>,
}

impl TranscriptListener {
    /// Create a new transcript listener
    pub fn new(recognition_tx: mpsc::Sender<Recognition>) -> Self {
        Self {
            recognition_tx: Mutex::new(Some(recognition_tx)),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Start reading transcripts from `reader`
    ///
    /// Spawns a dedicated thread so the blocking read never stalls the
    /// runtime. The thread ends at end of input, when `stop()` is called
    /// (checked between lines), or when the dialogue loop goes away.
    /// A listener reads a single input for its whole life.
    pub fn start<R>(&self, reader: R) -> Result<(), ListenerError>
    where
        R: BufRead + Send + 'static,
    {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(ListenerError::AlreadyRunning);
        }

        let taken = self
            .recognition_tx
            .lock()
            .ok()
            .and_then(|mut slot| slot.take());
        let Some(recognition_tx) = taken else {
            self.running.store(false, Ordering::SeqCst);
            return Err(ListenerError::Finished);
        };
        let running = Arc::clone(&self.running);

        thread::Builder::new()
            .name("speech-input".to_string())
            .spawn(move || {
                info!("speech input thread started");

                if let Err(e) = read_transcripts(reader, recognition_tx, running.clone()) {
                    error!(?e, "speech input error");
                }

                running.store(false, Ordering::SeqCst);
                info!("speech input thread stopped");
            })
            .map_err(|e| {
                self.running.store(false, Ordering::SeqCst);
                ListenerError::ThreadSpawn(e.to_string())
            })?;

        Ok(())
    }

    /// Stop forwarding transcripts
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Check if the listener is currently running
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Errors that can occur in the transcript listener
#[derive(Debug, thiserror::Error)]
pub enum ListenerError {
    #[error("transcript listener is already running")]
    AlreadyRunning,

    #[error("transcript listener already consumed its input")]
    Finished,

    #[error("failed to spawn listener thread: {0}")]
    ThreadSpawn(String),

    #[error("failed to read transcript: {0}")]
    Read(#[from] std::io::Error),
}

fn read_transcripts<R: BufRead>(
    reader: R,
    recognition_tx: mpsc::Sender<Recognition>,
    running: Arc<AtomicBool>,
) -> Result<(), ListenerError> {
    for line in reader.lines() {
        if !running.load(Ordering::SeqCst) {
            break;
        }

        let recognition = Recognition::from_transcript(&line?);
        match &recognition {
            Recognition::Heard(utterance) => debug!(%utterance, "user said"),
            Recognition::Failed => debug!("no usable transcription"),
        }

        // Not in an async context, so block until the loop has room
        if recognition_tx.blocking_send(recognition).is_err() {
            warn!("failed to forward transcript - dialogue loop gone?");
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::speech::{ChannelInput, SpeechInput, Utterance};

    #[test]
    fn test_listener_creation() {
        let (tx, _rx) = mpsc::channel(32);
        let listener = TranscriptListener::new(tx);
        assert!(!listener.is_running());
    }

    #[tokio::test]
    async fn test_forwards_lines_until_end_of_input() {
        let (tx, rx) = mpsc::channel(32);
        let listener = TranscriptListener::new(tx);
        let mut input = ChannelInput::new(rx);

        listener
            .start(Cursor::new("Hello\n\nSet Alarm\n"))
            .unwrap();

        assert_eq!(
            input.acquire().await,
            Some(Recognition::Heard(Utterance::new("hello")))
        );
        assert_eq!(input.acquire().await, Some(Recognition::Failed));
        assert_eq!(
            input.acquire().await,
            Some(Recognition::Heard(Utterance::new("set alarm")))
        );
        assert_eq!(input.acquire().await, None);
    }

    #[test]
    fn test_double_start_rejected() {
        let (tx, _rx) = mpsc::channel(32);
        let listener = TranscriptListener::new(tx);
        // Model a reader thread that is still active
        listener.running.store(true, Ordering::SeqCst);
        assert!(matches!(
            listener.start(Cursor::new("")),
            Err(ListenerError::AlreadyRunning)
        ));
        listener.stop();
        assert!(!listener.is_running());
    }

    #[tokio::test]
    async fn test_restart_after_end_of_input_rejected() {
        let (tx, rx) = mpsc::channel(32);
        let listener = TranscriptListener::new(tx);
        let mut input = ChannelInput::new(rx);

        listener.start(Cursor::new("")).unwrap();
        assert_eq!(input.acquire().await, None);

        // The thread may still be clearing its flag
        while listener.is_running() {
            tokio::task::yield_now().await;
        }
        assert!(matches!(
            listener.start(Cursor::new("hello\n")),
            Err(ListenerError::Finished)
        ));
    }
}
