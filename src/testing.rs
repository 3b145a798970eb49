//! Test doubles for the assistant's collaborators

use std::cell::Cell;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::NaiveDateTime;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::alarm::Clock;
use crate::chat::{ChatError, ChatResponder};
use crate::desktop::{Desktop, DesktopError, PowerAction};
use crate::knowledge::{KnowledgeSource, LookupOutcome};
use crate::speech::{Recognition, SpeechInput, SpeechOutput};

/// Clock whose time only moves when the scheduler sleeps
pub struct SimulatedClock {
    now: Cell<NaiveDateTime>,
    sleeps: Cell<u32>,
}

impl SimulatedClock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(start),
            sleeps: Cell::new(0),
        }
    }

    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

impl Clock for SimulatedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }

    async fn sleep(&self, duration: Duration) {
        let step = chrono::Duration::from_std(duration).unwrap();
        self.now.set(self.now.get() + step);
        self.sleeps.set(self.sleeps.get() + 1);
    }
}

/// Input that replays a fixed script, then closes
pub struct ScriptedInput(VecDeque<Recognition>);

impl ScriptedInput {
    pub fn new(script: impl IntoIterator<Item = Recognition>) -> Self {
        Self(script.into_iter().collect())
    }
}

impl SpeechInput for ScriptedInput {
    async fn acquire(&mut self) -> Option<Recognition> {
        self.0.pop_front()
    }
}

/// Everything rendered, in order; displayed text is prefixed with `[display] `
#[derive(Clone, Default)]
pub struct RecordingVoice(Arc<Mutex<Vec<String>>>);

impl RecordingVoice {
    pub fn lines(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

impl SpeechOutput for RecordingVoice {
    fn render(&mut self, text: &str) {
        self.0.lock().unwrap().push(text.to_string());
    }

    fn display(&mut self, text: &str) {
        self.0.lock().unwrap().push(format!("[display] {}", text));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopCall {
    OpenUrl(String),
    Launch(String),
    Power(PowerAction),
}

#[derive(Clone, Default)]
pub struct RecordingDesktop(Arc<Mutex<Vec<DesktopCall>>>);

impl RecordingDesktop {
    pub fn calls(&self) -> Vec<DesktopCall> {
        self.0.lock().unwrap().clone()
    }
}

impl Desktop for RecordingDesktop {
    fn open_url(&mut self, url: &str) -> Result<(), DesktopError> {
        self.0.lock().unwrap().push(DesktopCall::OpenUrl(url.to_string()));
        Ok(())
    }

    fn launch(&mut self, command: &str) -> Result<(), DesktopError> {
        self.0.lock().unwrap().push(DesktopCall::Launch(command.to_string()));
        Ok(())
    }

    fn power(&mut self, action: PowerAction) -> Result<(), DesktopError> {
        self.0.lock().unwrap().push(DesktopCall::Power(action));
        Ok(())
    }
}

/// Knowledge source that always gives the same answer
pub struct FixedKnowledge(pub LookupOutcome);

impl KnowledgeSource for FixedKnowledge {
    async fn lookup(&self, _topic: &str) -> LookupOutcome {
        self.0.clone()
    }
}

/// Chat backend that echoes the question, or is unavailable
pub struct EchoChat {
    pub available: bool,
}

impl ChatResponder for EchoChat {
    async fn respond(&self, query: &str) -> Result<String, ChatError> {
        if self.available {
            Ok(format!("You asked: {}", query))
        } else {
            Err(ChatError::NotConfigured)
        }
    }
}

/// Serve canned HTTP responses on localhost, one connection each, in order.
/// Returns the base url.
pub async fn serve_http(responses: Vec<(u16, &'static str)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut stream, _) = listener.accept().await.unwrap();
            read_request(&mut stream).await;
            let reply = format!(
                "HTTP/1.1 {} X\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            stream.write_all(reply.as_bytes()).await.unwrap();
            stream.shutdown().await.ok();
        }
    });

    format!("http://{}", addr)
}

/// Read one request: headers, then `content-length` bytes of body
async fn read_request(stream: &mut tokio::net::TcpStream) {
    let mut request = Vec::new();
    let mut buf = [0u8; 1024];

    loop {
        let n = stream.read(&mut buf).await.unwrap();
        if n == 0 {
            return;
        }
        request.extend_from_slice(&buf[..n]);

        let text = String::from_utf8_lossy(&request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            continue;
        };
        let content_length = text[..header_end]
            .lines()
            .filter_map(|line| line.split_once(':'))
            .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
            .and_then(|(_, value)| value.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if request.len() >= header_end + 4 + content_length {
            return;
        }
    }
}

/// Plain HTTP client for talking to [`serve_http`]
pub fn local_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}
