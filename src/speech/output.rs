//! Speech output sink

use std::process::Command;

use tracing::{debug, warn};

/// Renders assistant output.
///
/// `render` is speech: it returns only once the text has been spoken, so
/// handlers can speak first and act afterwards. `display` is visual-only
/// output such as disambiguation lists.
pub trait SpeechOutput {
    fn render(&mut self, text: &str);
    fn display(&mut self, text: &str);
}

/// Prints speech to stdout, optionally piping it through an external
/// synthesizer command (e.g. `espeak`)
pub struct ConsoleVoice {
    name: String,
    synthesizer: Option<Vec<String>>,
}

impl ConsoleVoice {
    pub fn new(name: &str, synthesizer: Option<&str>) -> Self {
        let synthesizer = synthesizer
            .map(|cmd| cmd.split_whitespace().map(str::to_string).collect::<Vec<_>>())
            .filter(|parts| !parts.is_empty());

        Self {
            name: name.to_string(),
            synthesizer,
        }
    }

    fn synthesize(&self, text: &str) {
        let Some((program, args)) = self.synthesizer.as_ref().and_then(|p| p.split_first()) else {
            return;
        };

        debug!(%program, "synthesizing speech");
        match Command::new(program).args(args).arg(text).status() {
            Ok(status) if status.success() => {}
            Ok(status) => warn!(%program, ?status, "speech synthesizer exited with failure"),
            Err(e) => warn!(%program, ?e, "failed to run speech synthesizer"),
        }
    }
}

impl SpeechOutput for ConsoleVoice {
    fn render(&mut self, text: &str) {
        println!("{}: {}", self.name, text);
        self.synthesize(text);
    }

    fn display(&mut self, text: &str) {
        println!("{}", text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthesizer_command_split() {
        let voice = ConsoleVoice::new("Jarvis", Some("espeak -v en"));
        assert_eq!(
            voice.synthesizer,
            Some(vec!["espeak".to_string(), "-v".to_string(), "en".to_string()])
        );
    }

    #[test]
    fn test_blank_synthesizer_ignored() {
        let voice = ConsoleVoice::new("Jarvis", Some("   "));
        assert!(voice.synthesizer.is_none());
    }
}
