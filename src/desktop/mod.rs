//! Desktop module: OS side effects
//!
//! Opening pages, launching applications and changing power state.
//! Results are only logged; the dialogue never branches on them.

mod system;
mod targets;

pub use system::SystemDesktop;
pub use targets::{App, PowerAction, Site, WebTarget};

/// OS side-effect sink
pub trait Desktop {
    fn open_url(&mut self, url: &str) -> Result<(), DesktopError>;
    fn launch(&mut self, command: &str) -> Result<(), DesktopError>;
    fn power(&mut self, action: PowerAction) -> Result<(), DesktopError>;
}

/// Errors raised while performing a desktop action
#[derive(Debug, thiserror::Error)]
pub enum DesktopError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with code {code:?}")]
    Failed { command: String, code: Option<i32> },
}
