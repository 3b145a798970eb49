//! Desktop actions backed by the host OS

use std::process::{Command, Stdio};

use tracing::{info, warn};

use super::{Desktop, DesktopError, PowerAction};

/// Runs desktop actions through the platform shell.
///
/// With `dry_run` set, every action is logged instead of executed.
pub struct SystemDesktop {
    dry_run: bool,
}

impl SystemDesktop {
    pub fn new(dry_run: bool) -> Self {
        if dry_run {
            warn!("desktop actions are in dry-run mode and will only be logged");
        }
        Self { dry_run }
    }

    /// Spawn a shell command without waiting for it
    fn spawn(&self, command: &str) -> Result<(), DesktopError> {
        if self.dry_run {
            info!(%command, "dry run: skipping command");
            return Ok(());
        }

        shell(command)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| DesktopError::Spawn {
                command: command.to_string(),
                source,
            })
    }
}

impl Desktop for SystemDesktop {
    fn open_url(&mut self, url: &str) -> Result<(), DesktopError> {
        info!(%url, "opening url");
        self.spawn(&open_command(url))
    }

    fn launch(&mut self, command: &str) -> Result<(), DesktopError> {
        info!(%command, "launching application");
        self.spawn(command)
    }

    fn power(&mut self, action: PowerAction) -> Result<(), DesktopError> {
        let command = action.command();
        info!(?action, %command, "invoking power action");

        if self.dry_run {
            info!(%command, "dry run: skipping command");
            return Ok(());
        }

        // Power commands are waited on so the process does not exit
        // before the OS has accepted the request
        let status = shell(command)
            .status()
            .map_err(|source| DesktopError::Spawn {
                command: command.to_string(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(DesktopError::Failed {
                command: command.to_string(),
                code: status.code(),
            })
        }
    }
}

#[cfg(target_os = "windows")]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", command]);
    cmd
}

#[cfg(not(target_os = "windows"))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.args(["-c", command]);
    cmd
}

#[cfg(target_os = "windows")]
fn open_command(url: &str) -> String {
    format!("start \"\" \"{}\"", url)
}

#[cfg(target_os = "macos")]
fn open_command(url: &str) -> String {
    format!("open '{}'", url)
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn open_command(url: &str) -> String {
    format!("xdg-open '{}'", url)
}
