//! Things the assistant can open, launch or switch

use reqwest::Url;
use serde::{Deserialize, Serialize};

use super::DesktopError;

/// Websites reachable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    YouTube,
    Google,
    StackOverflow,
    GitHub,
    Instagram,
    Facebook,
    Twitter,
    LinkedIn,
    WhatsApp,
    Amazon,
    Flipkart,
    Gmail,
    GoogleNews,
    Hotstar,
    Netflix,
    Spotify,
}

impl Site {
    /// Name as spoken back to the user
    pub fn name(&self) -> &'static str {
        match self {
            Site::YouTube => "YouTube",
            Site::Google => "Google",
            Site::StackOverflow => "Stack Overflow",
            Site::GitHub => "GitHub",
            Site::Instagram => "Instagram",
            Site::Facebook => "Facebook",
            Site::Twitter => "Twitter",
            Site::LinkedIn => "LinkedIn",
            Site::WhatsApp => "WhatsApp",
            Site::Amazon => "Amazon",
            Site::Flipkart => "Flipkart",
            Site::Gmail => "Gmail",
            Site::GoogleNews => "Google News",
            Site::Hotstar => "Hotstar",
            Site::Netflix => "Netflix",
            Site::Spotify => "Spotify",
        }
    }

    pub fn url(&self) -> &'static str {
        match self {
            Site::YouTube => "https://www.youtube.com",
            Site::Google => "https://www.google.com",
            Site::StackOverflow => "https://stackoverflow.com",
            Site::GitHub => "https://github.com",
            Site::Instagram => "https://www.instagram.com",
            Site::Facebook => "https://www.facebook.com",
            Site::Twitter => "https://twitter.com",
            Site::LinkedIn => "https://www.linkedin.com",
            Site::WhatsApp => "https://web.whatsapp.com",
            Site::Amazon => "https://www.amazon.com",
            Site::Flipkart => "https://www.flipkart.com",
            Site::Gmail => "https://mail.google.com",
            Site::GoogleNews => "https://news.google.com",
            Site::Hotstar => "https://www.hotstar.com",
            Site::Netflix => "https://www.netflix.com",
            Site::Spotify => "https://open.spotify.com",
        }
    }
}

/// A page to open in the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebTarget {
    /// A fixed website
    Site(Site),
    /// Web search results for a query
    Search(String),
    /// Today's forecast for a city
    Weather(String),
    /// Video results for a query
    Video(String),
}

impl WebTarget {
    /// Resolve to a fully encoded URL
    pub fn url(&self) -> Result<Url, DesktopError> {
        match self {
            WebTarget::Site(site) => Url::parse(site.url()).map_err(invalid),
            WebTarget::Search(query) => {
                Url::parse_with_params("https://www.google.com/search", &[("q", query)])
                    .map_err(invalid)
            }
            WebTarget::Video(query) => Url::parse_with_params(
                "https://www.youtube.com/results",
                &[("search_query", query)],
            )
            .map_err(invalid),
            WebTarget::Weather(city) => {
                let mut url =
                    Url::parse("https://weather.com/weather/today/l/").map_err(invalid)?;
                url.path_segments_mut()
                    .map_err(|_| DesktopError::InvalidUrl("weather base url".to_string()))?
                    .pop_if_empty()
                    .push(city);
                Ok(url)
            }
        }
    }
}

fn invalid(e: impl std::fmt::Display) -> DesktopError {
    DesktopError::InvalidUrl(e.to_string())
}

/// Desktop applications launched by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum App {
    VsCode,
    Discord,
    Calculator,
    Notepad,
    Valorant,
    Camera,
}

impl App {
    pub const ALL: [App; 6] = [
        App::VsCode,
        App::Discord,
        App::Calculator,
        App::Notepad,
        App::Valorant,
        App::Camera,
    ];

    /// What the assistant says while launching
    pub fn announcement(&self) -> &'static str {
        match self {
            App::VsCode => "Opening Visual Studio Code",
            App::Discord => "Opening Discord",
            App::Calculator => "Opening the calculator.",
            App::Notepad => "Opening Notepad.",
            App::Valorant => "Opening Valo",
            App::Camera => "Opening camera",
        }
    }

    /// Suffix of the `JARVIS_APP_*` override variable
    pub fn env_key(&self) -> &'static str {
        match self {
            App::VsCode => "VSCODE",
            App::Discord => "DISCORD",
            App::Calculator => "CALCULATOR",
            App::Notepad => "NOTEPAD",
            App::Valorant => "VALORANT",
            App::Camera => "CAMERA",
        }
    }

    /// Shell command used when no override is configured
    #[cfg(target_os = "windows")]
    pub fn default_command(&self) -> &'static str {
        match self {
            App::VsCode => "code",
            App::Discord => "start discord:",
            App::Calculator => "calc.exe",
            App::Notepad => "notepad.exe",
            App::Valorant => "valorant.exe",
            App::Camera => "start microsoft.windows.camera:",
        }
    }

    /// Shell command used when no override is configured
    #[cfg(target_os = "macos")]
    pub fn default_command(&self) -> &'static str {
        match self {
            App::VsCode => "open -a 'Visual Studio Code'",
            App::Discord => "open -a Discord",
            App::Calculator => "open -a Calculator",
            App::Notepad => "open -a TextEdit",
            App::Valorant => "open -a 'Riot Client'",
            App::Camera => "open -a 'Photo Booth'",
        }
    }

    /// Shell command used when no override is configured
    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    pub fn default_command(&self) -> &'static str {
        match self {
            App::VsCode => "code",
            App::Discord => "discord",
            App::Calculator => "gnome-calculator",
            App::Notepad => "gedit",
            App::Valorant => "valorant",
            App::Camera => "cheese",
        }
    }
}

/// Power-state commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerAction {
    Shutdown,
    Restart,
    Sleep,
    Lock,
}

impl PowerAction {
    #[cfg(target_os = "windows")]
    pub fn command(&self) -> &'static str {
        match self {
            PowerAction::Shutdown => "shutdown /s /t 5",
            PowerAction::Restart => "shutdown /r /t 5",
            PowerAction::Sleep => "rundll32.exe powrprof.dll,SetSuspendState 0,1,0",
            PowerAction::Lock => "rundll32.exe user32.dll,LockWorkStation",
        }
    }

    #[cfg(target_os = "macos")]
    pub fn command(&self) -> &'static str {
        match self {
            PowerAction::Shutdown => "osascript -e 'tell app \"System Events\" to shut down'",
            PowerAction::Restart => "osascript -e 'tell app \"System Events\" to restart'",
            PowerAction::Sleep => "pmset sleepnow",
            PowerAction::Lock => "pmset displaysleepnow",
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    pub fn command(&self) -> &'static str {
        match self {
            PowerAction::Shutdown => "systemctl poweroff",
            PowerAction::Restart => "systemctl reboot",
            PowerAction::Sleep => "systemctl suspend",
            PowerAction::Lock => "loginctl lock-session",
        }
    }
}
