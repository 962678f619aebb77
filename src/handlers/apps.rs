use std::sync::Arc;

use tracing::warn;

use super::{param, Handler, Parameters};
use crate::extract::normalize;
use crate::launcher::Launcher;

const KEYWORDS: &[&str] = &["open", "launch"];

/// Spoken short name -> application name, scanned in order
pub const APPLICATIONS: &[(&str, &str)] = &[
    ("calculator", "Calculator"),
    ("notes", "Notes"),
    ("safari", "Safari"),
    ("chrome", "Google Chrome"),
    ("spotify", "Spotify"),
    ("mail", "Mail"),
    ("terminal", "Terminal"),
    ("finder", "Finder"),
    ("photos", "Photos"),
    ("music", "Music"),
    ("facetime", "FaceTime"),
    ("messages", "Messages"),
    ("calendar", "Calendar"),
    ("reminders", "Reminders"),
    ("maps", "Maps"),
    ("settings", "System Preferences"),
];

pub struct ApplicationHandler {
    launcher: Arc<dyn Launcher>,
}

impl ApplicationHandler {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    /// First application whose short name occurs in `text`
    pub fn find_application(text: &str) -> Option<&'static str> {
        APPLICATIONS
            .iter()
            .find(|(key, _)| text.contains(key))
            .map(|(_, app)| *app)
    }
}

impl Handler for ApplicationHandler {
    fn name(&self) -> &'static str {
        "application"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, command: &str, parameters: Option<&Parameters>) -> String {
        let text = match param(parameters, "application") {
            Some(app) => normalize(app),
            None => normalize(command),
        };

        let Some(app) = Self::find_application(&text) else {
            return "What application would you like me to open?".to_string();
        };

        match self.launcher.open_app(app) {
            Ok(()) => format!("I've opened {} for you.", app),
            Err(e) => {
                warn!(app, error = %e, "launch failed");
                format!("Sorry, I couldn't open {}. Error: {}", app, e)
            }
        }
    }
}
