use std::sync::Arc;

use tracing::warn;

use super::{Handler, Parameters};
use crate::extract::normalize;
use crate::launcher::Launcher;

const KEYWORDS: &[&str] = &["music", "play", "song", "spotify", "apple music"];

const SPOTIFY_URL: &str = "https://open.spotify.com";

pub struct MusicHandler {
    launcher: Arc<dyn Launcher>,
}

impl MusicHandler {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    fn spotify(&self) -> String {
        match self.launcher.open_url(SPOTIFY_URL) {
            Ok(()) => "I've opened Spotify for you.".to_string(),
            Err(e) => {
                warn!(error = %e, "spotify failed");
                format!("Sorry, I couldn't open Spotify. Error: {}", e)
            }
        }
    }

    fn apple_music(&self) -> String {
        match self.launcher.open_app("Music") {
            Ok(()) => "I've opened Apple Music for you.".to_string(),
            Err(e) => {
                warn!(error = %e, "apple music failed");
                format!("Sorry, I couldn't open Apple Music. Error: {}", e)
            }
        }
    }
}

impl Handler for MusicHandler {
    fn name(&self) -> &'static str {
        "music"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, command: &str, _parameters: Option<&Parameters>) -> String {
        let text = normalize(command);
        // Spotify is the default, and wins when both are named
        if text.contains("apple music") && !text.contains("spotify") {
            self.apple_music()
        } else {
            self.spotify()
        }
    }
}
