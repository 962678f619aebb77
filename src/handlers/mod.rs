//! Capability handlers
//!
//! Each handler owns one capability domain. It claims a command when any of
//! its keywords occurs in the lowercased text, and always turns execution
//! into a user-facing response - failures included.
//!
//! # Handlers (in registration order)
//!
//! - **search** - web search for the rest of the sentence
//! - **application** - launch a known desktop application
//! - **time** - current time, today's or tomorrow's date
//! - **note** - save a note to the notes directory
//! - **weather** - open a weather page for a city
//! - **calculator** - evaluate an arithmetic expression
//! - **music** - open Spotify or Apple Music
//! - **email** - open the mail composer
//! - **reminder** - acknowledge a reminder
//! - **system** - volume, brightness, wifi and bluetooth settings

use std::collections::BTreeMap;

use crate::extract::{contains_any, normalize};

mod apps;
mod calculator;
mod email;
mod music;
mod note;
mod reminder;
mod search;
mod system;
mod time;
mod weather;

pub use apps::{ApplicationHandler, APPLICATIONS};
pub use calculator::CalculatorHandler;
pub use email::EmailHandler;
pub use music::MusicHandler;
pub use note::NoteHandler;
pub use reminder::ReminderHandler;
pub use search::SearchHandler;
pub use system::SystemHandler;
pub use time::TimeDateHandler;
pub use weather::WeatherHandler;

/// Structured fields supplied by an upstream interpreter
pub type Parameters = BTreeMap<String, String>;

pub trait Handler: Send + Sync {
    /// Stable identifier, used for logging and action lookup
    fn name(&self) -> &'static str;

    /// Substrings that make this handler claim a command
    fn keywords(&self) -> &[&'static str];

    /// Pure check: does any keyword occur in the lowercased command
    fn claims(&self, command: &str) -> bool {
        contains_any(&normalize(command), self.keywords())
    }

    /// Run the capability. Must return a non-empty response and never fail.
    fn execute(&self, command: &str, parameters: Option<&Parameters>) -> String;
}

/// A non-blank parameter value, trimmed
pub(crate) fn param<'a>(parameters: Option<&'a Parameters>, key: &str) -> Option<&'a str> {
    raw_param(parameters, key).map(str::trim)
}

/// A non-blank parameter value, exactly as supplied
pub(crate) fn raw_param<'a>(parameters: Option<&'a Parameters>, key: &str) -> Option<&'a str> {
    parameters
        .and_then(|p| p.get(key))
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}
