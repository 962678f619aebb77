//! Structured interpretations - the seam for richer command interpreters
//!
//! An interpreter (an LLM classifier, or the built-in [`LocalInterpreter`])
//! turns text into an [`Interpretation`]: an action name, its parameters and
//! a conversational preamble. The assistant then runs the action directly,
//! without keyword claiming.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::extract::{normalize, spoken_to_expression, trim_punctuation};
use crate::handlers::Parameters;

/// Preamble used when classifier output can't be decoded
pub const UNDECODABLE_PREAMBLE: &str = "I understand your request. Let me help you with that.";

const DEFAULT_PREAMBLE: &str = "I understand your request.";

/// Actions an interpreter may name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    WebSearch,
    OpenApplication,
    GetTime,
    GetDate,
    CreateNote,
    SendEmail,
    Weather,
    Calculator,
    Music,
    Reminder,
    SystemSettings,
}

impl Action {
    pub const ALL: [Action; 11] = [
        Action::WebSearch,
        Action::OpenApplication,
        Action::GetTime,
        Action::GetDate,
        Action::CreateNote,
        Action::SendEmail,
        Action::Weather,
        Action::Calculator,
        Action::Music,
        Action::Reminder,
        Action::SystemSettings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::WebSearch => "web_search",
            Action::OpenApplication => "open_application",
            Action::GetTime => "get_time",
            Action::GetDate => "get_date",
            Action::CreateNote => "create_note",
            Action::SendEmail => "send_email",
            Action::Weather => "weather",
            Action::Calculator => "calculator",
            Action::Music => "music",
            Action::Reminder => "reminder",
            Action::SystemSettings => "system_settings",
        }
    }

    /// Name of the handler that runs this action
    pub fn handler_name(&self) -> &'static str {
        match self {
            Action::WebSearch => "search",
            Action::OpenApplication => "application",
            Action::GetTime | Action::GetDate => "time",
            Action::CreateNote => "note",
            Action::SendEmail => "email",
            Action::Weather => "weather",
            Action::Calculator => "calculator",
            Action::Music => "music",
            Action::Reminder => "reminder",
            Action::SystemSettings => "system",
        }
    }

    /// Command text handed to the handler in place of the user's words.
    /// Handlers that branch on wording get the branch the action names.
    pub fn command_text<'a>(&self, parameters: Option<&'a Parameters>) -> &'a str {
        match self {
            Action::GetTime => "time",
            Action::GetDate => "date",
            Action::SystemSettings => parameters
                .and_then(|p| p.get("setting"))
                .map(String::as_str)
                .unwrap_or(""),
            _ => "",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or(())
    }
}

/// An interpreter's reading of one command
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Interpretation {
    #[serde(default = "default_action")]
    pub action: String,
    #[serde(default, deserialize_with = "lenient_parameters")]
    pub parameters: Parameters,
    #[serde(default = "default_preamble", rename = "response")]
    pub preamble: String,
}

fn default_action() -> String {
    "general_chat".into()
}

fn default_preamble() -> String {
    DEFAULT_PREAMBLE.into()
}

/// Classifiers don't reliably quote their values. Numbers and bools are
/// kept as their JSON text and nulls are dropped.
fn lenient_parameters<'de, D>(deserializer: D) -> Result<Parameters, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Map<String, Value>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .flatten()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

impl Interpretation {
    pub fn new(
        action: impl Into<String>,
        parameters: Parameters,
        preamble: impl Into<String>,
    ) -> Self {
        Self {
            action: action.into(),
            parameters,
            preamble: preamble.into(),
        }
    }

    /// Conversation only, no capability to run
    pub fn chat(preamble: impl Into<String>) -> Self {
        Self::new(default_action(), Parameters::new(), preamble)
    }

    /// Decode classifier output of the form
    /// `{"action": ..., "parameters": {...}, "response": ...}`.
    /// Undecodable output becomes a plain conversational reply.
    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<Interpretation>(raw.trim()) {
            Ok(interpretation) => interpretation,
            Err(e) => {
                debug!(error = %e, "undecodable interpretation");
                Self::chat(UNDECODABLE_PREAMBLE)
            }
        }
    }
}

/// Anything that can turn a command into an [`Interpretation`]
pub trait Interpreter {
    fn interpret(&self, command: &str) -> Interpretation;
}

/// Deterministic prefix-rule interpreter, usable when no classifier is
/// available. Prefix rules run before the looser substring rules, so
/// "calculate 6 times 7" is a calculation and not a time query.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalInterpreter;

fn params(pairs: &[(&str, &str)]) -> Parameters {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn rest_after<'a>(text: &'a str, prefixes: &[&str]) -> Option<&'a str> {
    prefixes
        .iter()
        .find_map(|p| text.strip_prefix(p))
        .map(trim_punctuation)
}

impl Interpreter for LocalInterpreter {
    fn interpret(&self, command: &str) -> Interpretation {
        let text = normalize(command);

        if let Some(query) = rest_after(&text, &["search for ", "search "]) {
            return Interpretation::new(
                Action::WebSearch.as_str(),
                params(&[("query", query)]),
                format!("Searching the web for {}.", query),
            );
        }
        if let Some(app) = rest_after(&text, &["open "]) {
            return Interpretation::new(
                Action::OpenApplication.as_str(),
                params(&[("application", app)]),
                format!("Opening {}.", app),
            );
        }
        if text.starts_with("create a note") || text.starts_with("note ") {
            let content = text
                .split_once("note")
                .map(|(_, rest)| rest.trim())
                .unwrap_or("");
            return Interpretation::new(
                Action::CreateNote.as_str(),
                params(&[("content", content)]),
                "Creating a note.",
            );
        }
        if let Some(city) = rest_after(&text, &["weather in "]) {
            return Interpretation::new(
                Action::Weather.as_str(),
                params(&[("city", city)]),
                format!("Checking weather for {}.", city),
            );
        }
        if let Some(expression) = rest_after(&text, &["calculate "]) {
            let expression = spoken_to_expression(expression);
            return Interpretation::new(
                Action::Calculator.as_str(),
                params(&[("expression", expression.as_str())]),
                "Calculating.",
            );
        }
        if text.starts_with("remind me") || text.starts_with("set reminder") {
            // The whole utterance is the reminder
            return Interpretation::new(
                Action::Reminder.as_str(),
                params(&[("text", command.trim())]),
                "Setting a reminder.",
            );
        }
        if text.contains("time") {
            return Interpretation::new(
                Action::GetTime.as_str(),
                Parameters::new(),
                "Here is the current time.",
            );
        }
        if text.contains("date") || text.contains("today") {
            return Interpretation::new(
                Action::GetDate.as_str(),
                Parameters::new(),
                "Here is today's date.",
            );
        }
        if text.contains("play music") || text.starts_with("play ") {
            return Interpretation::new(Action::Music.as_str(), Parameters::new(), "Playing music.");
        }
        if text.contains("send email") || text.starts_with("email") {
            return Interpretation::new(
                Action::SendEmail.as_str(),
                Parameters::new(),
                "Opening your email client.",
            );
        }

        Interpretation::chat(DEFAULT_PREAMBLE)
    }
}
