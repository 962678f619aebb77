use super::{param, Handler, Parameters};

const KEYWORDS: &[&str] = &["reminder", "remind", "task", "todo"];

/// Acknowledges reminders. Nothing is scheduled.
#[derive(Debug, Default)]
pub struct ReminderHandler;

impl ReminderHandler {
    pub fn new() -> Self {
        Self
    }
}

impl Handler for ReminderHandler {
    fn name(&self) -> &'static str {
        "reminder"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, _command: &str, parameters: Option<&Parameters>) -> String {
        match param(parameters, "text") {
            Some(text) => format!("I've set a reminder for: {}", text),
            None => "What would you like me to remind you about?".to_string(),
        }
    }
}
