use std::sync::Arc;

use chrono::Duration;

use super::{Handler, Parameters};
use crate::clock::Clock;
use crate::extract::{contains_any, normalize};

const TIME_KEYWORDS: &[&str] = &["time", "hour", "clock"];
const DATE_KEYWORDS: &[&str] = &["date", "day", "today"];
const KEYWORDS: &[&str] = &["time", "hour", "clock", "date", "day", "today", "tomorrow"];

/// Answers time and date questions. When a command mentions both, the
/// time branch wins.
pub struct TimeDateHandler {
    clock: Arc<dyn Clock>,
}

impl TimeDateHandler {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl Handler for TimeDateHandler {
    fn name(&self) -> &'static str {
        "time"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, command: &str, _parameters: Option<&Parameters>) -> String {
        let text = normalize(command);
        let now = self.clock.now();

        if contains_any(&text, TIME_KEYWORDS) {
            format!("The current time is {}.", now.format("%I:%M %p"))
        } else if contains_any(&text, DATE_KEYWORDS) {
            format!("Today is {}.", now.format("%B %d, %Y"))
        } else if text.contains("tomorrow") {
            let tomorrow = now + Duration::days(1);
            format!("Tomorrow is {}.", tomorrow.format("%B %d, %Y"))
        } else {
            "I can tell you the time or date. What would you like to know?".to_string()
        }
    }
}
