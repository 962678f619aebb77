use std::sync::Arc;

use tracing::warn;

use super::{param, Handler, Parameters};
use crate::extract::{form_encode, normalize, strip_trigger};
use crate::launcher::Launcher;

const KEYWORDS: &[&str] = &["search", "find", "look up", "google"];

/// Phrases removed from the command to leave the query. "search for" is
/// tried before "search" so the preposition goes with it.
const TRIGGERS: &[&str] = &["search for", "search", "find", "look up", "google"];

pub struct SearchHandler {
    launcher: Arc<dyn Launcher>,
}

impl SearchHandler {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    pub fn search_url(query: &str) -> String {
        format!("https://www.google.com/search?q={}", form_encode(query))
    }
}

impl Handler for SearchHandler {
    fn name(&self) -> &'static str {
        "search"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, command: &str, parameters: Option<&Parameters>) -> String {
        let query = match param(parameters, "query") {
            Some(q) => q.to_lowercase(),
            None => strip_trigger(&normalize(command), TRIGGERS),
        };

        if query.is_empty() {
            return "What would you like me to search for?".to_string();
        }

        match self.launcher.open_url(&Self::search_url(&query)) {
            Ok(()) => format!("I've searched for '{}' on the web.", query),
            Err(e) => {
                warn!(error = %e, "search failed");
                format!("Sorry, I couldn't open the search for '{}'. Error: {}", query, e)
            }
        }
    }
}
