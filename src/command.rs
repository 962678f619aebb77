//! Command dispatch - routes a command to the first handler that claims it
//!
//! Handlers are consulted in registration order:
//! 1. Search
//! 2. Application launch
//! 3. Time / date
//! 4. Note
//! 5. Weather
//! 6. Calculator
//! 7. Music
//! 8. Email
//! 9. Reminder
//! 10. System settings
//!
//! The order is part of the contract: "open music" contains both "open" and
//! "music", and resolves to application launch because it comes first.
//! Commands nobody claims get a fixed clarification.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{debug, info};

use crate::clock::Clock;
use crate::handlers::{
    ApplicationHandler, CalculatorHandler, EmailHandler, Handler, MusicHandler, NoteHandler,
    Parameters, ReminderHandler, SearchHandler, SystemHandler, TimeDateHandler, WeatherHandler,
};
use crate::interpret::{Action, Interpretation, Interpreter};
use crate::launcher::Launcher;

/// Response when no handler claims a command
pub const FALLBACK_RESPONSE: &str =
    "I'm not sure how to help with that. Could you try rephrasing your request?";

/// Ordered handler registry, fixed at construction
pub struct Assistant {
    handlers: Vec<Box<dyn Handler>>,
}

impl Assistant {
    /// The standard ten handlers, in contract order
    pub fn new(
        notes_dir: impl Into<PathBuf>,
        launcher: Arc<dyn Launcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_handlers(vec![
            Box::new(SearchHandler::new(Arc::clone(&launcher))),
            Box::new(ApplicationHandler::new(Arc::clone(&launcher))),
            Box::new(TimeDateHandler::new(Arc::clone(&clock))),
            Box::new(NoteHandler::new(notes_dir, clock)),
            Box::new(WeatherHandler::new(Arc::clone(&launcher))),
            Box::new(CalculatorHandler::new()),
            Box::new(MusicHandler::new(Arc::clone(&launcher))),
            Box::new(EmailHandler::new(Arc::clone(&launcher))),
            Box::new(ReminderHandler::new()),
            Box::new(SystemHandler::new(launcher)),
        ])
    }

    /// A registry with a caller-chosen handler order
    pub fn with_handlers(handlers: Vec<Box<dyn Handler>>) -> Self {
        Self { handlers }
    }

    /// Handler names in registration order
    pub fn handler_names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    /// The first handler that claims `command`
    pub fn resolve(&self, command: &str) -> Option<&dyn Handler> {
        self.handlers
            .iter()
            .find(|h| h.claims(command))
            .map(|h| h.as_ref())
    }

    /// Route a command through keyword claiming and return the response.
    /// Total: every input produces a non-empty response.
    pub fn process(&self, command: &str) -> String {
        match self.resolve(command) {
            Some(handler) => {
                info!(handler = handler.name(), "command claimed");
                non_empty(handler.execute(command, None))
            }
            None => {
                debug!(command, "no handler claimed command");
                FALLBACK_RESPONSE.to_string()
            }
        }
    }

    /// Run a named action directly, skipping claims. `None` if the action
    /// name is unknown or its handler is not registered.
    pub fn execute_action(&self, action: &str, parameters: &Parameters) -> Option<String> {
        let action: Action = action.parse().ok()?;
        let handler = self
            .handlers
            .iter()
            .find(|h| h.name() == action.handler_name())?;

        info!(%action, handler = handler.name(), "executing action");
        let command = action.command_text(Some(parameters));
        Some(non_empty(handler.execute(command, Some(parameters))))
    }

    /// Answer an interpretation: the preamble followed by the action's
    /// result, or the preamble alone when there is no action to run
    pub fn respond(&self, interpretation: &Interpretation) -> String {
        let preamble = interpretation.preamble.trim();
        match self.execute_action(&interpretation.action, &interpretation.parameters) {
            Some(result) if preamble.is_empty() => result,
            Some(result) => format!("{} {}", preamble, result),
            None if preamble.is_empty() => FALLBACK_RESPONSE.to_string(),
            None => preamble.to_string(),
        }
    }

    /// Interpret a command with `interpreter`, then answer it
    pub fn process_with(&self, interpreter: &dyn Interpreter, command: &str) -> String {
        let interpretation = interpreter.interpret(command);
        debug!(action = %interpretation.action, "interpreted command");
        self.respond(&interpretation)
    }
}

fn non_empty(response: String) -> String {
    if response.trim().is_empty() {
        FALLBACK_RESPONSE.to_string()
    } else {
        response
    }
}
