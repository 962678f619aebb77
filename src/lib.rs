//! Keyword-routed command assistant
//!
//! A fixed, ordered set of capability handlers (search, applications,
//! time, notes, weather, calculator, music, email, reminders, system
//! settings). Each command goes to the first handler that claims it.
//!
//! ```no_run
//! use std::sync::Arc;
//! use hark::{Assistant, DryRunLauncher, SystemClock};
//!
//! let assistant = Assistant::new("notes", Arc::new(DryRunLauncher), Arc::new(SystemClock));
//! println!("{}", assistant.process("What time is it?"));
//! ```

pub mod calc;
pub mod clock;
pub mod command;
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod interpret;
pub mod launcher;
pub mod repl;

pub use clock::{Clock, FixedClock, SystemClock};
pub use command::{Assistant, FALLBACK_RESPONSE};
pub use config::Config;
pub use error::{Error, Result};
pub use handlers::{Handler, Parameters};
pub use interpret::{Action, Interpretation, Interpreter, LocalInterpreter};
pub use launcher::{DryRunLauncher, Launch, Launcher, RecordingLauncher, SystemLauncher};
