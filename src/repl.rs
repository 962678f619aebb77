//! Text front end - interactive prompt, scripted demo and one-shot replies

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;

use crate::command::Assistant;
use crate::interpret::Interpreter;

/// Commands the scripted demo walks through
pub const DEMO_COMMANDS: &[&str] = &[
    "What time is it?",
    "What's the date today?",
    "Search for artificial intelligence",
    "Open calculator",
    "Weather in New York",
    "Calculate 15 plus 27",
    "Create a note",
    "Play music",
    "Send email",
    "Set reminder to call mom",
    "Open wifi settings",
];

pub const HELP: &str = "\
Commands:
  What time is it?            Current time
  What's the date today?      Current date
  Search for <topic>          Web search
  Open <application>          Open an application (calculator, notes, safari, ...)
  Weather in <city>           Weather information
  Calculate <expression>      Arithmetic (needs --interpret to pass the expression)
  Create a note               Save a note (needs --interpret to pass the content)
  Play music                  Open Spotify or Apple Music
  Send email                  Compose an email
  Set reminder <text>         Acknowledge a reminder
  Open wifi settings          Network or Bluetooth settings

  help                        Show this help
  quit / exit / q             Leave";

/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplInput {
    Empty,
    Help,
    Quit,
    Command(String),
}

impl ReplInput {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "" => ReplInput::Empty,
            "help" | "/help" => ReplInput::Help,
            "quit" | "exit" | "q" | "/quit" => ReplInput::Quit,
            _ => ReplInput::Command(line.to_string()),
        }
    }
}

/// Keyword dispatch, or an interpreter in front of it
pub struct Session<'a> {
    assistant: &'a Assistant,
    interpreter: Option<&'a dyn Interpreter>,
}

impl<'a> Session<'a> {
    pub fn new(assistant: &'a Assistant) -> Self {
        Self {
            assistant,
            interpreter: None,
        }
    }

    pub fn with_interpreter(mut self, interpreter: &'a dyn Interpreter) -> Self {
        self.interpreter = Some(interpreter);
        self
    }

    pub fn reply(&self, command: &str) -> String {
        match self.interpreter {
            Some(interpreter) => self.assistant.process_with(interpreter, command),
            None => self.assistant.process(command),
        }
    }
}

fn show_reply(out: &mut impl Write, reply: &str) -> io::Result<()> {
    writeln!(out, "{} {}", "Assistant:".cyan().bold(), reply)
}

/// Read commands line by line until EOF or a quit command
pub fn run(
    session: &Session<'_>,
    name: &str,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    show_reply(
        out,
        &format!("Hello! I'm {}, your assistant. How can I help you today?", name),
    )?;
    writeln!(out, "{}", "Type 'help' for commands, 'quit' to leave.".dark_grey())?;

    let mut lines = input.lines();
    loop {
        write!(out, "{} ", "You:".green().bold())?;
        out.flush()?;

        let Some(line) = lines.next() else {
            writeln!(out)?;
            break;
        };

        match ReplInput::parse(&line?) {
            ReplInput::Empty => continue,
            ReplInput::Help => writeln!(out, "{}", HELP)?,
            ReplInput::Quit => break,
            ReplInput::Command(command) => show_reply(out, &session.reply(&command))?,
        }
    }

    writeln!(out, "Goodbye!")?;
    Ok(())
}

/// Run every demo command and print the replies
pub fn run_demo(session: &Session<'_>, out: &mut impl Write) -> io::Result<()> {
    for (i, command) in DEMO_COMMANDS.iter().enumerate() {
        writeln!(out, "{:2}. {} {}", i + 1, "Command:".bold(), command)?;
        writeln!(out, "    {} {}", "Response:".cyan(), session.reply(command))?;
    }
    Ok(())
}

/// Answer a single command
pub fn run_once(session: &Session<'_>, command: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", session.reply(command))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::command::FALLBACK_RESPONSE;
    use crate::interpret::LocalInterpreter;
    use crate::launcher::RecordingLauncher;
    use std::sync::Arc;

    fn assistant() -> Assistant {
        Assistant::new(
            std::env::temp_dir().join("hark-repl-tests-unused"),
            Arc::new(RecordingLauncher::new()),
            Arc::new(FixedClock::at(2024, 1, 2, 13, 0, 0).unwrap()),
        )
    }

    #[test]
    fn test_parse_input() {
        assert_eq!(ReplInput::parse("  "), ReplInput::Empty);
        assert_eq!(ReplInput::parse("HELP"), ReplInput::Help);
        assert_eq!(ReplInput::parse("exit"), ReplInput::Quit);
        assert_eq!(ReplInput::parse(" q "), ReplInput::Quit);
        assert_eq!(
            ReplInput::parse(" What time is it? "),
            ReplInput::Command("What time is it?".into())
        );
    }

    #[test]
    fn test_repl_session() {
        let assistant = assistant();
        let session = Session::new(&assistant);
        let input = [
            "what time is it",
            "",
            "sing me a song of sixpence",
            "whatever",
            "quit",
            "never reached",
        ]
        .join("\n");
        let mut out = Vec::new();
        run(&session, "Hark", input.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("I'm Hark"));
        assert!(out.contains("The current time is 01:00 PM."));
        assert!(out.contains("I've opened Spotify for you."));
        assert!(out.contains(FALLBACK_RESPONSE));
        assert!(out.trim_end().ends_with("Goodbye!"));
    }

    #[test]
    fn test_repl_stops_at_eof() {
        let assistant = assistant();
        let session = Session::new(&assistant);
        let mut out = Vec::new();
        run(&session, "Hark", "help".as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Weather in <city>"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_demo_covers_every_command() {
        let assistant = assistant();
        let session = Session::new(&assistant);
        let mut out = Vec::new();
        run_demo(&session, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        for command in DEMO_COMMANDS {
            assert!(out.contains(command), "missing {}", command);
        }
        assert!(out.contains("I've opened Calculator for you."));
    }

    #[test]
    fn test_interpreted_session() {
        let assistant = assistant();
        let interpreter = LocalInterpreter;
        let session = Session::new(&assistant).with_interpreter(&interpreter);
        assert_eq!(session.reply("calculate 6 times 7"), "Calculating. The result is 42.");
    }
}
