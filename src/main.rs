use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hark::config::DEFAULT_CONFIG_PATH;
use hark::repl::{self, Session};
use hark::{
    Assistant, Config, DryRunLauncher, Interpretation, Launcher, LocalInterpreter, SystemClock,
    SystemLauncher,
};

#[derive(Parser)]
#[command(name = "hark", about = "Keyword-routed command assistant")]
struct Cli {
    /// Config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Log what would be opened instead of opening it
    #[arg(long, global = true)]
    dry_run: bool,

    /// Route commands through the local interpreter, which extracts
    /// parameters (expressions, note content, ...)
    #[arg(long, global = true)]
    interpret: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Answer one command and exit
    Ask {
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Run the scripted demo commands
    Demo,
    /// Answer classifier output: {"action", "parameters", "response"} JSON
    Respond {
        json: String,
    },
}

fn init_logging(default_filter: &str) {
    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config).context("Failed to load configuration")?;
    init_logging(&config.log_level);

    let launcher: Arc<dyn Launcher> = if cli.dry_run || config.launcher.dry_run {
        info!("dry run: nothing will be opened");
        Arc::new(DryRunLauncher)
    } else {
        Arc::new(SystemLauncher)
    };
    let assistant = Assistant::new(config.notes_dir(), launcher, Arc::new(SystemClock));

    let interpreter = LocalInterpreter;
    let mut session = Session::new(&assistant);
    if cli.interpret {
        session = session.with_interpreter(&interpreter);
    }

    let mut out = io::stdout().lock();
    match cli.command {
        Some(Command::Ask { words }) => repl::run_once(&session, &words.join(" "), &mut out)?,
        Some(Command::Demo) => repl::run_demo(&session, &mut out)?,
        Some(Command::Respond { json }) => {
            let interpretation = Interpretation::from_json(&json);
            writeln!(out, "{}", assistant.respond(&interpretation))?;
        }
        None => {
            // stdout is locked by the prompt loop, so say goodbye on stderr
            ctrlc::set_handler(|| {
                eprintln!("\nGoodbye!");
                std::process::exit(0);
            })
            .context("Failed to install Ctrl-C handler")?;
            repl::run(&session, &config.name, io::stdin().lock(), &mut out)?;
        }
    }

    Ok(())
}
