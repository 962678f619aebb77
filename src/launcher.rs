//! Outbound side effects - opening URLs and launching applications
//!
//! Handlers never shell out directly; they go through a [`Launcher`] so the
//! host can swap the real OS launcher for a dry-run or recording one.

use std::process::{Command, Stdio};
use std::sync::Mutex;

use tracing::{debug, info};

use crate::error::{Error, Result};

pub trait Launcher: Send + Sync {
    /// Open a URL (web page, `mailto:`, settings pane) with the default handler
    fn open_url(&self, url: &str) -> Result<()>;

    /// Launch an application by its OS-level name
    fn open_app(&self, name: &str) -> Result<()>;
}

/// Launches through the platform's opener: `open` on macOS,
/// `xdg-open` on other unixes, `start` on Windows
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl SystemLauncher {
    fn spawn(mut cmd: Command, target: &str) -> Result<()> {
        debug!(?cmd, "spawning launcher");
        // Fire and forget: the child is not waited on
        cmd.stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map(|_| ())
            .map_err(|source| Error::Launch {
                target: target.to_string(),
                source,
            })
    }

    #[cfg(target_os = "macos")]
    fn url_command(url: &str) -> Command {
        let mut cmd = Command::new("open");
        cmd.arg(url);
        cmd
    }

    #[cfg(target_os = "windows")]
    fn url_command(url: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", url]);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn url_command(url: &str) -> Command {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(url);
        cmd
    }

    #[cfg(target_os = "macos")]
    fn app_command(name: &str) -> Command {
        let mut cmd = Command::new("open");
        cmd.args(["-a", name]);
        cmd
    }

    #[cfg(target_os = "windows")]
    fn app_command(name: &str) -> Command {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", name]);
        cmd
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    fn app_command(name: &str) -> Command {
        // Desktop entries are lowercase with dashes ("Google Chrome" -> "google-chrome")
        let mut cmd = Command::new("gtk-launch");
        cmd.arg(name.to_lowercase().replace(' ', "-"));
        cmd
    }
}

impl Launcher for SystemLauncher {
    fn open_url(&self, url: &str) -> Result<()> {
        info!(url, "opening url");
        Self::spawn(Self::url_command(url), url)
    }

    fn open_app(&self, name: &str) -> Result<()> {
        info!(app = name, "launching application");
        Self::spawn(Self::app_command(name), name)
    }
}

/// Logs what would have been opened and reports success
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunLauncher;

impl Launcher for DryRunLauncher {
    fn open_url(&self, url: &str) -> Result<()> {
        info!(url, "dry run: would open url");
        Ok(())
    }

    fn open_app(&self, name: &str) -> Result<()> {
        info!(app = name, "dry run: would launch application");
        Ok(())
    }
}

/// A side effect captured by [`RecordingLauncher`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Launch {
    Url(String),
    App(String),
}

/// Records launches instead of performing them. Apps listed in
/// `failing_apps` report an error, for exercising failure responses.
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launches: Mutex<Vec<Launch>>,
    failing_apps: Vec<String>,
}

impl RecordingLauncher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(apps: &[&str]) -> Self {
        Self {
            launches: Mutex::default(),
            failing_apps: apps.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn launches(&self) -> Vec<Launch> {
        self.launches
            .lock()
            .map(|l| l.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    fn record(&self, launch: Launch) {
        match self.launches.lock() {
            Ok(mut l) => l.push(launch),
            Err(poisoned) => poisoned.into_inner().push(launch),
        }
    }
}

impl Launcher for RecordingLauncher {
    fn open_url(&self, url: &str) -> Result<()> {
        self.record(Launch::Url(url.to_string()));
        Ok(())
    }

    fn open_app(&self, name: &str) -> Result<()> {
        self.record(Launch::App(name.to_string()));
        if self.failing_apps.iter().any(|a| a == name) {
            return Err(Error::Launch {
                target: name.to_string(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "application not found"),
            });
        }
        Ok(())
    }
}
