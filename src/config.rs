use anyhow::Context;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    /// Name the assistant introduces itself with
    #[serde(default = "default_name")]
    pub name: String,
    /// Directory notes are written to (supports ${ENV_VAR})
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub launcher: LauncherConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            name: default_name(),
            notes_dir: default_notes_dir(),
            log_level: default_log_level(),
            launcher: LauncherConfig::default(),
        }
    }
}

// ============================================================================
// Launcher Config
// ============================================================================

#[derive(Debug, Deserialize, Default)]
pub struct LauncherConfig {
    /// Log URLs and applications instead of opening them
    #[serde(default)]
    pub dry_run: bool,
}

fn default_name() -> String {
    "Hark".into()
}

fn default_notes_dir() -> String {
    "notes".into()
}

fn default_log_level() -> String {
    "warn".into()
}

/// Expand ${VAR} to environment variable values
fn expand_env_vars(s: &str) -> String {
    let mut result = s.to_string();

    // Handle ${VAR} syntax
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_else(|_| {
                warn!(var = var_name, "environment variable not found");
                String::new()
            });
            result.replace_range(start..start + end + 1, &value);
        } else {
            break;
        }
    }

    result
}

impl Config {
    /// Load from `path`. A missing file means defaults; a malformed one is
    /// an error.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            Self::parse(&text).with_context(|| format!("parsing {}", path.display()))?
        } else {
            Config::default()
        };

        config.notes_dir = expand_env_vars(&config.notes_dir);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn notes_dir(&self) -> PathBuf {
        PathBuf::from(&self.notes_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.name, "Hark");
        assert_eq!(config.notes_dir, "notes");
        assert_eq!(config.log_level, "warn");
        assert!(!config.launcher.dry_run);
    }

    #[test]
    fn test_parse() {
        let config = Config::parse(
            r#"
name = "Alexa"
notes_dir = "/tmp/my-notes"

[launcher]
dry_run = true
"#,
        )
        .unwrap();
        assert_eq!(config.name, "Alexa");
        assert_eq!(config.notes_dir(), PathBuf::from("/tmp/my-notes"));
        assert!(config.launcher.dry_run);
    }

    #[test]
    fn test_malformed_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "name = [").unwrap();
        assert!(Config::load(&path).is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::load(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config.name, "Hark");
    }

    #[test]
    fn test_expand_env_vars() {
        // PATH is set in any test environment
        let path = std::env::var("PATH").unwrap();
        assert_eq!(expand_env_vars("${PATH}/notes"), format!("{}/notes", path));
        assert_eq!(expand_env_vars("plain"), "plain");
        assert_eq!(expand_env_vars("${HARK_SURELY_UNSET_VAR}x"), "x");
        assert_eq!(expand_env_vars("${unterminated"), "${unterminated");
    }
}
