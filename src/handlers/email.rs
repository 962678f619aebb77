use std::sync::Arc;

use tracing::warn;

use super::{Handler, Parameters};
use crate::launcher::Launcher;

const KEYWORDS: &[&str] = &["email", "mail", "send email", "compose"];

pub struct EmailHandler {
    launcher: Arc<dyn Launcher>,
}

impl EmailHandler {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }
}

impl Handler for EmailHandler {
    fn name(&self) -> &'static str {
        "email"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, _command: &str, _parameters: Option<&Parameters>) -> String {
        match self.launcher.open_url("mailto:") {
            Ok(()) => "I've opened your email client.".to_string(),
            Err(e) => {
                warn!(error = %e, "mail composer failed");
                format!("Sorry, I couldn't open your email client. Error: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::{Launch, RecordingLauncher};

    #[test]
    fn test_opens_composer() {
        let launcher = Arc::new(RecordingLauncher::new());
        let h = EmailHandler::new(launcher.clone());
        assert!(h.claims("Send email"));
        assert_eq!(h.execute("Send email", None), "I've opened your email client.");
        assert_eq!(launcher.launches(), vec![Launch::Url("mailto:".into())]);
    }
}
