use std::sync::Arc;

use tracing::warn;

use super::{Handler, Parameters};
use crate::extract::normalize;
use crate::launcher::Launcher;

const KEYWORDS: &[&str] = &["volume", "brightness", "wifi", "bluetooth", "restart", "shutdown"];

const NETWORK_PANE: &str = "x-apple.systempreferences:com.apple.preference.network";
const BLUETOOTH_PANE: &str = "x-apple.systempreferences:com.apple.preference.bluetooth";

const VOLUME_RESPONSE: &str =
    "I can't control system volume yet, but you can use the volume controls on your device.";
const BRIGHTNESS_RESPONSE: &str = "I can't control screen brightness yet, \
     but you can use the brightness controls on your device.";

pub struct SystemHandler {
    launcher: Arc<dyn Launcher>,
}

impl SystemHandler {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    fn open_pane(&self, pane: &str, label: &str) -> String {
        match self.launcher.open_url(pane) {
            Ok(()) => format!("I've opened {} preferences for you.", label),
            Err(e) => {
                warn!(pane, error = %e, "preference pane failed");
                format!("Sorry, I couldn't open {} preferences. Error: {}", label, e)
            }
        }
    }
}

impl Handler for SystemHandler {
    fn name(&self) -> &'static str {
        "system"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, command: &str, _parameters: Option<&Parameters>) -> String {
        let text = normalize(command);

        if text.contains("volume") {
            VOLUME_RESPONSE.to_string()
        } else if text.contains("brightness") {
            BRIGHTNESS_RESPONSE.to_string()
        } else if text.contains("wifi") {
            self.open_pane(NETWORK_PANE, "network")
        } else if text.contains("bluetooth") {
            self.open_pane(BLUETOOTH_PANE, "Bluetooth")
        } else {
            "I can help you with some system settings. What would you like to adjust?".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::{Launch, RecordingLauncher};

    #[test]
    fn test_unsupported_controls() {
        let launcher = Arc::new(RecordingLauncher::new());
        let h = SystemHandler::new(launcher.clone());
        assert_eq!(h.execute("turn up the volume", None), VOLUME_RESPONSE);
        assert_eq!(h.execute("brightness down", None), BRIGHTNESS_RESPONSE);
        assert!(BRIGHTNESS_RESPONSE.contains("brightness yet, but you can use"));
        assert!(launcher.launches().is_empty());
    }

    #[test]
    fn test_panes() {
        let launcher = Arc::new(RecordingLauncher::new());
        let h = SystemHandler::new(launcher.clone());
        assert_eq!(
            h.execute("Open wifi settings", None),
            "I've opened network preferences for you."
        );
        assert_eq!(h.execute("bluetooth", None), "I've opened Bluetooth preferences for you.");
        assert_eq!(
            launcher.launches(),
            vec![Launch::Url(NETWORK_PANE.into()), Launch::Url(BLUETOOTH_PANE.into())]
        );
    }

    #[test]
    fn test_restart_falls_through() {
        let launcher = Arc::new(RecordingLauncher::new());
        let h = SystemHandler::new(launcher);
        assert_eq!(
            h.execute("restart", None),
            "I can help you with some system settings. What would you like to adjust?"
        );
    }
}
