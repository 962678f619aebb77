use std::sync::Arc;

use tracing::warn;

use super::{param, Handler, Parameters};
use crate::extract::{extract_city, form_encode, normalize};
use crate::launcher::Launcher;

const KEYWORDS: &[&str] = &["weather", "temperature", "forecast"];

pub struct WeatherHandler {
    launcher: Arc<dyn Launcher>,
}

impl WeatherHandler {
    pub fn new(launcher: Arc<dyn Launcher>) -> Self {
        Self { launcher }
    }

    pub fn weather_url(city: &str) -> String {
        format!("https://www.google.com/search?q=weather+in+{}", form_encode(city))
    }
}

impl Handler for WeatherHandler {
    fn name(&self) -> &'static str {
        "weather"
    }

    fn keywords(&self) -> &[&'static str] {
        KEYWORDS
    }

    fn execute(&self, command: &str, parameters: Option<&Parameters>) -> String {
        // No city means "current location", which we can't look up
        let city = match param(parameters, "city") {
            Some(city) => Some(city.to_string()),
            None => extract_city(&normalize(command)),
        };

        let Some(city) = city else {
            return "Which city's weather would you like to check?".to_string();
        };

        match self.launcher.open_url(&Self::weather_url(&city)) {
            Ok(()) => format!("I've opened weather information for {}.", city),
            Err(e) => {
                warn!(city = %city, error = %e, "weather lookup failed");
                format!("Sorry, I couldn't open the weather for {}. Error: {}", city, e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::launcher::{Launch, RecordingLauncher};

    #[test]
    fn test_city_from_command() {
        let launcher = Arc::new(RecordingLauncher::new());
        let h = WeatherHandler::new(launcher.clone());

        assert_eq!(
            h.execute("Weather in New York", None),
            "I've opened weather information for new york."
        );
        assert_eq!(
            launcher.launches(),
            vec![Launch::Url(
                "https://www.google.com/search?q=weather+in+new+york".into()
            )]
        );
    }

    #[test]
    fn test_no_city_asks() {
        let launcher = Arc::new(RecordingLauncher::new());
        let h = WeatherHandler::new(launcher.clone());
        assert_eq!(
            h.execute("what's the forecast", None),
            "Which city's weather would you like to check?"
        );
        assert!(launcher.launches().is_empty());
    }

    #[test]
    fn test_city_parameter() {
        let launcher = Arc::new(RecordingLauncher::new());
        let h = WeatherHandler::new(launcher);
        let mut p = Parameters::new();
        p.insert("city".into(), "Paris".into());
        assert_eq!(h.execute("weather", Some(&p)), "I've opened weather information for Paris.");
    }
}
