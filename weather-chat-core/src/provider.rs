use async_trait::async_trait;
use std::fmt::Debug;

use crate::model::{CurrentWeather, WeatherSample};

pub mod openweather;

pub use openweather::OpenWeatherProvider;

/// Failure of a weather or extraction service call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Connection-level failure; the server was never reached.
    #[error("cannot reach {service}: {message}")]
    Unavailable { service: &'static str, message: String },

    /// The credential was rejected.
    #[error("{service} rejected the API key (status {status})")]
    Unauthorized { service: &'static str, status: u16 },

    /// The server answered, but without usable data.
    #[error("{service} returned no data (status {status}): {message}")]
    DataMissing { service: &'static str, status: u16, message: String },

    #[error("{service} request failed: {message}")]
    Other { service: &'static str, message: String },
}

impl ProviderError {
    /// Classifies a transport error from reqwest.
    pub fn from_transport(service: &'static str, err: &reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            return ProviderError::Unavailable { service, message: err.to_string() };
        }
        if let Some(status) = err.status() {
            return Self::from_status(service, status.as_u16(), err.to_string());
        }
        Self::from_message(service, err.to_string())
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(service: &'static str, status: u16, message: String) -> Self {
        match status {
            401 | 403 => ProviderError::Unauthorized { service, status },
            _ => ProviderError::DataMissing { service, status, message },
        }
    }

    /// Last resort when all we have is an error message.
    pub fn from_message(service: &'static str, message: String) -> Self {
        let lower = message.to_lowercase();
        if lower.contains("unauthorized") || lower.contains("api key not valid") {
            ProviderError::Unauthorized { service, status: 401 }
        } else if lower.contains("failed to establish a new connection")
            || lower.contains("connection refused")
        {
            ProviderError::Unavailable { service, message }
        } else {
            ProviderError::Other { service, message }
        }
    }
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions for `city`, metric units.
    async fn current(&self, city: &str) -> Result<CurrentWeather, ProviderError>;

    /// Multi-day forecast samples for `city`, metric units, in provider order.
    async fn forecast(&self, city: &str) -> Result<Vec<WeatherSample>, ProviderError>;
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            ProviderError::from_status("openweather", 401, String::new()),
            ProviderError::Unauthorized { status: 401, .. }
        ));
        assert!(matches!(
            ProviderError::from_status("openweather", 404, "city not found".into()),
            ProviderError::DataMissing { status: 404, .. }
        ));
    }

    #[test]
    fn message_classification_fallback() {
        assert!(matches!(
            ProviderError::from_message("gemini", "401 Unauthorized".into()),
            ProviderError::Unauthorized { .. }
        ));
        assert!(matches!(
            ProviderError::from_message("gemini", "API key not valid. Please pass a valid API key.".into()),
            ProviderError::Unauthorized { .. }
        ));
        assert!(matches!(
            ProviderError::from_message("openweather", "Failed to establish a new connection".into()),
            ProviderError::Unavailable { .. }
        ));
        assert!(matches!(
            ProviderError::from_message("openweather", "something odd".into()),
            ProviderError::Other { .. }
        ));
    }

    #[test]
    fn truncate_body_keeps_short_bodies_and_respects_char_boundaries() {
        assert_eq!(truncate_body("short"), "short");

        let long = "é".repeat(150);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.len(), 200 + 3);
    }
}
