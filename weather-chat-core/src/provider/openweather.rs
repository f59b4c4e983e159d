use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::model::{CurrentWeather, WeatherSample};

use super::{ProviderError, WeatherProvider, truncate_body};

const SERVICE: &str = "openweather";
const CURRENT_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const FORECAST_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
        }
    }

    async fn get(&self, url: &str, city: &str) -> Result<String, ProviderError> {
        let res = self
            .http
            .get(url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::from_transport(SERVICE, &e))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::from_transport(SERVICE, &e))?;

        if !status.is_success() {
            warn!(%status, city, "OpenWeather request failed");
            return Err(ProviderError::from_status(
                SERVICE,
                status.as_u16(),
                truncate_body(&body),
            ));
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

fn parse_error(what: &str, err: serde_json::Error) -> ProviderError {
    ProviderError::Other {
        service: SERVICE,
        message: format!("Failed to parse OpenWeather {what} JSON: {err}"),
    }
}

/// `(description, icon)` of the first weather entry.
fn first_condition(weather: &[OwWeather]) -> (String, String) {
    weather
        .first()
        .map(|w| (w.description.to_lowercase(), w.icon.clone()))
        .unwrap_or_else(|| ("unknown".to_string(), String::new()))
}

pub(crate) fn parse_current(body: &str) -> Result<CurrentWeather, ProviderError> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).map_err(|e| parse_error("current", e))?;

    let (condition, icon) = first_condition(&parsed.weather);

    Ok(CurrentWeather {
        temperature_c: parsed.main.temp,
        condition,
        icon,
    })
}

pub(crate) fn parse_forecast(body: &str) -> Result<Vec<WeatherSample>, ProviderError> {
    let parsed: OwForecastResponse =
        serde_json::from_str(body).map_err(|e| parse_error("forecast", e))?;

    let samples = parsed
        .list
        .into_iter()
        .filter_map(|entry| {
            let time = DateTime::from_timestamp(entry.dt, 0)?;
            let (condition, icon) = first_condition(&entry.weather);
            Some(WeatherSample {
                time,
                temperature_c: entry.main.temp,
                humidity_pct: entry.main.humidity,
                condition,
                icon,
            })
        })
        .collect();

    Ok(samples)
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, city: &str) -> Result<CurrentWeather, ProviderError> {
        let body = self.get(CURRENT_URL, city).await?;
        let current = parse_current(&body)?;
        debug!(city, temp = current.temperature_c, "current weather fetched");
        Ok(current)
    }

    async fn forecast(&self, city: &str) -> Result<Vec<WeatherSample>, ProviderError> {
        let body = self.get(FORECAST_URL, city).await?;
        let samples = parse_forecast(&body)?;
        debug!(city, samples = samples.len(), "forecast fetched");
        Ok(samples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURRENT: &str = r#"{
        "cod": 200,
        "name": "Bandung",
        "dt": 1760950800,
        "main": { "temp": 24.3, "feels_like": 24.9, "humidity": 78 },
        "weather": [{ "id": 803, "main": "Clouds", "description": "Broken Clouds", "icon": "04d" }],
        "wind": { "speed": 1.2 }
    }"#;

    const FORECAST: &str = r#"{
        "cod": "200",
        "cnt": 2,
        "list": [
            {
                "dt": 1760950800,
                "main": { "temp": 24.0, "humidity": 80 },
                "weather": [{ "description": "light rain", "icon": "10d" }]
            },
            {
                "dt": 1760961600,
                "main": { "temp": 26.5, "humidity": 70 },
                "weather": []
            }
        ],
        "city": { "name": "Bandung", "country": "ID" }
    }"#;

    #[test]
    fn parses_current_response() {
        let current = parse_current(CURRENT).unwrap();
        assert_eq!(
            current,
            CurrentWeather {
                temperature_c: 24.3,
                condition: "broken clouds".into(),
                icon: "04d".into(),
            }
        );
    }

    #[test]
    fn parses_forecast_samples_in_order() {
        let samples = parse_forecast(FORECAST).unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].time.timestamp(), 1760950800);
        assert_eq!(samples[0].condition, "light rain");
        assert_eq!(samples[0].icon, "10d");
        assert_eq!(samples[1].temperature_c, 26.5);
        assert_eq!(samples[1].condition, "unknown");
    }

    #[test]
    fn endpoints_use_tls() {
        assert!(CURRENT_URL.starts_with("https://"));
        assert!(FORECAST_URL.starts_with("https://"));
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let err = parse_forecast("{\"cod\":\"200\"}").unwrap_err();
        assert!(err.to_string().contains("Failed to parse OpenWeather forecast JSON"));
    }
}
