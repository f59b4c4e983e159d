use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One timestamped observation from the forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSample {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    /// Condition in the provider's vocabulary, e.g. "light rain".
    pub condition: String,
    pub icon: String,
}

/// Result of the current-weather endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub temperature_c: f64,
    pub condition: String,
    pub icon: String,
}

/// Per-sample row shown under a day summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourDetail {
    /// `HH:MM`
    pub time: String,
    /// Two decimals plus unit, e.g. `24.50°C`.
    pub temperature: String,
    /// e.g. `81%`
    pub humidity: String,
    pub condition: String,
    pub icon_url: String,
}

/// Aggregate of every sample that falls on one UTC calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySummary {
    pub date: chrono::NaiveDate,
    /// e.g. `Senin, 20 Okt 2025`
    pub label: String,
    pub mean_temperature_c: f64,
    pub dominant_condition: String,
    pub hours: Vec<HourDetail>,
}

impl DaySummary {
    /// One-line summary, e.g. `23.0°C, Cerah`.
    pub fn headline(&self) -> String {
        format!("{:.1}°C, {}", self.mean_temperature_c, self.dominant_condition)
    }
}

/// A point of the chart-ready temperature/humidity series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub time: DateTime<Utc>,
    pub temperature_c: f64,
    pub humidity_pct: u8,
}

/// Multi-day forecast payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub text: String,
    pub series: Vec<SeriesPoint>,
    /// Most recent day first.
    pub days: Vec<DaySummary>,
}

/// What the display surface receives for an assistant turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Text { text: String },
    Error { text: String },
    IconText { icon_url: String, text: String },
    Forecast(ForecastReport),
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Reply::Text { text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Reply::Error { text: text.into() }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Reply::Error { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub reply: Reply,
}

/// Builds the provider icon URL for an icon code such as `10d`.
pub fn icon_url(icon: &str) -> String {
    format!("http://openweathermap.org/img/wn/{icon}@2x.png")
}
