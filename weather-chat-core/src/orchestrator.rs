//! Per-turn decision logic.
//!
//! A turn goes: extract city (or fall back to the last one), resolve it
//! against the gazetteer, classify the time reference, fetch, aggregate.
//! Any failure ends the turn with an error reply; the session continues.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

use crate::{
    aggregate::{DayOutcome, aggregate_multi, aggregate_single_day},
    city,
    config::{Config, ServiceId},
    conversation::ConversationState,
    error::TurnError,
    extract::{CityExtractor, GeminiExtractor},
    locale::{capitalize, long_date_label, translate_condition},
    model::{ForecastReport, Reply, SeriesPoint, icon_url},
    provider::{OpenWeatherProvider, ProviderError, WeatherProvider},
    timeref::{TimeRef, classify},
};

#[derive(Debug)]
pub struct Orchestrator {
    extractor: Box<dyn CityExtractor>,
    provider: Box<dyn WeatherProvider>,
}

impl Orchestrator {
    pub fn new(extractor: Box<dyn CityExtractor>, provider: Box<dyn WeatherProvider>) -> Self {
        Self { extractor, provider }
    }

    /// Builds the Gemini + OpenWeather pair from configured credentials.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let gemini_key = config.require_api_key(ServiceId::Gemini)?;
        let weather_key = config.require_api_key(ServiceId::OpenWeather)?;

        Ok(Self::new(
            Box::new(GeminiExtractor::new(gemini_key.to_owned(), config.model_name())),
            Box::new(OpenWeatherProvider::new(weather_key.to_owned())),
        ))
    }

    /// Runs one turn and records it in `state`.
    ///
    /// Exactly one user turn and one assistant turn are appended, whatever
    /// the outcome. Returns the assistant reply.
    pub async fn handle_turn(&self, state: &mut ConversationState, utterance: &str) -> Reply {
        self.handle_turn_at(state, utterance, Utc::now()).await
    }

    /// [`Self::handle_turn`] with an explicit "now" for date arithmetic.
    pub async fn handle_turn_at(
        &self,
        state: &mut ConversationState,
        utterance: &str,
        now: DateTime<Utc>,
    ) -> Reply {
        state.push_user(utterance);

        let reply = match self.run_turn(state, utterance, now).await {
            Ok(reply) => {
                info!("turn rendered");
                reply
            }
            Err(err) => {
                info!(error = ?err, "turn failed");
                Reply::error(err.to_string())
            }
        };

        state.push_assistant(reply.clone());
        reply
    }

    async fn run_turn(
        &self,
        state: &mut ConversationState,
        utterance: &str,
        now: DateTime<Utc>,
    ) -> Result<Reply, TurnError> {
        let city = self.resolve_city(state, utterance).await?;
        state.push_city(city.clone());

        let when = classify(utterance);
        debug!(%city, ?when, "turn planned");

        match when {
            TimeRef::Today => self.today(&city).await,
            TimeRef::MultiDay => self.multi_day(&city).await,
            TimeRef::Tomorrow | TimeRef::DayAfter => {
                let offset = when.day_offset().unwrap_or_default();
                self.single_day(&city, now, offset).await
            }
        }
    }

    async fn resolve_city(
        &self,
        state: &ConversationState,
        utterance: &str,
    ) -> Result<String, TurnError> {
        let extracted = self.extractor.extract_city(utterance).await.map_err(|err| {
            warn!(error = %err, "city extraction failed");
            TurnError::from(err)
        })?;

        let candidate = match extracted {
            Some(city) => city,
            None => match state.last_city() {
                Some(previous) => {
                    debug!(city = previous, "no city in utterance, reusing last one");
                    previous.to_string()
                }
                None => return Err(TurnError::CityNotUnderstood),
            },
        };

        Ok(city::resolve(&candidate))
    }

    async fn today(&self, city: &str) -> Result<Reply, TurnError> {
        let current = self.provider.current(city).await.map_err(fetch_failed)?;

        let text = format!(
            "Suhu saat ini di **{}**: **{}°C**, kondisi **{}**.",
            capitalize(city),
            current.temperature_c,
            translate_condition(&current.condition),
        );

        Ok(Reply::IconText {
            icon_url: icon_url(&current.icon),
            text,
        })
    }

    async fn multi_day(&self, city: &str) -> Result<Reply, TurnError> {
        let samples = self.provider.forecast(city).await.map_err(fetch_failed)?;
        if samples.is_empty() {
            return Err(TurnError::DataMissing);
        }

        let series = samples
            .iter()
            .map(|s| SeriesPoint {
                time: s.time,
                temperature_c: s.temperature_c,
                humidity_pct: s.humidity_pct,
            })
            .collect();

        Ok(Reply::Forecast(ForecastReport {
            text: format!(
                "Berikut perkiraan cuaca di **{}** untuk 5 hari ke depan:",
                capitalize(city)
            ),
            series,
            days: aggregate_multi(&samples),
        }))
    }

    async fn single_day(
        &self,
        city: &str,
        now: DateTime<Utc>,
        offset: i64,
    ) -> Result<Reply, TurnError> {
        let samples = self.provider.forecast(city).await.map_err(fetch_failed)?;
        let target = (now + Duration::days(offset)).date_naive();

        match aggregate_single_day(&samples, target) {
            DayOutcome::Available(day) => Ok(Reply::text(format!(
                "Perkiraan di **{}** pada **{}**: {:.1}°C, {}.",
                capitalize(city),
                long_date_label(target),
                day.mean_temperature_c,
                day.dominant_condition,
            ))),
            DayOutcome::NotAvailable => {
                debug!(%target, "no forecast samples for target date");
                Err(TurnError::DayNotAvailable)
            }
        }
    }
}

fn fetch_failed(err: ProviderError) -> TurnError {
    warn!(error = %err, "weather fetch failed");
    TurnError::from(err)
}
