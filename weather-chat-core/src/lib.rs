//! Core library for the `weather-chat` assistant.
//!
//! This crate defines:
//! - City-name correction against a fixed gazetteer
//! - Time-reference classification of user utterances
//! - Day grouping and summaries over raw forecast samples
//! - The per-turn orchestrator over the language-model and weather services
//! - Configuration & credentials handling
//!
//! It is used by `weather-chat-cli`, but any chat surface can drive the
//! [`Orchestrator`] with its own [`ConversationState`].

pub mod aggregate;
pub mod city;
pub mod config;
pub mod conversation;
pub mod error;
pub mod extract;
pub mod locale;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod timeref;

pub use aggregate::{DayOutcome, aggregate_multi, aggregate_single_day};
pub use config::{Config, ServiceConfig, ServiceId};
pub use conversation::ConversationState;
pub use error::TurnError;
pub use extract::{CityExtractor, GeminiExtractor};
pub use model::{DaySummary, ForecastReport, HourDetail, Reply, Role, Turn, WeatherSample};
pub use orchestrator::Orchestrator;
pub use provider::{OpenWeatherProvider, ProviderError, WeatherProvider};
pub use timeref::TimeRef;
