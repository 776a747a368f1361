//! `Tempo98` - Previsão do tempo retrô no terminal
//!
//! This library provides the core functionality for looking up current
//! weather and a short-range daily forecast for a city, backed by the
//! OpenWeatherMap API and presented in Brazilian Portuguese.

pub mod api;
pub mod config;
pub mod daily_forecast;
pub mod error;
pub mod models;
pub mod session;

// Re-export core types for public API
pub use api::WeatherApiClient;
pub use config::TempoConfig;
pub use daily_forecast::{daily_summaries, group_by_day, upcoming_days, FORECAST_DAYS};
pub use error::TempoError;
pub use models::{CityQuery, CurrentConditions, DailySummary, ForecastSample};
pub use session::{Alert, SearchSession, SearchState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, TempoError>;
