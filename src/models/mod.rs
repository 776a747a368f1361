//! Data models for the Tempo98 application
//!
//! This module contains the core domain models organized by concern:
//! - Query: validated city name input
//! - Weather: current conditions as reported by the provider
//! - Forecast: 3-hourly forecast samples and derived daily summaries

pub mod forecast;
pub mod query;
pub mod weather;

// Re-export all public types for convenient access
pub use forecast::{DailySummary, ForecastSample};
pub use query::CityQuery;
pub use weather::CurrentConditions;
