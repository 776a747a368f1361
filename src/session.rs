//! Search session state container
//!
//! Holds the state for one search surface: the query text, a loading flag,
//! the user-facing error and alert, current conditions and the daily
//! forecast list. Each search bumps a generation counter and only the
//! still-current generation may apply its outcome, so a stale response can
//! never overwrite fresher state.

use crate::api::WeatherApiClient;
use crate::daily_forecast;
use crate::models::{CityQuery, CurrentConditions, DailySummary};
use crate::{Result, TempoError};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::{debug, info, warn};

const ALERT_TITLE: &str = "Erro de API";
const ALERT_BODY: &str = "Sua chave de API OpenWeatherMap está inválida ou não autorizada. \
    Verifique se ela foi copiada corretamente e está ativa.";

/// A blocking alert shown for urgent errors (only the auth category)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub body: String,
}

/// Snapshot of one search surface's display state
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SearchState {
    /// The query text as typed
    pub query: String,
    /// Whether a search is in flight
    pub loading: bool,
    /// User-facing error text (pt-BR), if the last search failed
    pub error: Option<String>,
    /// Blocking alert, raised only for credential failures
    pub alert: Option<Alert>,
    /// Current conditions from the last successful search
    pub current: Option<CurrentConditions>,
    /// Daily forecast from the last successful search
    pub daily: Vec<DailySummary>,
}

/// State container for a sequence of user-initiated searches
pub struct SearchSession {
    client: WeatherApiClient,
    state: Mutex<SearchState>,
    generation: AtomicU64,
}

impl SearchSession {
    /// Create a session backed by the given client
    #[must_use]
    pub fn new(client: WeatherApiClient) -> Self {
        Self {
            client,
            state: Mutex::new(SearchState::default()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current display state
    #[must_use]
    pub fn state(&self) -> SearchState {
        self.state.lock().unwrap_or_else(|p| p.into_inner()).clone()
    }

    /// Run one search and return the resulting state snapshot
    ///
    /// Marks the state loading with results and error cleared, runs the
    /// sequential flow (validate, current conditions, forecast, aggregate),
    /// then applies the outcome only if no newer search has started since.
    /// A superseded search returns the then-current snapshot untouched.
    ///
    /// On failure the error text (and, for auth failures, the alert) is set
    /// and both weather fields stay cleared; nothing stale is ever shown.
    pub async fn search(&self, input: &str) -> SearchState {
        // The generation is taken under the state lock so the loading/clear
        // preamble of an older search can never run after a newer search
        // exists, let alone after its results were applied.
        let generation = {
            let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            state.query = input.to_string();
            state.loading = true;
            state.error = None;
            state.alert = None;
            state.current = None;
            state.daily.clear();
            generation
        };

        let outcome = self.run(input).await;

        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "search superseded, dropping its outcome");
            return state.clone();
        }

        state.loading = false;
        match outcome {
            Ok((current, daily)) => {
                info!(city = %current.city, days = daily.len(), "search succeeded");
                state.current = Some(current);
                state.daily = daily;
            }
            Err(e) => {
                warn!(error = %e, "search failed");
                state.error = Some(e.user_message());
                if matches!(e, TempoError::Auth) {
                    state.alert = Some(Alert {
                        title: ALERT_TITLE.to_string(),
                        body: ALERT_BODY.to_string(),
                    });
                }
            }
        }
        state.clone()
    }

    /// The sequential request flow: current conditions first, then forecast
    async fn run(&self, input: &str) -> Result<(CurrentConditions, Vec<DailySummary>)> {
        let city = CityQuery::parse(input)?;
        let current = self.client.current_weather(&city).await?;
        let samples = self.client.forecast(&city).await?;
        let daily = daily_forecast::daily_summaries(&samples);
        Ok((current, daily))
    }
}
