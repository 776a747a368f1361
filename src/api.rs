//! HTTP client for the OpenWeatherMap API
//!
//! Issues the two read-only requests the application needs (current
//! conditions, 5-day/3-hour forecast) and maps failures to the error
//! categories surfaced to the user. Single attempt per call; no retries.

use crate::config::TempoConfig;
use crate::models::{CityQuery, CurrentConditions, ForecastSample};
use crate::{Result, TempoError, VERSION};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

// Fixed parameters of the provider contract, not configuration.
const UNITS: &str = "metric";
const LANG: &str = "pt_br";

/// Client for the weather provider's REST endpoints
#[derive(Clone)]
pub struct WeatherApiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

// The credential must not leak through debug formatting.
impl std::fmt::Debug for WeatherApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl WeatherApiClient {
    /// Build a client from configuration
    ///
    /// Fails with a configuration error when no API credential is present;
    /// the credential is never compiled in.
    pub fn new(config: &TempoConfig) -> Result<Self> {
        let api_key = config
            .weather
            .api_key
            .clone()
            .ok_or_else(|| TempoError::config("Weather API key is not configured"))?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(u64::from(config.weather.timeout_seconds)))
            .user_agent(format!("tempo98/{VERSION}"))
            .build()
            .map_err(|e| TempoError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.weather.base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Fetch current conditions for a city
    #[instrument(skip_all, fields(city = %city))]
    pub async fn current_weather(&self, city: &CityQuery) -> Result<CurrentConditions> {
        let url = self.endpoint_url("weather", city);
        let response: openweather::CurrentWeatherResponse = self.get_json(&url).await?;
        debug!(city = %city, "fetched current conditions");
        Ok(response.into())
    }

    /// Fetch the 5-day/3-hour forecast for a city
    ///
    /// The provider returns samples in chronological order; they are passed
    /// through unsorted.
    #[instrument(skip_all, fields(city = %city))]
    pub async fn forecast(&self, city: &CityQuery) -> Result<Vec<ForecastSample>> {
        let url = self.endpoint_url("forecast", city);
        let response: openweather::ForecastResponse = self.get_json(&url).await?;
        debug!(city = %city, samples = response.list.len(), "fetched forecast");
        Ok(response.list.into_iter().map(Into::into).collect())
    }

    fn endpoint_url(&self, endpoint: &str, city: &CityQuery) -> String {
        format!(
            "{}/{}?q={}&appid={}&units={}&lang={}",
            self.base_url,
            endpoint,
            urlencoding::encode(city.as_str()),
            self.api_key,
            UNITS,
            LANG
        )
    }

    /// Issue one GET request and decode the JSON body
    ///
    /// Maps 401 to the auth category, 404 to not-found, any other non-2xx
    /// status to transport-with-status, and transport or decode failures to
    /// transport-without-status.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.http.get(url).send().await.map_err(|e| {
            warn!(error = %e, "weather request failed without a response");
            TempoError::network(e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "weather request rejected");
            return Err(match status.as_u16() {
                401 => TempoError::Auth,
                404 => TempoError::NotFound,
                code => TempoError::status(code, status.canonical_reason().unwrap_or("Unknown")),
            });
        }

        response.json::<T>().await.map_err(|e| {
            warn!(error = %e, "failed to decode weather response body");
            TempoError::network(e.to_string())
        })
    }
}

/// OpenWeatherMap API response structures and conversions
mod openweather {
    use super::{CurrentConditions, ForecastSample};
    use serde::Deserialize;

    /// Response from the current-weather endpoint
    #[derive(Debug, Deserialize)]
    pub struct CurrentWeatherResponse {
        pub name: String,
        pub main: CurrentMain,
        #[serde(default)]
        pub weather: Vec<Condition>,
        pub wind: Wind,
    }

    #[derive(Debug, Deserialize)]
    pub struct CurrentMain {
        pub temp: f64,
        pub temp_min: f64,
        pub temp_max: f64,
        pub humidity: u8,
    }

    #[derive(Debug, Default, Clone, Deserialize)]
    pub struct Condition {
        #[serde(default)]
        pub description: String,
        #[serde(default, rename = "main")]
        pub group: String,
        #[serde(default)]
        pub icon: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct Wind {
        pub speed: f64,
    }

    /// Response from the 5-day/3-hour forecast endpoint
    #[derive(Debug, Deserialize)]
    pub struct ForecastResponse {
        pub list: Vec<ForecastItem>,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastItem {
        pub dt: i64,
        pub main: ForecastMain,
        #[serde(default)]
        pub weather: Vec<Condition>,
        #[serde(default)]
        pub dt_txt: String,
    }

    #[derive(Debug, Deserialize)]
    pub struct ForecastMain {
        pub temp: f64,
        pub temp_min: f64,
        pub temp_max: f64,
    }

    impl From<CurrentWeatherResponse> for CurrentConditions {
        fn from(response: CurrentWeatherResponse) -> Self {
            let condition = response.weather.first().cloned().unwrap_or_default();
            Self {
                city: response.name,
                temp: response.main.temp,
                temp_min: response.main.temp_min,
                temp_max: response.main.temp_max,
                humidity: response.main.humidity,
                wind_speed: response.wind.speed,
                description: condition.description,
                condition: condition.group,
                icon: condition.icon,
            }
        }
    }

    impl From<ForecastItem> for ForecastSample {
        fn from(item: ForecastItem) -> Self {
            let condition = item.weather.first().cloned().unwrap_or_default();
            Self {
                dt: item.dt,
                temp: item.main.temp,
                temp_min: item.main.temp_min,
                temp_max: item.main.temp_max,
                description: condition.description,
                icon: condition.icon,
                dt_txt: item.dt_txt,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TempoConfig;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: &str) -> TempoConfig {
        let mut config = TempoConfig::default();
        config.weather.api_key = Some("test_api_key_123".to_string());
        config.weather.base_url = base_url.to_string();
        config
    }

    fn current_weather_body() -> serde_json::Value {
        json!({
            "name": "São Paulo",
            "main": { "temp": 21.3, "temp_min": 18.0, "temp_max": 24.5, "humidity": 67 },
            "weather": [ { "description": "céu limpo", "main": "Clear", "icon": "01d" } ],
            "wind": { "speed": 3.1 }
        })
    }

    #[test]
    fn test_debug_output_redacts_api_key() {
        let client = WeatherApiClient::new(&test_config("https://example.com")).unwrap();
        let formatted = format!("{client:?}");
        assert!(!formatted.contains("test_api_key_123"));
        assert!(formatted.contains("<redacted>"));
    }

    #[test]
    fn test_client_requires_api_key() {
        let config = TempoConfig::default();
        let result = WeatherApiClient::new(&config);
        assert!(matches!(result, Err(TempoError::Config { .. })));
    }

    #[tokio::test]
    async fn test_current_weather_sends_fixed_query_parameters() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "São Paulo"))
            .and(query_param("appid", "test_api_key_123"))
            .and(query_param("units", "metric"))
            .and(query_param("lang", "pt_br"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_weather_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(&test_config(&server.uri())).unwrap();
        let city = CityQuery::parse("São Paulo").unwrap();
        let conditions = client.current_weather(&city).await.unwrap();

        assert_eq!(conditions.city, "São Paulo");
        assert_eq!(conditions.temp, 21.3);
        assert_eq!(conditions.humidity, 67);
        assert_eq!(conditions.condition, "Clear");
        assert_eq!(conditions.icon, "01d");
    }

    #[tokio::test]
    async fn test_forecast_preserves_sample_order() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .and(query_param("q", "Curitiba"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    {
                        "dt": 1_748_066_400i64,
                        "main": { "temp": 18.0, "temp_min": 12.0, "temp_max": 22.0 },
                        "weather": [ { "description": "nublado", "main": "Clouds", "icon": "04d" } ],
                        "dt_txt": "2025-05-24 06:00:00"
                    },
                    {
                        "dt": 1_748_088_000i64,
                        "main": { "temp": 24.0, "temp_min": 18.0, "temp_max": 26.0 },
                        "weather": [ { "description": "céu limpo", "main": "Clear", "icon": "01d" } ],
                        "dt_txt": "2025-05-24 12:00:00"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(&test_config(&server.uri())).unwrap();
        let city = CityQuery::parse("Curitiba").unwrap();
        let samples = client.forecast(&city).await.unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].dt, 1_748_066_400);
        assert_eq!(samples[0].description, "nublado");
        assert_eq!(samples[1].dt_txt, "2025-05-24 12:00:00");
    }

    #[tokio::test]
    async fn test_status_401_maps_to_auth() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(&test_config(&server.uri())).unwrap();
        let city = CityQuery::parse("Lugar Nenhum").unwrap();
        let result = client.current_weather(&city).await;
        assert!(matches!(result, Err(TempoError::Auth)));
    }

    #[tokio::test]
    async fn test_status_404_maps_to_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(&test_config(&server.uri())).unwrap();
        let city = CityQuery::parse("Lugar Nenhum").unwrap();
        let result = client.current_weather(&city).await;
        assert!(matches!(result, Err(TempoError::NotFound)));
    }

    #[tokio::test]
    async fn test_other_status_carries_the_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(&test_config(&server.uri())).unwrap();
        let city = CityQuery::parse("Recife").unwrap();
        let err = client.current_weather(&city).await.unwrap_err();
        match err {
            TempoError::Transport { status, .. } => assert_eq!(status, Some(503)),
            other => panic!("expected transport error, got: {other:?}"),
        }
        // Single attempt only
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_body_maps_to_network_category() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(&test_config(&server.uri())).unwrap();
        let city = CityQuery::parse("Manaus").unwrap();
        let result = client.current_weather(&city).await;
        assert!(matches!(
            result,
            Err(TempoError::Transport { status: None, .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_weather_array_defaults_condition_fields() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "Natal",
                "main": { "temp": 28.0, "temp_min": 25.0, "temp_max": 30.0, "humidity": 80 },
                "weather": [],
                "wind": { "speed": 5.2 }
            })))
            .mount(&server)
            .await;

        let client = WeatherApiClient::new(&test_config(&server.uri())).unwrap();
        let city = CityQuery::parse("Natal").unwrap();
        let conditions = client.current_weather(&city).await.unwrap();
        assert_eq!(conditions.description, "");
        assert_eq!(conditions.icon, "");
    }
}
