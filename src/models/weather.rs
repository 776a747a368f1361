//! Current weather conditions model and display methods

use serde::{Deserialize, Serialize};

/// Current weather conditions for a city, as reported by the provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentConditions {
    /// Resolved city name
    pub city: String,
    /// Current temperature in Celsius
    pub temp: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Human-readable condition description (pt-BR from the provider)
    pub description: String,
    /// Condition group code from the provider (e.g. "Clear", "Clouds")
    pub condition: String,
    /// Condition icon identifier
    pub icon: String,
}

impl CurrentConditions {
    /// Emoji + pt-BR label for the condition group
    #[must_use]
    pub fn condition_label(&self) -> String {
        match self.condition.to_lowercase().as_str() {
            "clear" => "☀️ Limpo".to_string(),
            "clouds" => "☁️ Nublado".to_string(),
            "rain" => "🌧️ Chuva".to_string(),
            "drizzle" => "💧 Chuvisco".to_string(),
            "thunderstorm" => "⛈️ Tempestade".to_string(),
            "snow" => "❄️ Neve".to_string(),
            "mist" | "fog" | "haze" => "🌫️ Névoa".to_string(),
            _ => self.condition.clone(),
        }
    }

    /// Description with the first letter uppercased
    #[must_use]
    pub fn format_description(&self) -> String {
        capitalize_first(&self.description)
    }

    /// Resolve the icon URL for this condition
    #[must_use]
    pub fn icon_url(&self, base: &str) -> String {
        format!("{}/{}@2x.png", base.trim_end_matches('/'), self.icon)
    }
}

/// Uppercase the first character of a string, UTF-8 aware
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
