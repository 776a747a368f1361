//! Forecast sample and daily summary models

use super::weather::capitalize_first;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Hour of day the representative sample is chosen against (13:00 local)
pub const REPRESENTATIVE_HOUR: i64 = 13;

// Short pt-BR names, indexed by chrono's from-Monday weekday number and
// zero-based month.
const WEEKDAYS_PT_BR: [&str; 7] = ["seg.", "ter.", "qua.", "qui.", "sex.", "sáb.", "dom."];
const MONTHS_PT_BR: [&str; 12] = [
    "jan.", "fev.", "mar.", "abr.", "mai.", "jun.", "jul.", "ago.", "set.", "out.", "nov.", "dez.",
];

/// A single 3-hour-resolution forecast reading from the provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ForecastSample {
    /// Unix timestamp for this reading
    pub dt: i64,
    /// Temperature in Celsius
    pub temp: f64,
    /// Minimum temperature for the 3-hour window
    pub temp_min: f64,
    /// Maximum temperature for the 3-hour window
    pub temp_max: f64,
    /// Condition description (pt-BR from the provider)
    pub description: String,
    /// Condition icon identifier
    pub icon: String,
    /// Provider-formatted timestamp, e.g. "2025-05-24 18:00:00"
    pub dt_txt: String,
}

impl ForecastSample {
    /// UTC calendar date of this sample, used as the grouping key
    #[must_use]
    pub fn date_key(&self) -> NaiveDate {
        DateTime::<Utc>::from_timestamp(self.dt, 0)
            .map(|dt| dt.date_naive())
            .unwrap_or_default()
    }

    /// Hour of day (0-23) at the given UTC offset
    #[must_use]
    pub fn local_hour(&self, offset_seconds: i32) -> i64 {
        hour_at_offset(self.dt, offset_seconds)
    }
}

/// Hour of day (0-23) of a Unix timestamp shifted by a UTC offset
#[must_use]
pub fn hour_at_offset(dt: i64, offset_seconds: i32) -> i64 {
    (dt + i64::from(offset_seconds)).rem_euclid(86_400) / 3_600
}

/// One aggregated forecast entry per calendar date
///
/// Seeded from the first sample seen for a date, then widened and possibly
/// re-headlined as further samples for the same date are observed. The
/// representative fields come from the sample whose local hour is closest
/// to 13:00; `min_temp`/`max_temp` accumulate across every sample for the
/// date. Note the representative `temp` is not guaranteed to lie inside
/// `min_temp..=max_temp`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DailySummary {
    /// Timestamp of the representative sample
    pub dt: i64,
    /// Calendar-date key (UTC day of the samples)
    pub date: NaiveDate,
    /// Representative temperature in Celsius
    pub temp: f64,
    /// Minimum temperature observed across all samples for this date
    pub min_temp: f64,
    /// Maximum temperature observed across all samples for this date
    pub max_temp: f64,
    /// Representative condition description
    pub description: String,
    /// Representative condition icon identifier
    pub icon: String,
}

impl DailySummary {
    /// Seed a summary from the first sample seen for its date
    #[must_use]
    pub fn seed(sample: &ForecastSample) -> Self {
        Self {
            dt: sample.dt,
            date: sample.date_key(),
            temp: sample.temp,
            min_temp: sample.temp_min,
            max_temp: sample.temp_max,
            description: sample.description.clone(),
            icon: sample.icon.clone(),
        }
    }

    /// Fold a further same-date sample into this summary
    ///
    /// Always widens the running extremes. Independently, replaces the
    /// representative fields when the sample's local hour is strictly
    /// closer to 13:00 than the current representative's; an equidistant
    /// sample never replaces. The extremes are never touched by the
    /// representative branch.
    pub fn observe(&mut self, sample: &ForecastSample, offset_seconds: i32) {
        self.min_temp = self.min_temp.min(sample.temp_min);
        self.max_temp = self.max_temp.max(sample.temp_max);

        let current_distance = (hour_at_offset(self.dt, offset_seconds) - REPRESENTATIVE_HOUR).abs();
        let sample_distance = (sample.local_hour(offset_seconds) - REPRESENTATIVE_HOUR).abs();
        if sample_distance < current_distance {
            self.dt = sample.dt;
            self.temp = sample.temp;
            self.description = sample.description.clone();
            self.icon = sample.icon.clone();
        }
    }

    /// Short pt-BR date form, e.g. "sáb., 24 de mai."
    #[must_use]
    pub fn format_date(&self) -> String {
        let weekday = WEEKDAYS_PT_BR[self.date.weekday().num_days_from_monday() as usize];
        let month = MONTHS_PT_BR[self.date.month0() as usize];
        format!("{}, {} de {}", weekday, self.date.day(), month)
    }

    /// Description with the first letter uppercased
    #[must_use]
    pub fn format_description(&self) -> String {
        capitalize_first(&self.description)
    }

    /// Resolve the icon URL for this summary
    #[must_use]
    pub fn icon_url(&self, base: &str) -> String {
        format!("{}/{}@2x.png", base.trim_end_matches('/'), self.icon)
    }
}
