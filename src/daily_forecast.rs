//! Aggregation of 3-hourly forecast samples into daily summaries
//!
//! A single linear pass groups samples by UTC calendar date, accumulating
//! temperature extremes and keeping the sample closest to 13:00 local time
//! as each day's representative. Grouping is keyed by the UTC day while the
//! tie-break uses the local hour of the same timestamp; both halves of that
//! policy are intentional and kept as-is.

use crate::models::{DailySummary, ForecastSample};
use chrono::{Local, NaiveDate, Offset, Utc};
use std::collections::btree_map::{BTreeMap, Entry};
use tracing::debug;

/// Maximum number of upcoming days shown after the current one
pub const FORECAST_DAYS: usize = 4;

/// Group forecast samples into one summary per UTC calendar date
///
/// Input order does not matter; grouping is keyed by each sample's derived
/// date, and the map iterates in ascending date order. `offset_seconds` is
/// the UTC offset applied when ranking samples against 13:00.
#[must_use]
pub fn group_by_day(
    samples: &[ForecastSample],
    offset_seconds: i32,
) -> BTreeMap<NaiveDate, DailySummary> {
    let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

    for sample in samples {
        match days.entry(sample.date_key()) {
            Entry::Vacant(slot) => {
                slot.insert(DailySummary::seed(sample));
            }
            Entry::Occupied(mut slot) => slot.get_mut().observe(sample, offset_seconds),
        }
    }

    days
}

/// Reduce grouped summaries to the upcoming days, earliest first
///
/// Drops the summary for `today` (current conditions are served separately)
/// and truncates to at most [`FORECAST_DAYS`] entries.
#[must_use]
pub fn upcoming_days(
    days: BTreeMap<NaiveDate, DailySummary>,
    today: NaiveDate,
) -> Vec<DailySummary> {
    days.into_values()
        .filter(|summary| summary.date != today)
        .take(FORECAST_DAYS)
        .collect()
}

/// Produce the daily forecast list for the current moment
///
/// Uses the system-local UTC offset for the representative tie-break and
/// today's UTC date for the current-day exclusion.
#[must_use]
pub fn daily_summaries(samples: &[ForecastSample]) -> Vec<DailySummary> {
    let offset_seconds = Local::now().offset().fix().local_minus_utc();
    let today = Utc::now().date_naive();
    let summaries = upcoming_days(group_by_day(samples, offset_seconds), today);
    debug!(
        samples = samples.len(),
        days = summaries.len(),
        "aggregated forecast samples"
    );
    summaries
}
