//! Domain Entities - Core business objects
//!
//! These entities represent the core concepts of the ipinfo domain.
//! They have no transport dependencies and contain only business logic.

use crate::domain::value_objects::Locale;
use chrono::{DateTime, SecondsFormat, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder for values that cannot be derived (e.g. unknown timezone).
pub const NO_VALUE: &str = "-";

/// Raw geolocation data returned by a location store.
///
/// Owned by the store; the resolver and cache only read it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationRecord {
    /// Country code (ISO 3166-1 alpha-2, as stored: "SE", "US", ...)
    #[serde(default)]
    pub country_iso_code: String,
    /// Localized country names keyed by locale code
    #[serde(default)]
    pub country_names: BTreeMap<String, String>,
    /// Localized city names keyed by locale code
    #[serde(default)]
    pub city_names: BTreeMap<String, String>,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    /// IANA timezone name ("Europe/Stockholm")
    #[serde(default)]
    pub time_zone: String,
}

/// Resolved, presentation-ready location of a caller.
///
/// Created fresh for each request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub ip: String,
    pub country: String,
    pub city: String,
    pub longitude: f64,
    pub latitude: f64,
    #[serde(rename = "tz")]
    pub time_zone: String,
    /// Locale actually used for `country` and `city`
    pub language: String,
    /// Resolution instant formatted as RFC3339 in UTC
    pub utc_time: String,
    /// Resolution instant kept for local-time conversion
    pub timestamp: DateTime<Utc>,
}

impl LocationInfo {
    /// Build the normalized view of `record` for `ip` at instant `now`.
    ///
    /// One locale is chosen from the country names and applied to the
    /// city names as well; a city without that translation yields "".
    pub fn from_record(ip: impl Into<String>, record: &LocationRecord, now: DateTime<Utc>) -> Self {
        let locale = Locale::resolve(&record.country_iso_code, &record.country_names);

        Self {
            ip: ip.into(),
            country: locale.pick(&record.country_names).to_string(),
            city: locale.pick(&record.city_names).to_string(),
            longitude: record.longitude,
            latitude: record.latitude,
            time_zone: record.time_zone.clone(),
            language: locale.as_str().to_string(),
            utc_time: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            timestamp: now,
        }
    }

    fn zone(&self) -> Option<Tz> {
        self.time_zone.parse::<Tz>().ok()
    }

    /// Resolution instant in the record's timezone as RFC3339, or `"-"`.
    pub fn local_time(&self) -> String {
        match self.zone() {
            Some(tz) => self
                .timestamp
                .with_timezone(&tz)
                .to_rfc3339_opts(SecondsFormat::Secs, true),
            None => NO_VALUE.to_string(),
        }
    }

    /// Local date (`YYYY-MM-DD`) and time (`HH:MM:SS`), or `"-"` for both.
    pub fn local_date_time(&self) -> (String, String) {
        match self.zone() {
            Some(tz) => {
                let local = self.timestamp.with_timezone(&tz);
                (
                    local.format("%Y-%m-%d").to_string(),
                    local.format("%H:%M:%S").to_string(),
                )
            }
            None => (NO_VALUE.to_string(), NO_VALUE.to_string()),
        }
    }

    /// "Country, City", "Country" or "" depending on what is known.
    pub fn location_label(&self) -> String {
        match (self.country.is_empty(), self.city.is_empty()) {
            (true, _) => String::new(),
            (false, true) => self.country.clone(),
            (false, false) => format!("{}, {}", self.country, self.city),
        }
    }
}

/// A request header or parameter with all of its values joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedValue {
    pub name: String,
    pub value: String,
}

impl NamedValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}
