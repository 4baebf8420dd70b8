//! MaxMind Location Store
//!
//! Implements LocationStore using a MaxMind GeoLite2-City database.

use crate::domain::entities::LocationRecord;
use crate::domain::errors::LookupError;
use crate::domain::ports::LocationStore;
use maxminddb::{MaxMindDBError, Reader};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

/// MaxMind GeoIP location store.
///
/// Reads city-level records (names, coordinates, timezone) from a
/// GeoLite2-City or GeoIP2-City database file.
pub struct MaxMindLocationStore {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindLocationStore {
    /// Load a database from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    /// Load a database already held in memory.
    pub fn from_bytes(bytes: Vec<u8>) -> anyhow::Result<Self> {
        let reader = Reader::from_source(bytes)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    /// Database type from the file metadata ("GeoLite2-City", ...).
    pub fn database_type(&self) -> &str {
        &self.reader.metadata.database_type
    }
}

#[derive(Debug, Default, Deserialize)]
struct Names {
    #[serde(default)]
    names: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct Country {
    iso_code: Option<String>,
    #[serde(default)]
    names: BTreeMap<String, String>,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    latitude: Option<f64>,
    longitude: Option<f64>,
    time_zone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct CityResp {
    country: Option<Country>,
    city: Option<Names>,
    location: Option<Location>,
}

impl From<CityResp> for LocationRecord {
    fn from(resp: CityResp) -> Self {
        let country = resp.country.unwrap_or_default();
        let location = resp.location.unwrap_or_default();
        Self {
            country_iso_code: country.iso_code.unwrap_or_default(),
            country_names: country.names,
            city_names: resp.city.unwrap_or_default().names,
            latitude: location.latitude.unwrap_or_default(),
            longitude: location.longitude.unwrap_or_default(),
            time_zone: location.time_zone.unwrap_or_default(),
        }
    }
}

fn lookup_error(ip: IpAddr, err: MaxMindDBError) -> LookupError {
    match err {
        MaxMindDBError::AddressNotFoundError(_) => LookupError::NotFound(ip.to_string()),
        other => LookupError::Corrupt(other.to_string()),
    }
}

impl LocationStore for MaxMindLocationStore {
    fn lookup(&self, ip: IpAddr) -> Result<LocationRecord, LookupError> {
        let resp: CityResp = self.reader.lookup(ip).map_err(|e| lookup_error(ip, e))?;
        Ok(resp.into())
    }
}
