//! In-Memory Location Store
//!
//! Implements LocationStore over a fixed map of addresses, loaded from
//! code or from a JSON fixture file.

use crate::domain::entities::LocationRecord;
use crate::domain::errors::LookupError;
use crate::domain::ports::LocationStore;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::net::IpAddr;
use std::path::Path;

/// Fixture entry: an address plus its record fields.
#[derive(Debug, Deserialize)]
struct FixtureEntry {
    ip: IpAddr,
    #[serde(flatten)]
    record: LocationRecord,
}

/// Location store backed by a hash map.
#[derive(Debug, Default, Clone)]
pub struct MemoryLocationStore {
    records: HashMap<IpAddr, LocationRecord>,
}

impl MemoryLocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record (builder style).
    pub fn with_record(mut self, ip: IpAddr, record: LocationRecord) -> Self {
        self.records.insert(ip, record);
        self
    }

    /// Load a JSON array of `{"ip": ..., <record fields>}` objects.
    pub fn from_reader(reader: impl Read) -> anyhow::Result<Self> {
        let entries: Vec<FixtureEntry> = serde_json::from_reader(reader)?;
        Ok(Self {
            records: entries.into_iter().map(|e| (e.ip, e.record)).collect(),
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl LocationStore for MemoryLocationStore {
    fn lookup(&self, ip: IpAddr) -> Result<LocationRecord, LookupError> {
        self.records
            .get(&ip)
            .cloned()
            .ok_or_else(|| LookupError::NotFound(ip.to_string()))
    }
}
