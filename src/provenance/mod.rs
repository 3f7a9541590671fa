// src/provenance/mod.rs

//! Data lineage for field evaluations.
//! Each record hashes the data it describes and links to the previous record by hash.

use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};
use sha2::{Sha256, Digest};

use crate::WeylError;

/// Represents a single record in the provenance chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvenanceRecord {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub data_hash: String,
    pub software_version: String,
    pub previous_record_hash: Option<String>,
    pub metadata: serde_json::Value,
}

impl ProvenanceRecord {
    pub fn new(
        event_type: String,
        data: &[u8],
        software_version: String,
        previous_record_hash: Option<String>,
        metadata: serde_json::Value,
    ) -> Self {
        ProvenanceRecord {
            timestamp: Utc::now(),
            event_type,
            data_hash: calculate_hash(data),
            software_version,
            previous_record_hash,
            metadata,
        }
    }

    /// Hash of the serialized record, used as the link from its successor.
    pub fn calculate_record_hash(&self) -> Result<String, WeylError> {
        let serialized = serde_json::to_string(self)
            .map_err(|e| WeylError::ProvenanceFailed(format!("Failed to serialize record: {}", e)))?;
        Ok(calculate_hash(serialized.as_bytes()))
    }
}

/// SHA-256 of a byte slice as lowercase hex.
pub fn calculate_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Little-endian bytes of a sequence of components, the form that gets hashed.
pub fn component_bytes<'a, I>(components: I) -> Vec<u8>
where
    I: IntoIterator<Item = &'a f64>,
{
    components.into_iter().flat_map(|c| c.to_le_bytes()).collect()
}

/// Manages the chain of ProvenanceRecords.
#[derive(Debug, Default)]
pub struct ProvenanceChain {
    records: Vec<ProvenanceRecord>,
}

impl ProvenanceChain {
    pub fn new() -> Self {
        ProvenanceChain { records: Vec::new() }
    }

    /// Appends a record linked to the current tail of the chain.
    pub fn add_record(
        &mut self,
        event_type: String,
        data: &[u8],
        software_version: String,
        metadata: serde_json::Value,
    ) -> Result<(), WeylError> {
        let previous_record_hash = match self.records.last() {
            Some(record) => Some(record.calculate_record_hash()?),
            None => None,
        };
        self.records.push(ProvenanceRecord::new(
            event_type,
            data,
            software_version,
            previous_record_hash,
            metadata,
        ));
        Ok(())
    }

    pub fn records(&self) -> &[ProvenanceRecord] {
        &self.records
    }

    /// Checks that every record points at the hash of the one before it.
    pub fn verify(&self) -> Result<bool, WeylError> {
        if let Some(first) = self.records.first() {
            if first.previous_record_hash.is_some() {
                return Ok(false);
            }
        }
        for pair in self.records.windows(2) {
            let expected = pair[0].calculate_record_hash()?;
            if pair[1].previous_record_hash.as_deref() != Some(expected.as_str()) {
                return Ok(false);
            }
        }
        Ok(true)
    }

    pub fn to_json(&self) -> Result<String, WeylError> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| WeylError::ProvenanceFailed(format!("Failed to serialize provenance chain: {}", e)))
    }

    pub fn from_json(json_str: &str) -> Result<Self, WeylError> {
        let records = serde_json::from_str(json_str)
            .map_err(|e| WeylError::ProvenanceFailed(format!("Failed to deserialize provenance chain: {}", e)))?;
        Ok(ProvenanceChain { records })
    }

    /// Drains all records, leaving the chain empty.
    pub fn drain_records(&mut self) -> Vec<ProvenanceRecord> {
        std::mem::take(&mut self.records)
    }
}
