// ./src/types.rs
//! Core type definitions for the proof crate
//!
//! This module defines the record identifiers compared during a proof run and
//! the `ProofResult` handed back to the platform.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a single wellness record, e.g. a daily sleep entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Returns `None` for an empty or whitespace-only identifier.
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Why a lookup produced no identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    /// The recognized submission file is not in the input directory
    NoSubmission,
    /// The `data` key is absent or its list is empty
    EmptyData,
    /// `data[0]` has no usable `id`
    MissingId,
    /// The document could not be read or parsed
    Malformed(String),
    /// The API answered with a non-success status
    HttpStatus(u16),
    /// The API could not be reached
    Transport(String),
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::NoSubmission => f.write_str("submission file not found"),
            MissingReason::EmptyData => f.write_str("'data' key is missing or empty"),
            MissingReason::MissingId => f.write_str("first 'data' entry has no id"),
            MissingReason::Malformed(e) => write!(f, "malformed document: {}", e),
            MissingReason::HttpStatus(code) => write!(f, "failed to fetch data, status code {}", code),
            MissingReason::Transport(e) => write!(f, "request failed: {}", e),
        }
    }
}

/// Outcome of looking up a record identifier, locally or remotely.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(RecordId),
    Missing(MissingReason),
}

impl Lookup {
    /// Two lookups match only when both found the same identifier.
    /// A missing side never matches anything, including another missing side.
    pub fn matches(&self, other: &Lookup) -> bool {
        match (self, other) {
            (Lookup::Found(a), Lookup::Found(b)) => a == b,
            _ => false,
        }
    }

    pub fn id(&self) -> Option<&RecordId> {
        match self {
            Lookup::Found(id) => Some(id),
            Lookup::Missing(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Reads `data[0].id` out of a `{"data": [...]}` document.
    pub fn from_data_document(doc: &serde_json::Value) -> Self {
        let first = match doc.get("data").and_then(|d| d.as_array()) {
            Some(entries) if !entries.is_empty() => &entries[0],
            _ => return Lookup::Missing(MissingReason::EmptyData),
        };

        match first
            .get("id")
            .and_then(|id| id.as_str())
            .and_then(RecordId::new)
        {
            Some(id) => Lookup::Found(id),
            None => Lookup::Missing(MissingReason::MissingId),
        }
    }
}

/// Public attributes included with the proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofAttributes {
    pub total_score: u64,
    pub valid_data_id: bool,
}

/// Metadata written onchain alongside the proof.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofMetadata {
    pub dlp_id: u64,
}

/// The computed proof of contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProofResult {
    pub dlp_id: u64,
    pub valid: bool,
    pub score: f64,
    pub authenticity: f64,
    pub ownership: f64,
    pub uniqueness: f64,
    pub quality: f64,
    pub attributes: ProofAttributes,
    pub metadata: ProofMetadata,
}
