// File: src/submission/mod.rs
//! Reading the user's submitted files.
//!
//! The input directory is scanned non-recursively for `.json` files (any
//! case). Files named in the [`ExtractorRegistry`] are parsed and reduced to a
//! [`Lookup`]; anything else is skipped.

pub mod extractor;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::error::SubmissionError;
use crate::types::{Lookup, MissingReason};
pub use extractor::{DailySleepExtractor, ExtractorRegistry, RecordExtractor, DAILY_SLEEP_FILE};

/// What a scan of the input directory found.
#[derive(Debug, Default)]
pub struct SubmissionScan {
    lookups: HashMap<String, Lookup>,
    skipped: Vec<String>,
}

impl SubmissionScan {
    /// Lookup for a recognized file, `Missing(NoSubmission)` if it was not submitted.
    pub fn lookup(&self, file_name: &str) -> Lookup {
        self.lookups
            .get(file_name)
            .cloned()
            .unwrap_or(Lookup::Missing(MissingReason::NoSubmission))
    }

    /// JSON files that no extractor recognized.
    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn recognized_count(&self) -> usize {
        self.lookups.len()
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

/// Regular `.json` files directly inside `dir`, sorted by file name.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, SubmissionError> {
    let entries = fs::read_dir(dir).map_err(|source| SubmissionError::UnreadableDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {:?}: {}", dir, e);
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && is_json(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Fails when `dir` cannot be listed or contains nothing.
pub fn ensure_not_empty(dir: &Path) -> Result<(), SubmissionError> {
    let mut entries = fs::read_dir(dir).map_err(|source| SubmissionError::UnreadableDir {
        path: dir.to_path_buf(),
        source,
    })?;
    if entries.next().is_none() {
        return Err(SubmissionError::Empty(dir.to_path_buf()));
    }
    Ok(())
}

fn read_document(path: &Path) -> Result<serde_json::Value, String> {
    let contents = fs::read_to_string(path).map_err(|e| e.to_string())?;
    serde_json::from_str(&contents).map_err(|e| e.to_string())
}

/// Scans `dir` and runs each recognized file through its extractor.
///
/// A recognized file that cannot be read or parsed yields
/// `Missing(Malformed)` instead of failing the scan.
pub fn scan(dir: &Path, registry: &ExtractorRegistry) -> Result<SubmissionScan, SubmissionError> {
    let mut result = SubmissionScan::default();

    for path in list_json_files(dir)? {
        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => {
                debug!("Ignoring submission file with non UTF-8 name {:?}", path);
                continue;
            }
        };

        let extractor = match registry.get(&file_name) {
            Some(extractor) => extractor,
            None => {
                debug!("Ignoring unrecognized submission file {}", file_name);
                result.skipped.push(file_name);
                continue;
            }
        };

        let lookup = match read_document(&path) {
            Ok(document) => extractor.extract(&document),
            Err(e) => Lookup::Missing(MissingReason::Malformed(e)),
        };

        match &lookup {
            Lookup::Found(id) => info!("ID from {}: {}", file_name, id),
            Lookup::Missing(reason) => warn!("No record id in {}: {}", file_name, reason),
        }
        result.lookups.insert(file_name, lookup);
    }

    Ok(result)
}
