// ./src/output.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::OutputError;
use crate::types::ProofResult;

/// File name the platform reads the proof from.
pub const RESULTS_FILE: &str = "results.json";

/// Writes `proof` as pretty JSON to `<output_dir>/results.json`, creating the directory.
pub fn write_results(output_dir: &Path, proof: &ProofResult) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(output_dir).map_err(|source| OutputError::Io {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let path = output_dir.join(RESULTS_FILE);
    let contents = serde_json::to_string_pretty(proof)?;
    fs::write(&path, contents).map_err(|source| OutputError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}
