// ./src/lib.rs

pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod proof;
pub mod scoring;
pub mod submission;
pub mod types;
pub mod wellness;

pub use config::ProofConfig;
pub use error::{Error, Result};
pub use proof::ProofGenerator;
pub use submission::{ExtractorRegistry, RecordExtractor};
pub use types::{Lookup, ProofResult, RecordId};
pub use wellness::{OuraClient, SleepSource};
