// File: src/submission/extractor.rs

use std::collections::HashMap;

use crate::types::Lookup;

/// File name of the daily sleep export submitted by the user.
pub const DAILY_SLEEP_FILE: &str = "daily_sleep.json";

/// Pulls a record identifier out of one recognized submission file.
pub trait RecordExtractor: Send + Sync {
    /// Exact file name this extractor handles.
    fn file_name(&self) -> &str;

    fn extract(&self, document: &serde_json::Value) -> Lookup;
}

/// `daily_sleep.json`: `{"data": [{"id": ..}, ..]}`, id of the first entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct DailySleepExtractor;

impl RecordExtractor for DailySleepExtractor {
    fn file_name(&self) -> &str {
        DAILY_SLEEP_FILE
    }

    fn extract(&self, document: &serde_json::Value) -> Lookup {
        Lookup::from_data_document(document)
    }
}

/// Maps recognized file names to their extractors.
pub struct ExtractorRegistry {
    extractors: HashMap<String, Box<dyn RecordExtractor>>,
}

impl ExtractorRegistry {
    /// A registry that recognizes nothing.
    pub fn empty() -> Self {
        Self {
            extractors: HashMap::new(),
        }
    }

    /// Adds an extractor, replacing any previous one for the same file name.
    pub fn register(&mut self, extractor: impl RecordExtractor + 'static) -> &mut Self {
        self.extractors
            .insert(extractor.file_name().to_string(), Box::new(extractor));
        self
    }

    pub fn get(&self, file_name: &str) -> Option<&dyn RecordExtractor> {
        self.extractors.get(file_name).map(|e| e.as_ref())
    }

    pub fn recognizes(&self, file_name: &str) -> bool {
        self.extractors.contains_key(file_name)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.extractors.keys().map(String::as_str)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(DailySleepExtractor);
        registry
    }
}
