// ./src/proof.rs
//! Proof generation: local submission vs. the wellness API.

use log::{info, warn};

use crate::config::ProofConfig;
use crate::error::Result;
use crate::scoring::{Evidence, Scorer};
use crate::submission::{self, ExtractorRegistry, DAILY_SLEEP_FILE};
use crate::types::{Lookup, ProofAttributes, ProofMetadata, ProofResult};
use crate::wellness::{OuraClient, SleepSource};

/// Verifies that a submitted daily sleep record belongs to the user.
pub struct ProofGenerator<S> {
    source: S,
    registry: ExtractorRegistry,
    scorer: Scorer,
}

impl ProofGenerator<OuraClient> {
    /// A generator that checks against the Oura API configured in `config`.
    pub fn from_config(config: &ProofConfig) -> Result<Self> {
        Ok(Self::new(OuraClient::from_config(config)?))
    }
}

impl<S: SleepSource> ProofGenerator<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            registry: ExtractorRegistry::default(),
            scorer: Scorer::default(),
        }
    }

    pub fn with_registry(mut self, registry: ExtractorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_scorer(mut self, scorer: Scorer) -> Self {
        self.scorer = scorer;
        self
    }

    /// Runs one proof over `config.input_dir`.
    ///
    /// Fails only if the input directory cannot be listed. Missing, empty or
    /// malformed submissions and API failures all score zero ownership.
    pub async fn generate(&self, config: &ProofConfig) -> Result<ProofResult> {
        info!("Starting proof generation for dlp {}", config.dlp_id);

        let scan = submission::scan(&config.input_dir, &self.registry)?;
        let local = scan.lookup(DAILY_SLEEP_FILE);
        if let Lookup::Missing(reason) = &local {
            warn!("No local record id: {}", reason);
        }

        let remote = self.source.first_record_id().await;

        let valid_data_id = local.matches(&remote);
        info!(
            "Comparing data ids: local={:?} remote={:?} match={}",
            local.id().map(|id| id.as_str()),
            remote.id().map(|id| id.as_str()),
            valid_data_id
        );

        let evidence = Evidence {
            valid_data_id,
            total_score: 0,
        };
        let scores = self.scorer.score(&evidence);

        Ok(ProofResult {
            dlp_id: config.dlp_id,
            valid: valid_data_id,
            score: scores.score,
            authenticity: scores.authenticity,
            ownership: scores.ownership,
            uniqueness: scores.uniqueness,
            quality: scores.quality,
            attributes: ProofAttributes {
                total_score: evidence.total_score,
                valid_data_id,
            },
            metadata: ProofMetadata {
                dlp_id: config.dlp_id,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreDimension;
    use crate::submission::RecordExtractor;
    use crate::types::{MissingReason, RecordId};
    use std::fs;
    use tempfile::tempdir;

    struct ActivityExtractor;

    impl RecordExtractor for ActivityExtractor {
        fn file_name(&self) -> &str {
            "activity.json"
        }

        fn extract(&self, document: &serde_json::Value) -> Lookup {
            Lookup::from_data_document(document)
        }
    }

    struct QuarterQuality;

    impl ScoreDimension for QuarterQuality {
        fn name(&self) -> &'static str {
            "quality"
        }

        fn score(&self, _evidence: &Evidence) -> f64 {
            0.25
        }
    }

    fn found(id: &str) -> Lookup {
        Lookup::Found(RecordId::new(id).unwrap())
    }

    fn config_for(dir: &std::path::Path) -> ProofConfig {
        ProofConfig::new(1234, dir, "token")
    }

    fn write_sleep(dir: &std::path::Path, body: &str) {
        fs::write(dir.join(DAILY_SLEEP_FILE), body).unwrap();
    }

    #[tokio::test]
    async fn test_matching_ids() {
        let dir = tempdir().unwrap();
        write_sleep(dir.path(), r#"{"data": [{"id": "abc"}]}"#);

        let proof = ProofGenerator::new(found("abc"))
            .generate(&config_for(dir.path()))
            .await
            .unwrap();

        assert!(proof.valid);
        assert_eq!(proof.ownership, 1.0);
        assert_eq!(proof.quality, 1.0);
        assert_eq!(proof.score, 1.0);
        assert!(proof.attributes.valid_data_id);
        assert_eq!(proof.attributes.total_score, 0);
        assert_eq!(proof.metadata.dlp_id, 1234);
        assert_eq!(proof.dlp_id, 1234);
    }

    #[tokio::test]
    async fn test_mismatched_ids() {
        let dir = tempdir().unwrap();
        write_sleep(dir.path(), r#"{"data": [{"id": "abc"}]}"#);

        let proof = ProofGenerator::new(found("xyz"))
            .generate(&config_for(dir.path()))
            .await
            .unwrap();

        assert!(!proof.valid);
        assert_eq!(proof.ownership, 0.0);
        assert_eq!(proof.score, 0.6);
    }

    #[tokio::test]
    async fn test_both_missing_is_invalid() {
        let dir = tempdir().unwrap();

        let proof = ProofGenerator::new(Lookup::Missing(MissingReason::HttpStatus(500)))
            .generate(&config_for(dir.path()))
            .await
            .unwrap();

        assert!(!proof.valid);
        assert_eq!(proof.ownership, 0.0);
        assert!(!proof.attributes.valid_data_id);
    }

    #[tokio::test]
    async fn test_empty_data_is_invalid() {
        let dir = tempdir().unwrap();
        write_sleep(dir.path(), r#"{"data": []}"#);

        let proof = ProofGenerator::new(found("abc"))
            .generate(&config_for(dir.path()))
            .await
            .unwrap();

        assert!(!proof.valid);
        assert_eq!(proof.ownership, 0.0);
    }

    #[tokio::test]
    async fn test_malformed_submission_is_invalid() {
        let dir = tempdir().unwrap();
        write_sleep(dir.path(), "{\"data\": [");

        let proof = ProofGenerator::new(found("abc"))
            .generate(&config_for(dir.path()))
            .await
            .unwrap();

        assert!(!proof.valid);
        assert_eq!(proof.score, 0.6);
    }

    #[tokio::test]
    async fn test_unreadable_input_dir_fails() {
        let dir = tempdir().unwrap();
        let config = config_for(&dir.path().join("missing"));

        let result = ProofGenerator::new(found("abc")).generate(&config).await;
        assert!(matches!(result, Err(crate::error::Error::Submission(_))));
    }

    #[tokio::test]
    async fn test_score_invariant() {
        let dir = tempdir().unwrap();
        write_sleep(dir.path(), r#"{"data": [{"id": "abc"}]}"#);
        let config = config_for(dir.path());

        for remote in [
            found("abc"),
            found("xyz"),
            Lookup::Missing(MissingReason::Transport("refused".to_string())),
        ] {
            let proof = ProofGenerator::new(remote).generate(&config).await.unwrap();
            assert_eq!(proof.score, 0.6 * proof.quality + 0.4 * proof.ownership);
            assert_eq!(proof.valid, proof.ownership == 1.0);
            assert_eq!(proof.valid, proof.attributes.valid_data_id);
        }
    }

    #[tokio::test]
    async fn test_empty_registry_ignores_submission() {
        let dir = tempdir().unwrap();
        write_sleep(dir.path(), r#"{"data": [{"id": "abc"}]}"#);

        let proof = ProofGenerator::new(found("abc"))
            .with_registry(ExtractorRegistry::empty())
            .generate(&config_for(dir.path()))
            .await
            .unwrap();

        assert!(!proof.valid);
        assert_eq!(proof.ownership, 0.0);
        assert_eq!(proof.score, 0.6);
    }

    #[tokio::test]
    async fn test_extra_extractor_does_not_decide_ownership() {
        let dir = tempdir().unwrap();
        write_sleep(dir.path(), r#"{"data": [{"id": "abc"}]}"#);
        fs::write(
            dir.path().join("activity.json"),
            r#"{"data": [{"id": "xyz"}]}"#,
        )
        .unwrap();

        let mut registry = ExtractorRegistry::default();
        registry.register(ActivityExtractor);
        let proof = ProofGenerator::new(found("abc"))
            .with_registry(registry)
            .generate(&config_for(dir.path()))
            .await
            .unwrap();
        assert!(proof.valid);

        let mut registry = ExtractorRegistry::default();
        registry.register(ActivityExtractor);
        let proof = ProofGenerator::new(found("xyz"))
            .with_registry(registry)
            .generate(&config_for(dir.path()))
            .await
            .unwrap();
        assert!(!proof.valid);
        assert_eq!(proof.ownership, 0.0);
    }

    #[tokio::test]
    async fn test_custom_quality_strategy() {
        let dir = tempdir().unwrap();
        write_sleep(dir.path(), r#"{"data": [{"id": "abc"}]}"#);

        let proof = ProofGenerator::new(found("abc"))
            .with_scorer(Scorer::default().with_quality(QuarterQuality))
            .generate(&config_for(dir.path()))
            .await
            .unwrap();

        assert!(proof.valid);
        assert_eq!(proof.quality, 0.25);
        assert_eq!(proof.ownership, 1.0);
        assert_eq!(proof.score, 0.6 * 0.25 + 0.4 * 1.0);
    }
}
