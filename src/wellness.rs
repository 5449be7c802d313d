// ./src/wellness.rs
//! Client for the wellness API that holds the user's authoritative records.

use std::time::Duration;

use async_trait::async_trait;
use log::{info, warn};
use reqwest::{Client, StatusCode};

use crate::config::ProofConfig;
use crate::error::Result;
use crate::types::{Lookup, MissingReason};

/// A trusted source of the user's daily sleep records.
#[async_trait]
pub trait SleepSource: Send + Sync {
    /// Identifier of the first daily sleep record, or why there is none.
    ///
    /// Implementations never fail; every problem maps to `Lookup::Missing`.
    async fn first_record_id(&self) -> Lookup;
}

/// Oura v2 `usercollection/daily_sleep` over HTTPS.
#[derive(Debug, Clone)]
pub struct OuraClient {
    client: Client,
    url: String,
    api_key: String,
}

impl OuraClient {
    /// Fails only if the HTTP client cannot be built.
    pub fn new(
        url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("sleep-proof/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &ProofConfig) -> Result<Self> {
        Self::new(
            config.api_url.clone(),
            config.user_api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    async fn fetch(&self) -> std::result::Result<serde_json::Value, MissingReason> {
        let response = self
            .client
            .get(&self.url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| MissingReason::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(MissingReason::HttpStatus(status.as_u16()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| MissingReason::Malformed(e.to_string()))
    }
}

#[async_trait]
impl SleepSource for OuraClient {
    async fn first_record_id(&self) -> Lookup {
        let lookup = match self.fetch().await {
            Ok(body) => Lookup::from_data_document(&body),
            Err(reason) => Lookup::Missing(reason),
        };

        match &lookup {
            Lookup::Found(id) => info!("ID from API: {}", id),
            Lookup::Missing(reason) => warn!("No record id from API: {}", reason),
        }
        lookup
    }
}

#[cfg(test)]
#[async_trait]
impl SleepSource for Lookup {
    async fn first_record_id(&self) -> Lookup {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordId;

    #[tokio::test]
    async fn test_fixed_lookup_source() {
        let source = Lookup::Found(RecordId::new("abc").unwrap());
        assert_eq!(source.first_record_id().await, source);
    }

    #[tokio::test]
    async fn test_connection_refused_is_missing() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = OuraClient::new(
            format!("http://127.0.0.1:{}/v2/usercollection/daily_sleep", port),
            "token",
            Duration::from_secs(2),
        )
        .unwrap();
        assert!(matches!(
            client.first_record_id().await,
            Lookup::Missing(MissingReason::Transport(_))
        ));
    }

    #[test]
    fn test_from_config_builds_client() {
        let config = ProofConfig::new(1, "/input", "token")
            .with_api_url("http://localhost/x")
            .with_timeout_secs(5);
        let client = OuraClient::from_config(&config).unwrap();
        assert_eq!(client.url, "http://localhost/x");
        assert_eq!(client.api_key, "token");
    }
}
