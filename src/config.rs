// ./src/config.rs

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Oura daily sleep collection endpoint.
pub const DAILY_SLEEP_URL: &str = "https://api.ouraring.com/v2/usercollection/daily_sleep";

/// Directory the proof task reads submissions from when nothing else is set.
pub const DEFAULT_INPUT_DIR: &str = "/input";

/// Directory `results.json` is written to when nothing else is set.
pub const DEFAULT_OUTPUT_DIR: &str = "/output";

fn default_api_url() -> String {
    DAILY_SLEEP_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

/// Everything one proof run needs.
#[derive(Clone, Serialize, Deserialize)]
pub struct ProofConfig {
    pub dlp_id: u64,
    pub input_dir: PathBuf,
    pub user_api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

// The API key stays out of logs.
impl std::fmt::Debug for ProofConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofConfig")
            .field("dlp_id", &self.dlp_id)
            .field("input_dir", &self.input_dir)
            .field("user_api_key", &"<redacted>")
            .field("api_url", &self.api_url)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

impl ProofConfig {
    /// Creates a config pointing at the Oura API with the default timeout.
    pub fn new(dlp_id: u64, input_dir: impl Into<PathBuf>, user_api_key: impl Into<String>) -> Self {
        Self {
            dlp_id,
            input_dir: input_dir.into(),
            user_api_key: user_api_key.into(),
            api_url: default_api_url(),
            request_timeout_secs: default_timeout(),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    /// Builds a config from a TOML file (if given) with `vars` layered on top.
    ///
    /// `vars` is looked up by environment variable name; [`ProofConfig::from_env`]
    /// passes the process environment, tests pass a closure over a map.
    pub fn load<F>(file: Option<&Path>, vars: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_config = match file {
            Some(path) => FileConfig::read(path)?,
            None => FileConfig::default(),
        };

        let dlp_id = match vars("DLP_ID") {
            Some(raw) => parse_u64("dlp_id", &raw)?,
            None => file_config.dlp_id.ok_or(ConfigError::Missing("dlp_id"))?,
        };

        let user_api_key = vars("USER_API_KEY")
            .or(file_config.user_api_key)
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("user_api_key"))?;

        let input_dir = vars("INPUT_DIR")
            .map(PathBuf::from)
            .or(file_config.input_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));

        let api_url = vars("OURA_API_URL")
            .or(file_config.api_url)
            .unwrap_or_else(default_api_url);

        let request_timeout_secs = match vars("REQUEST_TIMEOUT_SECS") {
            Some(raw) => parse_u64("request_timeout_secs", &raw)?,
            None => file_config.request_timeout_secs.unwrap_or_else(default_timeout),
        };
        if request_timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                option: "request_timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(Self {
            dlp_id,
            input_dir,
            user_api_key,
            api_url,
            request_timeout_secs,
        })
    }

    /// Loads from `PROOF_CONFIG` (when set) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let file = env::var("PROOF_CONFIG").ok().map(PathBuf::from);
        Self::load(file.as_deref(), |key| env::var(key).ok())
    }
}

fn parse_u64(option: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::Invalid {
        option,
        reason: format!("{:?}: {}", raw, e),
    })
}

/// Optional settings as they appear in a TOML config file.
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    dlp_id: Option<u64>,
    input_dir: Option<PathBuf>,
    user_api_key: Option<String>,
    api_url: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl FileConfig {
    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// Where the binary writes `results.json`.
pub fn output_dir<F>(vars: F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    vars("OUTPUT_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
}
