use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

pub const DEFAULT_DATASET: &str = "bigquery-public-data.crypto_sui_mainnet_us";
const DEFAULT_CREDENTIALS_PATH: &str = "config/credentials.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub query_url: String,
    pub dataset_id: String,
    pub credentials: Credentials,
}

/// Opaque bootstrap input for the remote query service session.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub token: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("missing SUI_QUERY_URL env var")]
    MissingQueryUrl,
    #[error("failed to read credentials file {path}: {source}")]
    CredentialsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed credentials file {path}: {source}")]
    CredentialsMalformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let query_url = env::var("SUI_QUERY_URL").map_err(|_| ConfigError::MissingQueryUrl)?;
        let dataset_id =
            env::var("SUI_DATASET").unwrap_or_else(|_| DEFAULT_DATASET.to_string());

        let credentials_path = env::var("SUI_QUERY_CREDENTIALS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CREDENTIALS_PATH));
        let credentials = load_credentials(credentials_path)?;

        Ok(Self {
            query_url,
            dataset_id,
            credentials,
        })
    }
}

fn load_credentials(path: PathBuf) -> Result<Credentials, ConfigError> {
    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::CredentialsUnreadable {
        path: path.clone(),
        source,
    })?;
    serde_json::from_str(&raw)
        .map_err(|source| ConfigError::CredentialsMalformed { path, source })
}
