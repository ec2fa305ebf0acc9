//! Remote query execution.
//!
//! One HTTP round-trip per call against the hosted query service: no retry,
//! no caching, no local timeout beyond whatever the service and transport
//! enforce. Rejections come back verbatim in the error.

use reqwest::StatusCode;
use serde::Serialize;
use url::Url;

use crate::config::Credentials;
use crate::query::{Query, QueryParam};
use crate::table::ResultSet;

#[derive(Clone)]
pub struct QueryClient {
    http: reqwest::Client,
    endpoint: Url,
    token: String,
    project_id: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum ExecutorError {
    #[error("invalid SUI_QUERY_URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("authentication rejected ({status}): {message}")]
    AuthRejected { status: u16, message: String },
    #[error("query quota exceeded: {message}")]
    QuotaExceeded { message: String },
    #[error("query rejected ({status}): {message}")]
    QueryRejected { status: u16, message: String },
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed response from query service: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

#[derive(Serialize)]
struct QueryRequest<'a> {
    query: &'a str,
    parameters: &'a [QueryParam],
    #[serde(rename = "projectId", skip_serializing_if = "Option::is_none")]
    project_id: Option<&'a str>,
}

impl QueryClient {
    /// Acquires the session context once; it lives until the client is
    /// dropped.
    pub fn new(base_url: &str, credentials: &Credentials) -> Result<Self, ExecutorError> {
        let endpoint = Url::parse(&format!("{}/query", base_url.trim_end_matches('/')))?;
        let http = reqwest::Client::builder().no_proxy().build()?;
        Ok(Self {
            http,
            endpoint,
            token: credentials.token.clone(),
            project_id: credentials.project_id.clone(),
        })
    }

    /// Submits one query and returns the columnar result set.
    pub async fn execute(&self, query: &Query) -> Result<ResultSet, ExecutorError> {
        let body = QueryRequest {
            query: &query.sql,
            parameters: &query.params,
            project_id: self.project_id.as_deref(),
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(rejection(status, message));
        }

        let raw = response.bytes().await?;
        serde_json::from_slice(&raw).map_err(ExecutorError::MalformedResponse)
    }
}

fn rejection(status: StatusCode, message: String) -> ExecutorError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ExecutorError::AuthRejected {
            status: status.as_u16(),
            message,
        },
        StatusCode::TOO_MANY_REQUESTS => ExecutorError::QuotaExceeded { message },
        _ => ExecutorError::QueryRejected {
            status: status.as_u16(),
            message,
        },
    }
}
