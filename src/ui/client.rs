//! HTTP client for the Storm UI REST API.

use std::collections::{HashMap, HashSet};
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::join_all;
use serde_json::Value;
use tracing::debug;

use crate::config::EnvConfig;
use crate::error::StatsError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for one cluster UI endpoint.
///
/// Built once per invocation; every report fetch goes through it.
pub struct UiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl UiClient {
    /// Build a client for the given environment.
    pub fn new(env: &EnvConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: env.base_url(),
            token: env.token.clone(),
        })
    }

    /// GET one resource and decode its JSON body.
    ///
    /// Single-shot: connection failures, non-2xx statuses, and malformed
    /// bodies all come back as a fetch error carrying the path. No retries.
    pub async fn fetch(&self, path: &str) -> Result<Value, StatsError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| StatsError::fetch(path, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatsError::http_status(path, status.as_u16()));
        }

        response.json().await.map_err(|e| StatsError::fetch(path, e))
    }

    /// GET several resources concurrently, one request per distinct path.
    ///
    /// Each path's outcome is tracked independently; a failure on one path
    /// never aborts the batch and surfaces only when that entry is consumed.
    pub async fn fetch_many<I, S>(&self, paths: I) -> HashMap<String, Result<Value, StatsError>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let paths: Vec<String> = paths
            .into_iter()
            .map(Into::into)
            .filter(|path| seen.insert(path.clone()))
            .collect();

        let results = join_all(paths.iter().map(|path| self.fetch(path))).await;
        paths.into_iter().zip(results).collect()
    }
}

/// Take one document out of a batched fetch result.
pub fn take_doc(
    docs: &mut HashMap<String, Result<Value, StatsError>>,
    path: &str,
) -> Result<Value, StatsError> {
    match docs.remove(path) {
        Some(result) => result,
        None => Err(StatsError::DataShape(format!(
            "no fetched document for {path}"
        ))),
    }
}
