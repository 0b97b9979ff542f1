//! Custom error types for stormstat.

use thiserror::Error;

/// Errors that can occur while building a stats report.
///
/// All of these are fatal to the invocation; none are retried.
#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Fetch failed for {path}: {reason}")]
    Fetch {
        path: String,
        reason: String,
        status: Option<u16>,
    },

    #[error("Topology not found: {0}")]
    TopologyNotFound(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Storm {found} does not support this command (minimum {minimum})")]
    VersionUnsupported { found: String, minimum: String },

    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    #[error("Unexpected response shape: {0}")]
    DataShape(String),

    #[error("Environment not found in config: {0}")]
    EnvNotFound(String),
}

impl StatsError {
    /// Fetch error from a transport or decode failure on a path.
    pub fn fetch<E: std::fmt::Display>(path: &str, err: E) -> Self {
        StatsError::Fetch {
            path: path.to_string(),
            reason: err.to_string(),
            status: None,
        }
    }

    /// Fetch error from a non-2xx HTTP status on a path.
    pub fn http_status(path: &str, status: u16) -> Self {
        StatsError::Fetch {
            path: path.to_string(),
            reason: format!("HTTP {status}"),
            status: Some(status),
        }
    }

    /// Whether this is an HTTP 404 on some path.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StatsError::Fetch {
                status: Some(404),
                ..
            }
        )
    }
}
