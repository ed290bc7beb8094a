use thiserror::Error;

/// Failures that stop a run from starting.
///
/// Nothing per-request lives here. Once the timed run is underway,
/// individual request failures are absorbed as failed outcomes and the
/// run always completes its budget.
#[derive(Debug, Error)]
pub enum RunError {
    /// The pre-run connectivity check could not reach the target at all.
    #[error("target {url} is unreachable: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The target answered the connectivity check with something other
    /// than 200, so a full run would only measure failures.
    #[error("target {url} answered the connectivity check with status {status}")]
    Preflight {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The shared HTTP client could not be built.
    #[error("failed to build the HTTP client")]
    Client(#[from] reqwest::Error),
}
