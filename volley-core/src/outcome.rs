use std::time::Duration;

/// What came back from one request attempt: how long it took, and whether
/// the target answered 200 with a readable body.
///
/// Failures are data, not errors. A timeout, a refused connection or a 500
/// all land here with `success == false` and their observed latency, and
/// count toward the run's totals like any other outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    pub latency: Duration,
    pub success: bool,
}

impl RequestOutcome {
    pub fn ok(latency: Duration) -> Self {
        Self {
            latency,
            success: true,
        }
    }

    pub fn failed(latency: Duration) -> Self {
        Self {
            latency,
            success: false,
        }
    }

    /// Stand-in for an attempt that died before its timer started, such as
    /// a panicked task. Records zero latency so the attempt still counts.
    pub fn aborted() -> Self {
        Self {
            latency: Duration::ZERO,
            success: false,
        }
    }
}
