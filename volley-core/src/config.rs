use crate::constants::*;
use std::time::Duration;

/// Immutable description of a single benchmark run.
///
/// Values are captured once up front; nothing mutates a config while a
/// run is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    /// Target endpoint, hit with plain GETs.
    pub url: String,
    /// Total number of requests to issue.
    pub total_requests: u64,
    /// Upper bound on requests in flight at once. Always at least 1.
    pub max_concurrency: usize,
    /// Idle connections the shared client keeps per host. Always at least 1.
    pub pool_size: usize,
    /// Per-request budget from dispatch through full body read.
    pub request_timeout: Duration,
    /// Budget for establishing one TCP connection.
    pub connect_timeout: Duration,
    /// Idle lifetime of a pooled connection.
    pub pool_idle_timeout: Duration,
    /// Explicit batch size override. `None` derives one from concurrency.
    pub batch_size: Option<usize>,
    /// Whether the run logs periodic progress lines.
    pub show_progress: bool,
}

impl RunConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            total_requests: DEFAULT_TOTAL_REQUESTS,
            max_concurrency: DEFAULT_CONCURRENCY,
            pool_size: DEFAULT_POOL_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_idle_timeout: DEFAULT_POOL_IDLE_TIMEOUT,
            batch_size: None,
            show_progress: true,
        }
    }

    pub fn requests(mut self, total_requests: u64) -> Self {
        self.total_requests = total_requests;
        self
    }

    /// Clamped to 1 so the admission gate always admits.
    pub fn concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Clamped to 1 so the client always holds a connection.
    pub fn pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size.max(1);
        self
    }

    pub fn request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    pub fn connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    /// Overrides the derived batch size. Clamped to 1.
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size.max(1));
        self
    }

    pub fn progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Number of tasks spawned per batch: the explicit override if one was
    /// set, otherwise `min(1000, 2 * max_concurrency)`. Twice the gate
    /// limit keeps a queue of admitted-next tasks ready without spawning
    /// the whole run up front.
    pub fn effective_batch_size(&self) -> usize {
        self.batch_size
            .unwrap_or_else(|| MAX_BATCH_SIZE.min(self.max_concurrency.saturating_mul(2)))
    }

    /// Warmup budget: a tenth of the run, capped at
    /// [`MAX_WARMUP_REQUESTS`]. Zero for very small runs.
    pub fn warmup_requests(&self) -> u64 {
        MAX_WARMUP_REQUESTS.min(self.total_requests / 10)
    }

    /// Completed-count interval between progress lines. Never zero, so
    /// the modulo in the drain loop is always defined.
    pub fn progress_stride(&self) -> u64 {
        (self.total_requests / PROGRESS_POINTS).max(1)
    }
}
