use std::time::Duration;

/// Endpoint the CLI drives when no target is given. Matches the bundled
/// ping server's bind address.
pub const DEFAULT_TARGET_URL: &str = "http://localhost:8000/ping";

/// Total number of requests issued by a default run.
pub const DEFAULT_TOTAL_REQUESTS: u64 = 10_000;

/// Upper bound on requests in flight at any instant.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Idle connections kept per host by the shared client.
pub const DEFAULT_POOL_SIZE: usize = 100;

/// Budget for a single request, covering connect through full body read.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Budget for establishing a single TCP connection.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client-wide ceiling applied on top of the per-request budget.
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// How long an idle pooled connection survives before being dropped.
pub const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(60);

/// Largest batch of tasks spawned before draining, whatever the
/// configured concurrency.
pub const MAX_BATCH_SIZE: usize = 1_000;

/// In-flight bound used while warming the target up.
pub const WARMUP_CONCURRENCY: usize = 10;

/// Pool size of the throwaway warmup client.
pub const WARMUP_POOL_SIZE: usize = 20;

/// Warmup never issues more requests than this.
pub const MAX_WARMUP_REQUESTS: u64 = 100;

/// Progress is reported roughly this many times over a run.
pub const PROGRESS_POINTS: u64 = 20;
