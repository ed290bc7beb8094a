use crate::RequestOutcome;
use humantime::format_duration;
use std::fmt;
use std::time::Duration;

/// Aggregate view of one finished run.
///
/// Computed exactly once, after the wall clock has stopped, from the full
/// set of recorded outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct RunStatistics {
    /// Outcomes recorded, successes and failures alike.
    pub total: u64,
    /// Outcomes where the target answered 200.
    pub successful: u64,
    /// Everything else: timeouts, refused connections, non-200s.
    pub failed: u64,
    /// Wall-clock span of the measured run, warmup excluded.
    pub wall_time: Duration,
    /// Successful requests per wall-clock second. Zero when the wall
    /// clock recorded no elapsed time.
    pub requests_per_second: f64,
    /// `None` when the run recorded no outcomes at all.
    pub latency: Option<LatencyStats>,
}

/// Latency distribution over every recorded outcome, failures included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyStats {
    pub avg: Duration,
    pub min: Duration,
    pub max: Duration,
    pub p50: Duration,
    pub p95: Duration,
    pub p99: Duration,
}

impl RunStatistics {
    /// A run that recorded nothing.
    pub fn empty() -> Self {
        Self {
            total: 0,
            successful: 0,
            failed: 0,
            wall_time: Duration::ZERO,
            requests_per_second: 0.0,
            latency: None,
        }
    }

    /// Folds a finished run's outcomes into a single snapshot.
    pub fn compute(outcomes: &[RequestOutcome], wall_time: Duration) -> Self {
        let total = outcomes.len() as u64;
        let successful = outcomes.iter().filter(|outcome| outcome.success).count() as u64;
        let failed = total - successful;

        let requests_per_second = if wall_time.is_zero() {
            0.0
        } else {
            successful as f64 / wall_time.as_secs_f64()
        };

        let mut sorted: Vec<Duration> = outcomes.iter().map(|outcome| outcome.latency).collect();
        sorted.sort_unstable();

        Self {
            total,
            successful,
            failed,
            wall_time,
            requests_per_second,
            latency: LatencyStats::from_sorted(&sorted),
        }
    }

    /// Folds per-worker snapshots from a split run into one. Counts are
    /// summed; wall time and the latency distribution are averaged across
    /// workers, since the workers ran side by side rather than back to
    /// back. `None` when `workers` is empty.
    pub fn merge(workers: &[RunStatistics]) -> Option<RunStatistics> {
        if workers.is_empty() {
            return None;
        }

        let total = workers.iter().map(|w| w.total).sum();
        let successful: u64 = workers.iter().map(|w| w.successful).sum();
        let failed = workers.iter().map(|w| w.failed).sum();

        let wall_sum: Duration = workers.iter().map(|w| w.wall_time).sum();
        let wall_time = wall_sum.div_f64(workers.len() as f64);

        let requests_per_second = if wall_time.is_zero() {
            0.0
        } else {
            successful as f64 / wall_time.as_secs_f64()
        };

        Some(RunStatistics {
            total,
            successful,
            failed,
            wall_time,
            requests_per_second,
            latency: LatencyStats::merge(workers.iter().filter_map(|w| w.latency)),
        })
    }
}

impl fmt::Display for RunStatistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total={} ok={} err={} rps={:.2} wall={}",
            self.total,
            self.successful,
            self.failed,
            self.requests_per_second,
            format_duration(self.wall_time),
        )?;
        if let Some(latency) = &self.latency {
            write!(
                f,
                " p50={:?} p95={:?} p99={:?}",
                latency.p50, latency.p95, latency.p99
            )?;
        }
        Ok(())
    }
}

impl LatencyStats {
    /// `sorted` must be ascending. Percentile indexes truncate: `n / 2`
    /// for p50, `n * 0.95` and `n * 0.99` cast down for the tails, so an
    /// even-length p50 is the upper median. `None` on an empty slice.
    fn from_sorted(sorted: &[Duration]) -> Option<Self> {
        if sorted.is_empty() {
            return None;
        }
        let n = sorted.len();
        let sum: Duration = sorted.iter().copied().sum();
        Some(Self {
            avg: sum.div_f64(n as f64),
            min: sorted[0],
            max: sorted[n - 1],
            p50: sorted[n / 2],
            p95: sorted[(n as f64 * 0.95) as usize],
            p99: sorted[(n as f64 * 0.99) as usize],
        })
    }

    fn merge(workers: impl Iterator<Item = LatencyStats>) -> Option<Self> {
        let workers: Vec<LatencyStats> = workers.collect();
        if workers.is_empty() {
            return None;
        }
        let k = workers.len() as f64;
        let mean = |field: fn(&LatencyStats) -> Duration| {
            workers.iter().map(field).sum::<Duration>().div_f64(k)
        };
        Some(Self {
            avg: mean(|w| w.avg),
            min: workers.iter().map(|w| w.min).min().unwrap_or(Duration::ZERO),
            max: workers.iter().map(|w| w.max).max().unwrap_or(Duration::ZERO),
            p50: mean(|w| w.p50),
            p95: mean(|w| w.p95),
            p99: mean(|w| w.p99),
        })
    }
}
