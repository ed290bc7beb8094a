use crate::{RunError, Runner};
use volley_core::{RunConfig, RunStatistics};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Splits `config.total_requests` across `workers` isolated runners and
/// merges their statistics.
///
/// Workers share nothing. Each one builds its own connection pool,
/// admission gate and recorder, runs its slice of the budget to
/// completion, and only then do the per-worker snapshots get folded
/// together (counts summed, wall time and latency averaged). The absence
/// of shared state is the point: no cross-worker lock can show up in the
/// measured latencies.
///
/// The request budget is divided evenly, with any remainder landing on
/// the first worker. Only the first worker logs progress. With one
/// worker this is just [`Runner::run`].
pub async fn run_fleet(config: &RunConfig, workers: usize) -> Result<RunStatistics, RunError> {
    let workers = workers.max(1);
    if workers == 1 {
        let runner = Runner::new(config.clone())?;
        return Ok(runner.run().await);
    }

    let share = config.total_requests / workers as u64;
    let remainder = config.total_requests % workers as u64;
    info!(workers, share, "splitting the run across a fleet");

    // Build every runner before spawning any, so a construction failure
    // leaves no stray workers running.
    let mut runners = Vec::with_capacity(workers);
    for worker in 0..workers {
        let mut worker_config = config.clone();
        worker_config.total_requests = if worker == 0 { share + remainder } else { share };
        worker_config.show_progress = config.show_progress && worker == 0;
        runners.push(Runner::new(worker_config)?);
    }

    let handles: Vec<_> = runners
        .into_iter()
        .enumerate()
        .map(|(worker, runner)| {
            tokio::spawn(async move {
                let stats = runner.run().await;
                debug!(worker, %stats, "fleet worker finished");
                stats
            })
        })
        .collect();

    let mut per_worker = Vec::with_capacity(workers);
    for (worker, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(stats) => per_worker.push(stats),
            Err(err) => error!(worker, error = %err, "fleet worker task died"),
        }
    }

    Ok(RunStatistics::merge(&per_worker).unwrap_or_else(RunStatistics::empty))
}
