use crate::executor::RequestExecutor;
use crate::gate::AdmissionGate;
use crate::recorder::OutcomeRecorder;
use crate::RunError;
use humantime::format_duration;
use reqwest::{Client, StatusCode};
use std::time::Instant;
use tokio::task::JoinHandle;
use volley_core::{
    RequestOutcome, RunConfig, RunStatistics, DEFAULT_CLIENT_TIMEOUT, WARMUP_CONCURRENCY,
    WARMUP_POOL_SIZE,
};
#[allow(unused)]
use tracing::{debug, error, info, instrument, trace, warn};

/// Drives one benchmark run end to end: connectivity preflight, optional
/// warmup, then the timed flood.
///
/// A runner owns its connection pool and admission gate, shares them
/// across every request task it spawns, and shares nothing with any other
/// runner.
pub struct Runner {
    config: RunConfig,
    client: Client,
    executor: RequestExecutor,
    gate: AdmissionGate,
}

impl Runner {
    /// Builds the shared pooled client and admission gate for `config`.
    pub fn new(config: RunConfig) -> Result<Self, RunError> {
        let client = pooled_client(config.pool_size, &config)?;
        let executor =
            RequestExecutor::new(client.clone(), config.url.clone(), config.request_timeout);
        let gate = AdmissionGate::new(config.max_concurrency);
        Ok(Self {
            config,
            client,
            executor,
            gate,
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// One untimed GET to confirm the target is up before a run burns
    /// its whole budget against a dead endpoint. Anything but a 200 is
    /// refused.
    pub async fn preflight(&self) -> Result<(), RunError> {
        let response = self
            .client
            .get(&self.config.url)
            .timeout(self.config.request_timeout)
            .send()
            .await
            .map_err(|source| RunError::Unreachable {
                url: self.config.url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::OK {
            debug!(url = %self.config.url, "target is responding");
            Ok(())
        } else {
            Err(RunError::Preflight {
                url: self.config.url.clone(),
                status,
            })
        }
    }

    /// Low-concurrency pre-run that primes the target's caches, pools and
    /// JIT paths. Uses a throwaway client and gate so nothing it does
    /// leaks into the measured run; outcomes are discarded.
    #[instrument(skip_all)]
    pub async fn warmup(&self) -> Result<(), RunError> {
        let requests = self.config.warmup_requests();
        if requests == 0 {
            debug!("run too small to warm up");
            return Ok(());
        }

        info!(requests, "warming up the target");
        let client = pooled_client(WARMUP_POOL_SIZE, &self.config)?;
        let executor =
            RequestExecutor::new(client, self.config.url.clone(), self.config.request_timeout);
        let gate = AdmissionGate::new(WARMUP_CONCURRENCY);

        let mut handles = Vec::with_capacity(requests as usize);
        for _ in 0..requests {
            let executor = executor.clone();
            let gate = gate.clone();
            handles.push(tokio::spawn(async move {
                executor.execute(&gate).await;
            }));
        }
        for handle in handles {
            // A failed warmup request is not worth aborting the run over.
            let _ = handle.await;
        }
        debug!("warmup complete");
        Ok(())
    }

    /// The timed run. Spawns tasks a batch at a time, drains each batch
    /// before starting the next, and folds every outcome (successes,
    /// failures, even panicked tasks) into the final statistics. By the
    /// time this returns, exactly `total_requests` outcomes have been
    /// recorded; nothing is left in flight.
    #[instrument(skip_all, fields(url = %self.config.url))]
    pub async fn run(&self) -> RunStatistics {
        let total = self.config.total_requests;
        let batch_size = self.config.effective_batch_size() as u64;
        let stride = self.config.progress_stride();

        info!(
            requests = total,
            concurrency = self.config.max_concurrency,
            pool_size = self.config.pool_size,
            batch_size,
            "starting benchmark run"
        );

        let mut recorder = OutcomeRecorder::with_capacity(total as usize);
        let mut completed: u64 = 0;
        let started = Instant::now();

        let mut remaining = total;
        while remaining > 0 {
            let batch = remaining.min(batch_size);
            let mut handles: Vec<JoinHandle<RequestOutcome>> =
                Vec::with_capacity(batch as usize);
            for _ in 0..batch {
                let executor = self.executor.clone();
                let gate = self.gate.clone();
                handles.push(tokio::spawn(async move { executor.execute(&gate).await }));
            }

            // Drain the whole batch before spawning the next, so pending
            // handles never exceed one batch.
            for handle in handles {
                let outcome = handle.await.unwrap_or_else(|err| {
                    error!(error = %err, "request task died; counting it as a failure");
                    RequestOutcome::aborted()
                });
                recorder.record(outcome);
                completed += 1;

                if self.config.show_progress && completed % stride == 0 {
                    info!(
                        "progress: {:.1}% ({completed}/{total})",
                        completed as f64 / total as f64 * 100.0
                    );
                }
            }
            remaining -= batch;
        }

        let wall_time = started.elapsed();
        let stats = recorder.finalize(wall_time);
        info!(elapsed = %format_duration(wall_time), %stats, "benchmark run complete");
        stats
    }

    /// Preflight, optional warmup, then the timed run.
    pub async fn run_to_completion(&self, warmup: bool) -> Result<RunStatistics, RunError> {
        self.preflight().await?;
        if warmup {
            self.warmup().await?;
        }
        Ok(self.run().await)
    }
}

/// Client with a bounded keep-alive pool. Idle connections survive
/// between requests so repeated hits reuse sockets instead of paying a
/// fresh handshake each time.
fn pooled_client(pool_size: usize, config: &RunConfig) -> Result<Client, RunError> {
    let client = Client::builder()
        .pool_max_idle_per_host(pool_size)
        .pool_idle_timeout(config.pool_idle_timeout)
        .connect_timeout(config.connect_timeout)
        .timeout(DEFAULT_CLIENT_TIMEOUT)
        .build()?;
    Ok(client)
}
