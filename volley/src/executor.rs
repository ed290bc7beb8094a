use crate::gate::AdmissionGate;
use reqwest::{Client, StatusCode};
use std::time::{Duration, Instant};
use volley_core::RequestOutcome;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};

/// Issues single timed GETs through a shared pooled client.
///
/// An executor never returns an error: every way a request can go wrong
/// is absorbed into a failed [`RequestOutcome`] carrying the latency
/// observed up to the point of failure. Success means exactly one thing,
/// a 200 status with the body read to the end. Any other status, a
/// timeout, or a transport fault all count as failures.
///
/// Cloning is cheap; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RequestExecutor {
    client: Client,
    url: String,
    timeout: Duration,
}

impl RequestExecutor {
    pub fn new(client: Client, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            url: url.into(),
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One gate-limited attempt. Waits for admission first; the timer
    /// starts only once the slot is held, so queueing at the gate is not
    /// billed as target latency. The slot is held until the body is fully
    /// read or the attempt fails.
    pub async fn execute(&self, gate: &AdmissionGate) -> RequestOutcome {
        let _slot = gate.admit().await;
        self.attempt().await
    }

    async fn attempt(&self) -> RequestOutcome {
        let started = Instant::now();

        let response = match self.client.get(&self.url).timeout(self.timeout).send().await {
            Ok(response) => response,
            Err(err) => {
                debug!(error = %err, "request failed in flight");
                return self.record(RequestOutcome::failed(started.elapsed()));
            }
        };

        let status = response.status();
        // Drain the body before stopping the clock; headers alone would
        // understate what a client actually waits for.
        let outcome = match response.bytes().await {
            Ok(_) if status == StatusCode::OK => RequestOutcome::ok(started.elapsed()),
            Ok(_) => {
                debug!(%status, "target answered with a non-200 status");
                RequestOutcome::failed(started.elapsed())
            }
            Err(err) => {
                debug!(error = %err, "failed reading the response body");
                RequestOutcome::failed(started.elapsed())
            }
        };
        self.record(outcome)
    }

    #[cfg(feature = "metrics")]
    fn record(&self, outcome: RequestOutcome) -> RequestOutcome {
        metrics::histogram!("volley.request.latency").record(outcome.latency.as_secs_f64());
        if outcome.success {
            metrics::counter!("volley.request.success").increment(1);
        } else {
            metrics::counter!("volley.request.error").increment(1);
        }
        outcome
    }

    #[cfg(not(feature = "metrics"))]
    fn record(&self, outcome: RequestOutcome) -> RequestOutcome {
        outcome
    }
}
