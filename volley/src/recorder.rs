use std::time::Duration;
use volley_core::{RequestOutcome, RunStatistics};

/// Accumulates per-request outcomes for one run, in completion order.
///
/// The recorder is deliberately dumb while the clock is running: `record`
/// is a push onto a preallocated vec, and every derived number waits for
/// [`OutcomeRecorder::finalize`]. Keeping aggregation out of the hot path
/// means recording never perturbs the latencies being measured.
///
/// Exclusive `&mut` access is the synchronization story. The drain loop
/// in the runner is the only writer, so no lock is needed.
#[derive(Debug, Default)]
pub struct OutcomeRecorder {
    outcomes: Vec<RequestOutcome>,
}

impl OutcomeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder with room for `total` outcomes, so a fixed-budget run
    /// never reallocates mid-measurement.
    pub fn with_capacity(total: usize) -> Self {
        Self {
            outcomes: Vec::with_capacity(total),
        }
    }

    pub fn record(&mut self, outcome: RequestOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Consumes the recorder and folds everything into one snapshot.
    /// Taking `self` by value enforces the ordering: statistics exist
    /// only after recording has stopped, and a recorder cannot be reused
    /// across runs.
    pub fn finalize(self, wall_time: Duration) -> RunStatistics {
        RunStatistics::compute(&self.outcomes, wall_time)
    }
}
