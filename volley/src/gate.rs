use std::sync::Arc;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting gate that bounds how many requests are in flight at once.
///
/// Admission is permit-based: [`AdmissionGate::admit`] waits until fewer
/// than `limit` slots are held, and the returned [`AdmissionSlot`] gives
/// its slot back when dropped. Because release rides on `Drop`, a slot is
/// returned on every exit path, including timeouts, panics and cancelled
/// tasks, so the gate can never leak capacity.
///
/// Clones share the same underlying gate.
#[derive(Debug, Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

/// One held slot of an [`AdmissionGate`]. Dropping it readmits the next
/// waiter.
#[derive(Debug)]
pub struct AdmissionSlot {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionGate {
    /// Gate admitting at most `limit` holders at once, clamped to 1.
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Waits for a free slot and takes it. Waiters are served in FIFO
    /// order, so no request starves.
    pub async fn admit(&self) -> AdmissionSlot {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .expect("admission gate semaphore is never closed");
        AdmissionSlot { _permit: permit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slots not currently held. Debugging aid.
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}
