#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

pub mod executor;
pub mod fleet;
pub mod gate;
pub mod recorder;
pub mod runner;

mod error;

pub use error::RunError;
pub use fleet::run_fleet;
pub use runner::Runner;

pub mod prelude {
    pub use crate::executor::RequestExecutor;
    pub use crate::fleet::run_fleet;
    pub use crate::gate::AdmissionGate;
    pub use crate::recorder::OutcomeRecorder;
    pub use crate::runner::Runner;
    pub use crate::RunError;
    pub use volley_core::{LatencyStats, RequestOutcome, RunConfig, RunStatistics};
}
