//! Deadlock-avoidance simulator.
//!
//! Build a [`Dataset`], ask [`compute_safe_sequence`] whether every process
//! can finish, and if it can, hand the order to a [`Supervisor`] that runs
//! one thread per process under a single exclusion lock.

pub mod builder;
pub mod config;
pub mod error;
pub mod events;
#[doc(hidden)]
pub mod invariant_ppt;
pub mod menu;
pub mod model;
pub mod presets;
pub mod report;
pub mod sequence;
pub mod supervisor;
pub mod workload;

pub use builder::DatasetBuilder;
pub use config::SimulationConfig;
pub use error::{MenuError, ModelError, SequenceError, SupervisorError};
pub use model::{Dataset, ProcessId, ProcessRecord, Units};
pub use presets::{select_dataset, DatasetSize};
pub use report::MatrixReport;
pub use sequence::{compute_safe_sequence, timed_compute_safe_sequence, SafetyOutcome};
pub use supervisor::{RunReport, Supervisor, UnitOutcome};
pub use workload::{SleepWorkload, UnitTicket, Workload};
