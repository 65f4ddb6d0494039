//! Execution supervisor: runs a safe order under a single exclusion lock.
//!
//! One thread is created per process, back to back in rank order. Every
//! thread contends for the same lock, so at most one unit is inside its work
//! section at any instant. Creation order follows the safe order but lock
//! acquisition order is whatever the OS scheduler produces; the safe order
//! guarantees feasibility, not fairness. A strict ordering would need a
//! per-rank ticket instead of a bare lock.

use crate::config::SimulationConfig;
use crate::error::SupervisorError;
use crate::events::{acquisition_order, drain_events, new_event_channel, UnitEvent};
use crate::invariant_ppt::{
    assert_invariant, ALL_UNITS_JOINED, UNIT_VALUE_COPY, UNSAFE_NOT_EXECUTED,
};
use crate::model::{Dataset, ProcessId};
use crate::sequence::SafetyOutcome;
use crate::workload::{SleepWorkload, UnitTicket, Workload};
use parking_lot::Mutex;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{info, warn};

/// How a single unit ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitOutcome {
    /// The unit ran and joined.
    Completed { rank: usize, id: String },
    /// The thread could not be created; the rest of the batch still ran.
    SpawnFailed {
        rank: usize,
        id: String,
        reason: String,
    },
    /// The thread terminated abnormally (its workload panicked).
    JoinFailed { rank: usize, id: String },
}

impl UnitOutcome {
    /// Rank of the unit.
    pub fn rank(&self) -> usize {
        match self {
            UnitOutcome::Completed { rank, .. }
            | UnitOutcome::SpawnFailed { rank, .. }
            | UnitOutcome::JoinFailed { rank, .. } => *rank,
        }
    }

    /// True for [`UnitOutcome::Completed`].
    pub fn is_completed(&self) -> bool {
        matches!(self, UnitOutcome::Completed { .. })
    }
}

/// What happened during one supervisor run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// One entry per unit, in rank order.
    pub outcomes: Vec<UnitOutcome>,
    /// Events in the order units emitted them while holding the lock.
    pub events: Vec<UnitEvent>,
}

impl RunReport {
    /// Ranks in the order units actually acquired the lock.
    pub fn acquisition_order(&self) -> Vec<usize> {
        acquisition_order(&self.events)
    }

    /// Number of units that ran to completion.
    pub fn completed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_completed()).count()
    }

    /// True when every unit completed.
    pub fn all_completed(&self) -> bool {
        self.outcomes.iter().all(UnitOutcome::is_completed)
    }
}

/// Runs safe orders. The lock is created per run, never stored here.
#[derive(Debug)]
pub struct Supervisor<W: Workload = SleepWorkload> {
    config: SimulationConfig,
    workload: Arc<W>,
}

impl Supervisor<SleepWorkload> {
    /// Supervisor whose units sleep for their run duration.
    pub fn new(config: SimulationConfig) -> Self {
        Self::with_workload(config, SleepWorkload)
    }
}

impl<W: Workload> Supervisor<W> {
    /// Supervisor running a custom workload inside the lock.
    pub fn with_workload(config: SimulationConfig, workload: W) -> Self {
        Self {
            config,
            workload: Arc::new(workload),
        }
    }

    /// Configuration in use.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run `outcome`'s order, refusing unsafe outcomes.
    pub fn run_outcome(
        &self,
        dataset: &Dataset,
        outcome: &SafetyOutcome,
    ) -> Result<RunReport, SupervisorError> {
        match outcome.safe_order() {
            Some(order) => self.run_safe_order(dataset, order),
            None => {
                assert_invariant(
                    UNSAFE_NOT_EXECUTED,
                    !outcome.safe,
                    "unsafe state is never executed",
                    Some("run_outcome"),
                );
                Err(SupervisorError::UnsafeState {
                    admitted: outcome.admitted,
                    total: dataset.len(),
                })
            }
        }
    }

    /// Start one unit per process in `order`, then wait for all of them.
    ///
    /// A unit that cannot be spawned or that fails to join is reported in its
    /// [`UnitOutcome`] and does not stop the rest of the batch. The caller is
    /// responsible for passing an order from a safe outcome.
    pub fn run_safe_order(
        &self,
        dataset: &Dataset,
        order: &[ProcessId],
    ) -> Result<RunReport, SupervisorError> {
        let tickets = order
            .iter()
            .enumerate()
            .map(|(rank, &pid)| {
                let record = dataset
                    .process(pid)
                    .ok_or(SupervisorError::UnknownProcess(pid.0))?;
                Ok(UnitTicket {
                    rank,
                    id: record.id().to_string(),
                    run_duration: record.run_duration(),
                })
            })
            .collect::<Result<Vec<_>, SupervisorError>>()?;
        assert_invariant(
            UNIT_VALUE_COPY,
            tickets.len() == order.len(),
            "every unit carries its own copy",
            None,
        );

        let lock = Arc::new(Mutex::new(()));
        let (tx, rx) = new_event_channel();
        let mut handles: Vec<(UnitTicket, Option<JoinHandle<()>>)> =
            Vec::with_capacity(tickets.len());
        let mut outcomes = Vec::with_capacity(tickets.len());

        for ticket in tickets {
            let unit_ticket = ticket.clone();
            let lock = Arc::clone(&lock);
            let workload = Arc::clone(&self.workload);
            let tx = tx.clone();
            let time_unit = self.config.time_unit;

            let mut builder = thread::Builder::new()
                .name(format!("{}-{}", self.config.thread_name_prefix, ticket.rank));
            if let Some(bytes) = self.config.stack_size {
                builder = builder.stack_size(bytes);
            }
            let spawned = builder.spawn(move || {
                let _guard = lock.lock();
                let duration = unit_ticket.duration(time_unit);
                info!(
                    process = %unit_ticket.id,
                    run_duration = unit_ticket.run_duration,
                    "process running"
                );
                // The receiver outlives every unit; a failed send is unreachable.
                let _ = tx.send(UnitEvent::Started {
                    rank: unit_ticket.rank,
                    id: unit_ticket.id.clone(),
                    duration,
                });
                workload.perform(&unit_ticket, time_unit);
                let _ = tx.send(UnitEvent::Finished {
                    rank: unit_ticket.rank,
                    id: unit_ticket.id.clone(),
                });
            });

            match spawned {
                Ok(handle) => {
                    info!(rank = ticket.rank, process = %ticket.id, "unit started");
                    handles.push((ticket, Some(handle)));
                }
                Err(err) => {
                    warn!(rank = ticket.rank, process = %ticket.id, error = %err, "error creating unit");
                    outcomes.push(UnitOutcome::SpawnFailed {
                        rank: ticket.rank,
                        id: ticket.id.clone(),
                        reason: err.to_string(),
                    });
                    handles.push((ticket, None));
                }
            }
        }
        drop(tx);

        for (ticket, handle) in handles {
            let Some(handle) = handle else {
                continue;
            };
            match handle.join() {
                Ok(()) => {
                    info!(rank = ticket.rank, process = %ticket.id, "unit finished running");
                    outcomes.push(UnitOutcome::Completed {
                        rank: ticket.rank,
                        id: ticket.id,
                    });
                }
                Err(_) => {
                    warn!(rank = ticket.rank, process = %ticket.id, "error joining unit");
                    outcomes.push(UnitOutcome::JoinFailed {
                        rank: ticket.rank,
                        id: ticket.id,
                    });
                }
            }
        }
        outcomes.sort_by_key(UnitOutcome::rank);
        assert_invariant(
            ALL_UNITS_JOINED,
            outcomes.len() == order.len(),
            "every unit accounted for before returning",
            None,
        );

        Ok(RunReport {
            outcomes,
            events: drain_events(&rx),
        })
    }
}
