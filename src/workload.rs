//! Trait-based workloads run by execution units while they hold the lock.

#![forbid(unsafe_code)]

use std::time::Duration;

/// Plain value copy of what a unit needs from its process record.
///
/// Moved into the unit's thread so the unit never borrows the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitTicket {
    /// Rank in the safe order; also the creation order.
    pub rank: usize,
    /// Process identifier.
    pub id: String,
    /// Simulated run time in time units.
    pub run_duration: u64,
}

impl UnitTicket {
    /// Wall-clock length of the burst: `run_duration` time units, saturating.
    pub fn duration(&self, time_unit: Duration) -> Duration {
        let factor = u32::try_from(self.run_duration).unwrap_or(u32::MAX);
        time_unit.saturating_mul(factor)
    }
}

/// Work done inside the exclusion section.
pub trait Workload: Send + Sync + 'static {
    /// Simulate the process's burst. Called with the lock held.
    fn perform(&self, ticket: &UnitTicket, time_unit: Duration);
}

/// Sleeps for `run_duration * time_unit`, simulating a CPU burst.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepWorkload;

impl Workload for SleepWorkload {
    fn perform(&self, ticket: &UnitTicket, time_unit: Duration) {
        std::thread::sleep(ticket.duration(time_unit));
    }
}

impl<F> Workload for F
where
    F: Fn(&UnitTicket, Duration) + Send + Sync + 'static,
{
    fn perform(&self, ticket: &UnitTicket, time_unit: Duration) {
        self(ticket, time_unit)
    }
}
