//! Safe-sequence engine: greedy first-fit Banker's safety check.
//!
//! The engine is synchronous and single-threaded. It derives every process's
//! need, then walks ranks `0..N`, admitting at each rank the lowest-indexed
//! process that has not completed and whose need fits the current
//! availability. An admitted process returns its allocation, growing the
//! availability for the next rank.
//!
//! Ties are broken by ascending index, so when several safe orders exist only
//! the first one in that ordering is produced.

use crate::error::SequenceError;
use crate::invariant_ppt::{
    assert_invariant, ADMISSION_FITS, FINAL_AVAILABLE_STAGED, NEED_DERIVED, ORDER_PERMUTATION,
    RANK_UNIQUE, SNAPSHOT_MONOTONE,
};
use crate::model::{Dataset, ProcessId, ProcessRecord, Units};
use std::time::Instant;
use tracing::{debug, info};

/// Result of a safety check.
#[derive(Debug, Clone, PartialEq)]
pub struct SafetyOutcome {
    /// True when every process was admitted.
    pub safe: bool,
    /// Admission order; only meaningful when `safe`.
    pub order: Vec<ProcessId>,
    /// How many processes were admitted before the scan stalled.
    pub admitted: usize,
    /// Availability seen at each rank that was attempted.
    pub snapshots: Vec<Vec<Units>>,
    /// Sum of allocations per resource type. Reported only; it does not seed
    /// the scan.
    pub total_allocation: Vec<Units>,
}

impl SafetyOutcome {
    /// The safe order, or `None` if the state is unsafe.
    pub fn safe_order(&self) -> Option<&[ProcessId]> {
        if self.safe {
            Some(&self.order)
        } else {
            None
        }
    }
}

/// Engine-local scan state. Never stored on a process record.
#[derive(Debug)]
struct Ledger {
    rank: usize,
    work: Vec<Units>,
    admitted: usize,
}

impl Ledger {
    fn new(initial: &[Units]) -> Self {
        Self {
            rank: 0,
            work: initial.to_vec(),
            admitted: 0,
        }
    }

    fn fits(&self, need: &[Units]) -> bool {
        need.iter().zip(&self.work).all(|(&n, &w)| n <= w)
    }

    fn release(&mut self, allocation: &[Units]) -> Result<(), SequenceError> {
        for (resource, (w, &a)) in self.work.iter_mut().zip(allocation).enumerate() {
            *w = w
                .checked_add(a)
                .ok_or(SequenceError::Overflow { resource })?;
        }
        Ok(())
    }
}

/// Compute a safe sequence over the first `resource_count` resource types.
///
/// Writes need vectors, completion flags, ranks and per-rank availability
/// snapshots onto the dataset, and stages the final availability in
/// [`Dataset::final_available`]. An unsafe state is a normal outcome with
/// `safe == false`. Errors are asking for more resource types than the
/// dataset carries, or sums that do not fit in [`Units`].
///
/// Anything a previous evaluation wrote is cleared first, so the same dataset
/// can be evaluated repeatedly. After an error the engine-written fields are
/// unspecified until the next evaluation.
pub fn compute_safe_sequence(
    dataset: &mut Dataset,
    resource_count: usize,
) -> Result<SafetyOutcome, SequenceError> {
    let width = dataset.resource_count();
    if resource_count > width {
        return Err(SequenceError::ResourceCountOutOfRange {
            requested: resource_count,
            width,
        });
    }
    dataset.reset();
    let total = dataset.len();

    let totals = total_allocation(dataset.processes(), resource_count)?;

    for record in dataset.processes_mut() {
        let need = record
            .max_claim()
            .iter()
            .zip(record.allocation())
            .enumerate()
            .map(|(resource, (&max, &alloc))| {
                max.checked_sub(alloc)
                    .ok_or(SequenceError::Overflow { resource })
            })
            .collect::<Result<Vec<Units>, _>>()?;
        record.set_need(need);
    }
    assert_invariant(
        NEED_DERIVED,
        dataset
            .processes()
            .iter()
            .all(|p| p.need().len() == p.max_claim().len().min(p.allocation().len())),
        "need derived for every process",
        Some("compute_safe_sequence"),
    );

    let mut ledger = Ledger::new(&dataset.initial_available()[..resource_count]);
    let mut order = Vec::with_capacity(total);
    let mut snapshots = Vec::with_capacity(total);

    while ledger.rank < total {
        let snapshot = ledger.work.clone();
        let candidate = dataset
            .processes()
            .iter()
            .position(|p| !p.completed() && ledger.fits(p.need()));

        let records = dataset.processes_mut();
        records[ledger.rank].set_available(snapshot.clone());
        snapshots.push(snapshot);

        let Some(index) = candidate else {
            // Availability only changes on admission, so every later rank
            // would see the same state and fail the same way.
            debug!(rank = ledger.rank, admitted = ledger.admitted, "no admissible process");
            break;
        };

        let record = &mut records[index];
        assert_invariant(
            ADMISSION_FITS,
            ledger.fits(record.need()),
            "admitted need fits availability",
            Some(record.id()),
        );
        record.admit(ledger.rank);
        debug!(
            rank = ledger.rank,
            process = record.id(),
            available = ?ledger.work,
            "admitted process"
        );

        let before = ledger.work.clone();
        ledger.release(record.allocation())?;
        assert_invariant(
            SNAPSHOT_MONOTONE,
            record.allocation().iter().any(|&a| a < 0)
                || before.iter().zip(&ledger.work).all(|(b, a)| a >= b),
            "availability never shrinks across ranks",
            Some(record.id()),
        );

        order.push(ProcessId(index));
        ledger.admitted += 1;
        ledger.rank += 1;
    }

    dataset.set_final_available(ledger.work.clone());
    assert_invariant(
        FINAL_AVAILABLE_STAGED,
        dataset.final_available().is_some(),
        "final availability staged",
        None,
    );

    let safe = ledger.admitted == total;
    if safe {
        let mut seen = vec![false; total];
        for id in &order {
            seen[id.0] = true;
        }
        assert_invariant(
            ORDER_PERMUTATION,
            order.len() == total && seen.iter().all(|&s| s),
            "safe order is a permutation of all processes",
            None,
        );
        assert_invariant(
            RANK_UNIQUE,
            order
                .iter()
                .enumerate()
                .all(|(rank, id)| dataset.processes()[id.0].sequence_position() == Some(rank)),
            "each rank held by exactly one process",
            None,
        );
    }

    info!(
        processes = total,
        resources = resource_count,
        admitted = ledger.admitted,
        safe,
        "safety check finished"
    );

    Ok(SafetyOutcome {
        safe,
        order,
        admitted: ledger.admitted,
        snapshots,
        total_allocation: totals,
    })
}

/// Run [`compute_safe_sequence`] and measure it in nanoseconds.
///
/// Only the engine call is timed.
pub fn timed_compute_safe_sequence(
    dataset: &mut Dataset,
    resource_count: usize,
) -> Result<(SafetyOutcome, u128), SequenceError> {
    let start = Instant::now();
    let outcome = compute_safe_sequence(dataset, resource_count)?;
    let elapsed = start.elapsed().as_nanos();
    Ok((outcome, elapsed))
}

fn total_allocation(
    records: &[ProcessRecord],
    resource_count: usize,
) -> Result<Vec<Units>, SequenceError> {
    let mut totals: Vec<Units> = vec![0; resource_count];
    for record in records {
        for (resource, (t, &a)) in totals.iter_mut().zip(record.allocation()).enumerate() {
            *t = t
                .checked_add(a)
                .ok_or(SequenceError::Overflow { resource })?;
        }
    }
    Ok(totals)
}
