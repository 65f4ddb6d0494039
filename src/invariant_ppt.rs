//! Recorded runtime checks for the safety engine and the supervisor.
//!
//! Every call to `assert_invariant` panics when its condition is false and,
//! with the `ppt` feature on, records the invariant id. Integration tests then
//! call `contract_test` to confirm that a run of the engine or the supervisor
//! actually passed through the checks they rely on.

#[cfg(feature = "ppt")]
use lazy_static::lazy_static;
#[cfg(feature = "ppt")]
use std::collections::HashSet;
#[cfg(feature = "ppt")]
use std::sync::Mutex;

/// Every need equals claim minus allocation over the evaluated resource types.
pub const NEED_DERIVED: u32 = 1;
/// An admitted process's need fits the availability at its rank.
pub const ADMISSION_FITS: u32 = 2;
/// Releasing a non-negative allocation never shrinks availability.
pub const SNAPSHOT_MONOTONE: u32 = 3;
/// A safe order names every process exactly once.
pub const ORDER_PERMUTATION: u32 = 4;
/// No two admitted processes share a rank.
pub const RANK_UNIQUE: u32 = 5;
/// Final availability is recorded once the scan stops.
pub const FINAL_AVAILABLE_STAGED: u32 = 6;
/// The supervisor refuses outcomes without a safe order.
pub const UNSAFE_NOT_EXECUTED: u32 = 7;
/// Each unit receives its own copy of the process data it runs.
pub const UNIT_VALUE_COPY: u32 = 8;
/// Every unit is spawned-and-joined or reported before a run returns.
pub const ALL_UNITS_JOINED: u32 = 9;

#[cfg(feature = "ppt")]
lazy_static! {
    static ref INVARIANT_LOG: Mutex<HashSet<u32>> = Mutex::new(HashSet::new());
}

#[cfg(feature = "ppt")]
/// Panic with the invariant id when `condition` is false; record it otherwise.
pub(crate) fn assert_invariant(id: u32, condition: bool, message: &str, context: Option<&str>) {
    if !condition {
        let full_message = if let Some(ctx) = context {
            format!("Invariant {} failed: {} (context: {})", id, message, ctx)
        } else {
            format!("Invariant {} failed: {}", id, message)
        };
        tracing::error!(invariant = id, "{}", full_message);
        panic!("{}", full_message);
    }
    // Poisoned only if a failing check elsewhere panicked mid-insert.
    INVARIANT_LOG
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .insert(id);
}

#[cfg(not(feature = "ppt"))]
/// Panic when `condition` is false.
pub(crate) fn assert_invariant(id: u32, condition: bool, message: &str, _context: Option<&str>) {
    if !condition {
        panic!("Invariant {} failed: {}", id, message);
    }
}

#[cfg(feature = "ppt")]
/// Panic unless every id in `required_invariants` has been recorded.
pub fn contract_test(test_name: &str, required_invariants: &[u32]) {
    let log = INVARIANT_LOG
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let mut missing = Vec::new();
    for &inv in required_invariants {
        if !log.contains(&inv) {
            missing.push(inv);
        }
    }
    drop(log);
    if !missing.is_empty() {
        panic!(
            "Contract test '{}' failed: invariants not enforced: {:?}",
            test_name, missing
        );
    }
}

#[cfg(not(feature = "ppt"))]
/// Nothing is recorded without the `ppt` feature.
pub fn contract_test(_test_name: &str, _required_invariants: &[u32]) {}

#[cfg(feature = "ppt")]
/// Forget every recorded invariant id.
pub fn clear_invariant_log() {
    INVARIANT_LOG
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clear();
}

#[cfg(not(feature = "ppt"))]
/// Nothing is recorded without the `ppt` feature.
pub fn clear_invariant_log() {}
