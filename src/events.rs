//! Unit event types for execution unit → supervisor reporting.
//!
//! Units signal facts over a channel; the supervisor drains and judges them
//! after every unit has joined. Each unit owns its own `Sender` clone, so no
//! mutable state besides the exclusion lock is shared between units.

use crossbeam_channel::{Receiver, Sender};
use std::time::Duration;

/// Creates a new event channel pair.
///
/// Returns (sender cloned into each unit, receiver for the supervisor).
pub fn new_event_channel() -> (Sender<UnitEvent>, Receiver<UnitEvent>) {
    crossbeam_channel::unbounded()
}

/// Events emitted by an execution unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitEvent {
    /// The unit acquired the lock and is about to work.
    Started {
        rank: usize,
        id: String,
        /// Wall-clock time the unit will work for.
        duration: Duration,
    },

    /// The unit finished its work and is about to release the lock.
    Finished { rank: usize, id: String },
}

impl UnitEvent {
    /// Rank of the emitting unit.
    pub fn rank(&self) -> usize {
        match self {
            UnitEvent::Started { rank, .. } | UnitEvent::Finished { rank, .. } => *rank,
        }
    }
}

/// Drains all pending events.
pub fn drain_events(rx: &Receiver<UnitEvent>) -> Vec<UnitEvent> {
    rx.try_iter().collect()
}

/// Ranks in the order units acquired the lock.
pub fn acquisition_order(events: &[UnitEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            UnitEvent::Started { rank, .. } => Some(*rank),
            UnitEvent::Finished { .. } => None,
        })
        .collect()
}

/// True when every `Started` is followed by its own `Finished` before the
/// next `Started`, i.e. work sections never interleaved.
pub fn is_serialized(events: &[UnitEvent]) -> bool {
    let mut open: Option<usize> = None;
    for event in events {
        match (event, open) {
            (UnitEvent::Started { rank, .. }, None) => open = Some(*rank),
            (UnitEvent::Finished { rank, .. }, Some(current)) if *rank == current => open = None,
            _ => return false,
        }
    }
    open.is_none()
}
