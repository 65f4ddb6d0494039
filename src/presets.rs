//! Preset datasets selectable from the menu.
//!
//! All three share five resource types and the same starting availability.
//! The small and large sets have a safe sequence; the medium set stalls after
//! nine admissions because two processes claim more of the first resource
//! type than the system ever holds.

use crate::model::{Dataset, ProcessRecord, Units};
use std::fmt;

/// Resource types in every preset.
pub const PRESET_RESOURCES: usize = 5;

const INITIAL_AVAILABLE: [Units; PRESET_RESOURCES] = [1, 5, 2, 0, 2];

type Row = ([Units; PRESET_RESOURCES], [Units; PRESET_RESOURCES]);

const COMMON: [Row; 5] = [
    ([0, 0, 1, 2, 1], [0, 0, 1, 2, 5]),
    ([1, 0, 0, 0, 3], [1, 7, 5, 0, 5]),
    ([1, 3, 5, 4, 2], [2, 3, 5, 6, 5]),
    ([0, 6, 3, 2, 5], [0, 6, 5, 2, 5]),
    ([0, 0, 1, 4, 6], [0, 6, 5, 6, 10]),
];

const SMALL_TAIL: [Row; 1] = [([0, 1, 2, 9, 6], [1, 2, 3, 10, 9])];

const MEDIUM_TAIL: [Row; 6] = [
    ([0, 2, 2, 9, 6], [1, 3, 4, 9, 8]),
    ([0, 3, 3, 10, 7], [1, 4, 3, 10, 9]),
    ([0, 5, 4, 3, 8], [2, 6, 6, 8, 9]),
    ([0, 2, 3, 2, 3], [5, 5, 5, 6, 9]),
    ([0, 3, 5, 1, 2], [6, 4, 6, 9, 9]),
    ([0, 2, 2, 9, 6], [1, 3, 3, 11, 9]),
];

// P5 claims less of the last type than it holds; kept as-is, the engine does
// not validate claims.
const LARGE_TAIL: [Row; 16] = [
    ([2, 4, 3, 8, 6], [3, 5, 3, 9, 1]),
    ([5, 2, 4, 5, 7], [6, 3, 5, 6, 9]),
    ([5, 2, 2, 4, 8], [11, 5, 6, 4, 9]),
    ([6, 6, 2, 5, 9], [7, 8, 3, 6, 10]),
    ([1, 5, 2, 8, 1], [2, 6, 5, 9, 10]),
    ([2, 8, 2, 5, 2], [5, 9, 4, 6, 5]),
    ([3, 9, 2, 2, 2], [4, 10, 3, 4, 9]),
    ([1, 10, 2, 1, 3], [1, 11, 4, 4, 9]),
    ([2, 3, 2, 6, 4], [3, 5, 3, 8, 9]),
    ([7, 2, 2, 7, 5], [8, 3, 4, 8, 9]),
    ([9, 1, 2, 8, 7], [12, 2, 5, 9, 9]),
    ([8, 2, 2, 2, 5], [9, 2, 3, 4, 9]),
    ([6, 5, 2, 5, 6], [7, 9, 5, 5, 9]),
    ([5, 7, 2, 9, 8], [9, 7, 3, 10, 12]),
    ([3, 6, 2, 1, 7], [12, 10, 15, 13, 9]),
    ([1, 5, 2, 4, 2], [20, 22, 24, 25, 29]),
];

/// Preset dataset sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetSize {
    /// 6 processes.
    Small,
    /// 11 processes.
    Medium,
    /// 21 processes.
    Large,
}

impl DatasetSize {
    /// Every size, in menu order.
    pub const ALL: [DatasetSize; 3] = [DatasetSize::Small, DatasetSize::Medium, DatasetSize::Large];

    /// Number of processes in the preset.
    pub fn process_count(self) -> usize {
        COMMON.len() + self.tail().len()
    }

    fn tail(self) -> &'static [Row] {
        match self {
            DatasetSize::Small => &SMALL_TAIL,
            DatasetSize::Medium => &MEDIUM_TAIL,
            DatasetSize::Large => &LARGE_TAIL,
        }
    }
}

impl fmt::Display for DatasetSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DatasetSize::Small => "Low processes",
            DatasetSize::Medium => "Medium processes",
            DatasetSize::Large => "High processes",
        };
        f.write_str(label)
    }
}

/// Build a fresh copy of a preset.
///
/// Run durations cycle 1, 2, 3 time units by process index.
pub fn select_dataset(size: DatasetSize) -> Dataset {
    let processes = COMMON
        .iter()
        .chain(size.tail())
        .enumerate()
        .map(|(i, (allocation, max_claim))| {
            ProcessRecord::new(
                format!("P{i}"),
                allocation.to_vec(),
                max_claim.to_vec(),
                (i % 3) as u64 + 1,
            )
        })
        .collect();
    Dataset::new(processes, INITIAL_AVAILABLE.to_vec())
}
