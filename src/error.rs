//! Error types for every layer of the simulator.
//!
//! An unsafe verdict is not an error: it is reported through
//! [`SafetyOutcome::safe`](crate::sequence::SafetyOutcome::safe).

use thiserror::Error;

/// Structural mistakes caught while building a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A vector does not match the dataset's resource width.
    #[error("process {id}: {field} has {actual} resource types, expected {expected}")]
    WidthMismatch {
        /// Process identifier.
        id: String,
        /// Which vector was wrong.
        field: &'static str,
        /// Width of the dataset.
        expected: usize,
        /// Width supplied.
        actual: usize,
    },
    /// Two processes share an identifier.
    #[error("duplicate process id {0}")]
    DuplicateId(String),
}

/// Failures of the safe-sequence engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// More resource types requested than the dataset carries.
    #[error("resource count {requested} exceeds dataset width {width}")]
    ResourceCountOutOfRange {
        /// Resource count passed by the caller.
        requested: usize,
        /// Width of the dataset vectors.
        width: usize,
    },
    /// A sum or difference of resource counts does not fit in `Units`.
    #[error("resource type {resource}: count overflows")]
    Overflow {
        /// Index of the resource type.
        resource: usize,
    },
}

/// Failures of the execution supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SupervisorError {
    /// Execution was requested for a state with no safe sequence.
    #[error("no safe sequence: only {admitted} of {total} processes admitted")]
    UnsafeState {
        /// Processes the engine admitted.
        admitted: usize,
        /// Processes in the dataset.
        total: usize,
    },
    /// The order names a process the dataset does not have.
    #[error("order references unknown process index {0}")]
    UnknownProcess(usize),
}

/// Menu input that cannot be turned into a choice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MenuError {
    /// Input was not an integer.
    #[error("invalid input {0:?}: expected an integer")]
    NotAnInteger(String),
    /// Integer outside the menu range.
    #[error("menu option {0} is out of bounds")]
    OutOfRange(i64),
}
