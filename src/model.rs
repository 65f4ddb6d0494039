//! Resource model: per-process allocation records and the dataset holding them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Count of resource instances.
///
/// Signed: a record whose maximum claim is below its allocation yields a
/// negative need rather than a wrap or panic. Such input is not rejected.
pub type Units = i64;

/// Index of a process within its dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProcessId(pub usize);

/// One simulated process and its view of the resource matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRecord {
    id: String,
    allocation: Vec<Units>,
    max_claim: Vec<Units>,
    need: Vec<Units>,
    available: Vec<Units>,
    completed: bool,
    run_duration: u64,
    sequence_position: Option<usize>,
}

impl ProcessRecord {
    /// Create a fully formed record. Engine-owned fields start cleared.
    pub fn new(
        id: impl Into<String>,
        allocation: Vec<Units>,
        max_claim: Vec<Units>,
        run_duration: u64,
    ) -> Self {
        Self {
            id: id.into(),
            allocation,
            max_claim,
            need: Vec::new(),
            available: Vec::new(),
            completed: false,
            run_duration,
            sequence_position: None,
        }
    }

    /// Process identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Resources currently held.
    pub fn allocation(&self) -> &[Units] {
        &self.allocation
    }

    /// Maximum resources the process may ever hold.
    pub fn max_claim(&self) -> &[Units] {
        &self.max_claim
    }

    /// `max_claim - allocation`, empty until the engine has run.
    pub fn need(&self) -> &[Units] {
        &self.need
    }

    /// Availability snapshot at the rank equal to this record's index.
    ///
    /// Empty if the engine never reached that rank.
    pub fn available(&self) -> &[Units] {
        &self.available
    }

    /// Whether the engine admitted this process.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Simulated run time, in multiples of the configured time unit.
    pub fn run_duration(&self) -> u64 {
        self.run_duration
    }

    /// Rank in the discovered order.
    pub fn sequence_position(&self) -> Option<usize> {
        self.sequence_position
    }

    pub(crate) fn set_need(&mut self, need: Vec<Units>) {
        self.need = need;
    }

    pub(crate) fn set_available(&mut self, snapshot: Vec<Units>) {
        self.available = snapshot;
    }

    pub(crate) fn admit(&mut self, rank: usize) {
        self.completed = true;
        self.sequence_position = Some(rank);
    }

    fn clear_engine_state(&mut self) {
        self.need.clear();
        self.available.clear();
        self.completed = false;
        self.sequence_position = None;
    }
}

/// An ordered set of processes plus the availability they start from.
///
/// `final_available` takes the role of a trailing sentinel record: it only
/// receives the cumulative availability after every admitted process has
/// returned its allocation, and is never scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    processes: Vec<ProcessRecord>,
    initial_available: Vec<Units>,
    final_available: Option<Vec<Units>>,
}

impl Dataset {
    /// Create a dataset. Widths are not checked here; see
    /// [`DatasetBuilder`](crate::builder::DatasetBuilder) for a checked path.
    pub fn new(processes: Vec<ProcessRecord>, initial_available: Vec<Units>) -> Self {
        Self {
            processes,
            initial_available,
            final_available: None,
        }
    }

    /// Number of schedulable processes (the sentinel is not counted).
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    /// True when the dataset holds no processes.
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Number of resource types.
    pub fn resource_count(&self) -> usize {
        self.initial_available.len()
    }

    /// Availability the safety scan starts from.
    pub fn initial_available(&self) -> &[Units] {
        &self.initial_available
    }

    /// Availability after every admitted process completed.
    pub fn final_available(&self) -> Option<&[Units]> {
        self.final_available.as_deref()
    }

    /// All process records in index order.
    pub fn processes(&self) -> &[ProcessRecord] {
        &self.processes
    }

    /// Look up a process by index.
    pub fn process(&self, id: ProcessId) -> Option<&ProcessRecord> {
        self.processes.get(id.0)
    }

    /// Iterate over `(ProcessId, &ProcessRecord)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ProcessId, &ProcessRecord)> {
        self.processes
            .iter()
            .enumerate()
            .map(|(i, p)| (ProcessId(i), p))
    }

    /// Clear everything the engine writes so the dataset can be evaluated again.
    pub fn reset(&mut self) {
        for record in &mut self.processes {
            record.clear_engine_state();
        }
        self.final_available = None;
    }

    pub(crate) fn processes_mut(&mut self) -> &mut [ProcessRecord] {
        &mut self.processes
    }

    pub(crate) fn set_final_available(&mut self, available: Vec<Units>) {
        self.final_available = Some(available);
    }
}
