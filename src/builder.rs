//! Builder API for datasets.

use crate::error::ModelError;
use crate::model::{Dataset, ProcessId, ProcessRecord, Units};
use std::collections::HashMap;

/// The dataset builder.
#[derive(Debug)]
pub struct DatasetBuilder {
    initial_available: Vec<Units>,
    records: Vec<ProcessRecord>,
    ids: HashMap<String, ProcessId>,
    error: Option<ModelError>,
}

impl DatasetBuilder {
    /// Create a builder; the width of `initial_available` fixes the resource count.
    pub fn new(initial_available: Vec<Units>) -> Self {
        Self {
            initial_available,
            records: Vec::new(),
            ids: HashMap::new(),
            error: None,
        }
    }

    /// Append a process. The first structural error is kept and returned by `build`.
    pub fn process(
        mut self,
        id: &str,
        allocation: Vec<Units>,
        max_claim: Vec<Units>,
        run_duration: u64,
    ) -> Self {
        if self.error.is_some() {
            return self;
        }
        let expected = self.initial_available.len();
        for (field, width) in [("allocation", allocation.len()), ("max_claim", max_claim.len())] {
            if width != expected {
                self.error = Some(ModelError::WidthMismatch {
                    id: id.to_string(),
                    field,
                    expected,
                    actual: width,
                });
                return self;
            }
        }
        if self.ids.contains_key(id) {
            self.error = Some(ModelError::DuplicateId(id.to_string()));
            return self;
        }
        self.ids.insert(id.to_string(), ProcessId(self.records.len()));
        self.records
            .push(ProcessRecord::new(id, allocation, max_claim, run_duration));
        self
    }

    /// Index a previously added process was given.
    pub fn lookup(&self, id: &str) -> Option<ProcessId> {
        self.ids.get(id).copied()
    }

    /// Build the dataset.
    pub fn build(self) -> Result<Dataset, ModelError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(Dataset::new(self.records, self.initial_available)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_assigns_indices_in_order() {
        let builder = DatasetBuilder::new(vec![1, 1])
            .process("A", vec![0, 0], vec![1, 0], 1)
            .process("B", vec![1, 0], vec![1, 1], 1);
        assert_eq!(builder.lookup("B"), Some(ProcessId(1)));
        assert_eq!(builder.lookup("C"), None);
        let dataset = builder.build().unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.processes()[0].id(), "A");
    }

    #[test]
    fn builder_rejects_width_mismatch() {
        let result = DatasetBuilder::new(vec![1, 1])
            .process("A", vec![0], vec![1, 0], 1)
            .build();
        assert_eq!(
            result,
            Err(ModelError::WidthMismatch {
                id: "A".to_string(),
                field: "allocation",
                expected: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn builder_rejects_duplicate_ids() {
        let result = DatasetBuilder::new(vec![0])
            .process("A", vec![0], vec![0], 1)
            .process("A", vec![0], vec![0], 1)
            .build();
        assert_eq!(result, Err(ModelError::DuplicateId("A".to_string())));
    }

    #[test]
    fn builder_keeps_first_error() {
        let result = DatasetBuilder::new(vec![0])
            .process("A", vec![0, 0], vec![0], 1)
            .process("A", vec![0], vec![0], 1)
            .process("A", vec![0], vec![0], 1)
            .build();
        assert!(matches!(result, Err(ModelError::WidthMismatch { .. })));
    }

    #[test]
    fn builder_does_not_check_claims() {
        let dataset = DatasetBuilder::new(vec![0])
            .process("A", vec![5], vec![1], 0)
            .build()
            .unwrap();
        assert_eq!(dataset.len(), 1);
    }
}
