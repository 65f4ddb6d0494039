//! Console rendering of the allocation, claim, availability and need matrices.

use crate::model::{Dataset, Units};
use crate::sequence::SafetyOutcome;
use std::fmt;

/// Read-only view that renders a dataset and its safety outcome.
#[derive(Debug, Clone, Copy)]
pub struct MatrixReport<'a> {
    dataset: &'a Dataset,
    outcome: &'a SafetyOutcome,
}

impl<'a> MatrixReport<'a> {
    /// Create a report over an evaluated dataset.
    pub fn new(dataset: &'a Dataset, outcome: &'a SafetyOutcome) -> Self {
        Self { dataset, outcome }
    }
}

fn write_vector(f: &mut fmt::Formatter<'_>, values: &[Units]) -> fmt::Result {
    for v in values {
        write!(f, "{} ", v)?;
    }
    f.write_str("|")
}

impl fmt::Display for MatrixReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Amount of processes: {}", self.dataset.len())?;
        writeln!(f, "Amount of resources: {}", self.dataset.resource_count())?;
        writeln!(f, "ID: |Allocation|Max|Available|Need|")?;
        for record in self.dataset.processes() {
            write!(f, "{}: |", record.id())?;
            write_vector(f, record.allocation())?;
            write_vector(f, record.max_claim())?;
            write_vector(f, record.available())?;
            write_vector(f, record.need())?;
            writeln!(f)?;
        }
        if let Some(final_available) = self.dataset.final_available() {
            write!(f, "Final available: |")?;
            write_vector(f, final_available)?;
            writeln!(f)?;
        }

        match self.outcome.safe_order() {
            Some(order) => {
                let names: Vec<&str> = order
                    .iter()
                    .filter_map(|&id| self.dataset.process(id).map(|p| p.id()))
                    .collect();
                writeln!(f, "Safe sequence: {}", names.join(" => "))
            }
            None => writeln!(
                f,
                "No safe sequence: {} of {} processes admitted",
                self.outcome.admitted,
                self.dataset.len()
            ),
        }
    }
}
