//! Menu input parsing for the interactive front end.

use crate::error::MenuError;
use crate::presets::DatasetSize;
use std::fmt;
use std::str::FromStr;

/// A validated menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Evaluate and run a preset.
    Dataset(DatasetSize),
    /// Leave the loop.
    Exit,
}

impl FromStr for MenuChoice {
    type Err = MenuError;

    /// Accepts an optionally signed integer surrounded by whitespace.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let trimmed = input.trim();
        let value: i64 = trimmed
            .parse()
            .map_err(|_| MenuError::NotAnInteger(trimmed.to_string()))?;
        match value {
            1 => Ok(MenuChoice::Dataset(DatasetSize::Small)),
            2 => Ok(MenuChoice::Dataset(DatasetSize::Medium)),
            3 => Ok(MenuChoice::Dataset(DatasetSize::Large)),
            4 => Ok(MenuChoice::Exit),
            other => Err(MenuError::OutOfRange(other)),
        }
    }
}

/// The menu text.
#[derive(Debug, Clone, Copy, Default)]
pub struct Menu;

impl fmt::Display for Menu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, size) in DatasetSize::ALL.iter().enumerate() {
            writeln!(f, "{}) {}", i + 1, size)?;
        }
        writeln!(f, "{}) EXIT", DatasetSize::ALL.len() + 1)
    }
}
