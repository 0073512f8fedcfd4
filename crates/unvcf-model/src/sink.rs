//! Output keys and the sink the decomposer writes into.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one output table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "table", content = "id", rename_all = "kebab-case")]
pub enum OutputKey {
    /// Leading positional columns.
    Default,
    /// One `INFO` field, single value column.
    Info(String),
    /// All `INFO` fields in one table, one column per id.
    InfoTable,
    /// One `FORMAT` field, one column per sample.
    Sample(String),
}

impl fmt::Display for OutputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputKey::Default => f.write_str("default"),
            OutputKey::Info(id) => write!(f, "info:{id}"),
            OutputKey::InfoTable => f.write_str("info"),
            OutputKey::Sample(id) => write!(f, "sample:{id}"),
        }
    }
}

/// Receiver of decomposed rows.
///
/// `open` is called once per key before any row; `append_row` once per key
/// per input record, in input order.
pub trait CellSink {
    type Error;

    fn open(&mut self, key: &OutputKey, header: &[String]) -> Result<(), Self::Error>;

    fn append_row(&mut self, key: &OutputKey, cells: &[String]) -> Result<(), Self::Error>;
}

impl<S: CellSink + ?Sized> CellSink for &mut S {
    type Error = S::Error;

    fn open(&mut self, key: &OutputKey, header: &[String]) -> Result<(), Self::Error> {
        (**self).open(key, header)
    }

    fn append_row(&mut self, key: &OutputKey, cells: &[String]) -> Result<(), Self::Error> {
        (**self).append_row(key, cells)
    }
}
