use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::sink::OutputKey;

/// Per-run counts of recoverable row anomalies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnomalyCounts {
    /// `INFO` keys absent from the header.
    pub unknown_info_keys: u64,
    /// `FORMAT` keys absent from the header.
    pub unknown_format_keys: u64,
    /// Present values with more slots than the declared count.
    pub truncated_values: u64,
    /// Records with fewer columns than the fixed prefix.
    pub short_rows: u64,
    /// Sample columns beyond the header's sample list.
    pub extra_sample_columns: u64,
}

impl AnomalyCounts {
    pub fn total(&self) -> u64 {
        self.unknown_info_keys
            + self.unknown_format_keys
            + self.truncated_values
            + self.short_rows
            + self.extra_sample_columns
    }

    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputFile {
    pub key: OutputKey,
    pub path: PathBuf,
    /// Data rows written, header excluded.
    pub rows: u64,
    /// Removed by the cleanup pass.
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitSummary {
    pub input: PathBuf,
    pub destination: PathBuf,
    pub file_format: String,
    pub records: u64,
    pub samples: Vec<String>,
    pub info_fields: usize,
    pub format_fields: usize,
    pub filter_fields: usize,
    pub unstructured_lines: usize,
    pub anomalies: AnomalyCounts,
    pub outputs: Vec<OutputFile>,
}

impl SplitSummary {
    /// Outputs still present on disk.
    pub fn written(&self) -> impl Iterator<Item = &OutputFile> {
        self.outputs.iter().filter(|output| !output.removed)
    }
}
