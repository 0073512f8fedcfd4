//! Error types for VCF ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Why a meta-information line could not be structured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaInfoProblem {
    /// No `<` ... `>` span.
    MissingBrackets,
    /// No non-empty `ID=` entry inside the span.
    MissingId,
}

impl std::fmt::Display for MetaInfoProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetaInfoProblem::MissingBrackets => f.write_str("no <...> span"),
            MetaInfoProblem::MissingId => f.write_str("no ID key"),
        }
    }
}

/// Errors that can occur while reading a VCF file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input file not found.
    #[error("VCF file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the input.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read from an already opened stream.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    // === Header Errors ===
    /// The input contains no lines at all.
    #[error("input is empty")]
    EmptyInput,

    /// A recognized meta-information line could not be parsed.
    #[error("could not parse meta-information line {line_number} ({problem}): {line}")]
    MetaInfo {
        line_number: u64,
        line: String,
        problem: MetaInfoProblem,
    },

    /// The header ended without a column header line.
    #[error("missing column header line after {lines} header lines")]
    MissingColumnHeader { lines: u64 },

    // === Record Errors ===
    /// Reading a data line failed.
    #[error("failed to read record at line {line_number}: {source}")]
    Record {
        line_number: u64,
        #[source]
        source: std::io::Error,
    },
}

impl IngestError {
    pub(crate) fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/file.vcf"),
        };
        assert_eq!(err.to_string(), "VCF file not found: /path/to/file.vcf");
    }

    #[test]
    fn test_meta_info_error_names_line() {
        let err = IngestError::MetaInfo {
            line_number: 4,
            line: "##INFO=ID=DP".to_string(),
            problem: MetaInfoProblem::MissingBrackets,
        };
        assert_eq!(
            err.to_string(),
            "could not parse meta-information line 4 (no <...> span): ##INFO=ID=DP"
        );
    }
}
