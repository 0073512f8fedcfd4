//! Configuration options for splitting a VCF file.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::row::{DEFAULT_FIXED_COLUMNS, FORMAT_COLUMN};

/// How `INFO` fields are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InfoLayout {
    /// One file per `INFO` id with a single value column.
    #[default]
    PerField,
    /// One file holding every `INFO` id as a column.
    Combined,
}

/// What happens to output files after the last record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CleanupPolicy {
    /// Remove outputs that ended up with zero bytes.
    #[default]
    EmptyFiles,
    /// Leave every output in place.
    Keep,
}

/// Options controlling decomposition and output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SplitOptions {
    /// Leading columns copied verbatim to the default table.
    pub fixed_columns: usize,

    /// `INFO` output layout.
    pub info_layout: InfoLayout,

    /// Post-run cleanup of output files.
    pub cleanup: CleanupPolicy,

    /// File extension of every output (without the dot).
    pub extension: String,

    /// Declare `FORMAT` `GT` when the header does not.
    pub implicit_genotype: bool,
}

impl Default for SplitOptions {
    fn default() -> Self {
        Self {
            fixed_columns: DEFAULT_FIXED_COLUMNS,
            info_layout: InfoLayout::default(),
            cleanup: CleanupPolicy::default(),
            extension: "csv".to_string(),
            implicit_genotype: true,
        }
    }
}

impl SplitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_fixed_columns(mut self, count: usize) -> Self {
        self.fixed_columns = count;
        self
    }

    #[must_use]
    pub fn with_info_layout(mut self, layout: InfoLayout) -> Self {
        self.info_layout = layout;
        self
    }

    #[must_use]
    pub fn with_cleanup(mut self, cleanup: CleanupPolicy) -> Self {
        self.cleanup = cleanup;
        self
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub fn with_implicit_genotype(mut self, enable: bool) -> Self {
        self.implicit_genotype = enable;
        self
    }

    /// Extension without a leading dot.
    pub fn file_extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    /// Reject option combinations the decomposer cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.fixed_columns == 0 || self.fixed_columns > FORMAT_COLUMN {
            return Err(ModelError::InvalidOption {
                option: "fixed-columns".to_string(),
                reason: format!(
                    "must be between 1 and {FORMAT_COLUMN}, got {}",
                    self.fixed_columns
                ),
            });
        }
        let extension = self.file_extension();
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(ModelError::InvalidOption {
                option: "extension".to_string(),
                reason: format!("not a usable file extension: {:?}", self.extension),
            });
        }
        Ok(())
    }
}
