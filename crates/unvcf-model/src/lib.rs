//! Shared model for splitting VCF files into per-field tables.
//!
//! - [`FieldSpec`] and [`Cardinality`]: one parsed header declaration and its
//!   resolved `Number`, including the cell policy for present and absent values.
//! - [`FieldRegistry`]: all declarations of a file, frozen before the first record.
//! - [`RawRow`], [`OutputKey`], [`CellSink`]: what flows between the row source,
//!   the decomposer and the output router.

pub mod error;
pub mod field;
pub mod options;
pub mod processing;
pub mod registry;
pub mod row;
pub mod sink;

pub use error::{ModelError, Result};
pub use field::{
    Cardinality, Cell, FLAG_ABSENT, FLAG_PRESENT, FieldSpec, MISSING_VALUE, Namespace,
};
pub use options::{CleanupPolicy, InfoLayout, SplitOptions};
pub use processing::{AnomalyCounts, OutputFile, SplitSummary};
pub use registry::{FieldRegistry, FieldRegistryBuilder, Registration};
pub use row::{DEFAULT_FIXED_COLUMNS, FIRST_SAMPLE_COLUMN, FORMAT_COLUMN, INFO_COLUMN, RawRow};
pub use sink::{CellSink, OutputKey};
