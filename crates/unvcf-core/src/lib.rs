//! Decomposition of VCF data records.
//!
//! [`RowDecomposer`] is built from a frozen field registry and the column
//! header. For every record it emits one row to the default table, one to
//! each `INFO` output and one to each per-sample `FORMAT` output, applying
//! the declared cardinality of each field.

mod decompose;

pub use decompose::RowDecomposer;
