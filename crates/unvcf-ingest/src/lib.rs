//! VCF ingestion.
//!
//! This crate turns a (possibly compressed) VCF file into a frozen
//! [`FieldRegistry`](unvcf_model::FieldRegistry) plus a streaming iterator of
//! line-numbered raw records.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use unvcf_ingest::{HeaderOptions, open_vcf};
//!
//! let (header, rows) = open_vcf(Path::new("calls.vcf.gz"), HeaderOptions::default())?;
//! println!("{} samples", header.samples().len());
//! for row in rows {
//!     let row = row?;
//!     println!("line {}: {} columns", row.line_number, row.len());
//! }
//! # Ok::<(), unvcf_ingest::IngestError>(())
//! ```

mod error;
mod header;
mod lines;
mod meta;
mod source;

// === Error Types ===
pub use error::{IngestError, MetaInfoProblem, Result};

// === Header Parsing ===
pub use header::{HeaderOptions, UNKNOWN_FORMAT, VcfHeader, read_header};
pub use meta::{MetaInfoLine, meta_key, parse_entries, parse_meta_info_line, replace_unquoted};

// === Row Source ===
pub use source::{Compression, InputReader, RowSource, open_input, open_vcf, read_vcf};
