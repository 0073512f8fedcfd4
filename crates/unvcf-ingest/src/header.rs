//! Header scanning: format line, meta-information lines and column header.

use std::io::BufRead;

use tracing::{debug, trace, warn};

use unvcf_model::{
    FIRST_SAMPLE_COLUMN, FieldRegistry, FieldRegistryBuilder, FieldSpec, Namespace, Registration,
};

use crate::error::{IngestError, Result};
use crate::lines::LineReader;
use crate::meta::{META_MARKER, MetaInfoLine, parse_meta_info_line};

/// Version marker used when the first line is not `##fileformat=...`.
pub const UNKNOWN_FORMAT: &str = "unknown";

const FILE_FORMAT_PREFIX: &str = "##fileformat=";

/// Everything read before the first data record.
#[derive(Debug, Clone)]
pub struct VcfHeader {
    /// Value of `##fileformat=`, or [`UNKNOWN_FORMAT`].
    pub file_format: String,
    /// Frozen field declarations.
    pub registry: FieldRegistry,
    /// Header lines outside the recognized namespaces, verbatim.
    pub unstructured: Vec<String>,
    /// Names from the column header line, as written.
    pub columns: Vec<String>,
    /// Lines consumed, column header included.
    pub line_count: u64,
}

impl VcfHeader {
    /// Sample ids in column order.
    pub fn samples(&self) -> &[String] {
        self.columns.get(FIRST_SAMPLE_COLUMN..).unwrap_or(&[])
    }

    /// Leading column names, at most `count`.
    pub fn fixed_columns(&self, count: usize) -> &[String] {
        &self.columns[..count.min(self.columns.len())]
    }
}

/// Options for header scanning.
#[derive(Debug, Clone, Copy)]
pub struct HeaderOptions {
    /// Declare `FORMAT` `GT` when the header does not.
    pub implicit_genotype: bool,
}

impl Default for HeaderOptions {
    fn default() -> Self {
        Self {
            implicit_genotype: true,
        }
    }
}

/// Read header lines up to and including the column header line.
///
/// The reader is left positioned at the first data record.
pub fn read_header<R: BufRead>(reader: &mut R, options: HeaderOptions) -> Result<VcfHeader> {
    let mut lines = LineReader::new(&mut *reader, 0);
    let mut builder = FieldRegistry::builder();
    let mut unstructured = Vec::new();

    let first = lines.next_line()?.ok_or(IngestError::EmptyInput)?;
    let file_format = match first.strip_prefix(FILE_FORMAT_PREFIX) {
        Some(version) => version.to_string(),
        None => {
            warn!(line = %first, "could not parse file format line, proceeding anyway");
            UNKNOWN_FORMAT.to_string()
        }
    };
    debug!(file_format = %file_format, "file format");

    let mut pending = if first.starts_with(FILE_FORMAT_PREFIX) {
        lines.next_line()?
    } else {
        Some(first)
    };

    let column_line = loop {
        let Some(line) = pending.take() else {
            return Err(IngestError::MissingColumnHeader {
                lines: lines.count,
            });
        };
        if !line.starts_with(META_MARKER) {
            break line;
        }
        match parse_meta_info_line(&line, lines.count)? {
            MetaInfoLine::Field(spec) => register(&mut builder, spec),
            MetaInfoLine::Unstructured(raw) => {
                debug!(line = %raw, "unknown meta-information line");
                unstructured.push(raw);
            }
        }
        pending = lines.next_line()?;
    };

    if options.implicit_genotype && !builder.contains(Namespace::Format, "GT") {
        debug!("header does not declare FORMAT GT, adding implicit declaration");
        builder.register(FieldSpec::implicit_genotype());
    }

    if !column_line.starts_with('#') {
        warn!(
            line_number = lines.count,
            "column header line does not start with '#'"
        );
    }
    let columns: Vec<String> = column_line.split('\t').map(str::to_string).collect();

    let header = VcfHeader {
        file_format,
        registry: builder.build(),
        unstructured,
        columns,
        line_count: lines.count,
    };
    debug!(
        info_fields = header.registry.len(Namespace::Info),
        format_fields = header.registry.len(Namespace::Format),
        filter_fields = header.registry.len(Namespace::Filter),
        samples = header.samples().len(),
        "header parsed"
    );
    Ok(header)
}

fn register(builder: &mut FieldRegistryBuilder, spec: FieldSpec) {
    let namespace = spec.namespace;
    let id = spec.id.clone();
    match builder.register(spec) {
        Registration::Added => trace!(namespace = %namespace, field_id = %id, "field declared"),
        Registration::Duplicate => warn!(
            namespace = %namespace,
            field_id = %id,
            "duplicate field declaration ignored"
        ),
    }
}
