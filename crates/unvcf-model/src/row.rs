//! Raw data records as handed over by the row source.

/// Column index of the `INFO` column.
pub const INFO_COLUMN: usize = 7;
/// Column index of the `FORMAT` key list.
pub const FORMAT_COLUMN: usize = 8;
/// Column index of the first sample.
pub const FIRST_SAMPLE_COLUMN: usize = 9;
/// Number of leading positional columns (`CHROM` .. `FILTER`).
pub const DEFAULT_FIXED_COLUMNS: usize = 7;

/// One tab-split data line. Never retained past decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// 1-based line number in the input file.
    pub line_number: u64,
    pub fields: Vec<String>,
}

impl RawRow {
    pub fn new(line_number: u64, fields: Vec<String>) -> Self {
        Self {
            line_number,
            fields,
        }
    }

    pub fn column(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    pub fn info(&self) -> Option<&str> {
        self.column(INFO_COLUMN)
    }

    pub fn format_keys(&self) -> Option<&str> {
        self.column(FORMAT_COLUMN)
    }

    /// Sample columns in header order.
    pub fn samples(&self) -> &[String] {
        self.fields.get(FIRST_SAMPLE_COLUMN..).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
