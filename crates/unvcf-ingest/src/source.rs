//! Input opening and the streaming row source.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use tracing::debug;

use unvcf_model::RawRow;

use crate::error::{IngestError, Result};
use crate::header::{HeaderOptions, VcfHeader, read_header};
use crate::lines::LineReader;

const READ_BUFFER_BYTES: usize = 256 * 1024;

/// Compression detected from the input file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    /// gzip or bgzip (`.gz`, `.bgz`).
    Gzip,
    /// bzip2 (`.bz2`).
    Bzip2,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("gz" | "bgz") => Compression::Gzip,
            Some("bz2") => Compression::Bzip2,
            _ => Compression::None,
        }
    }
}

/// Boxed buffered reader over a possibly compressed input.
pub type InputReader = Box<dyn BufRead + Send>;

/// Open `path`, decompressing transparently based on its extension.
pub fn open_input(path: &Path) -> Result<InputReader> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let file = File::open(path).map_err(|e| IngestError::file_read(path, e))?;
    let compression = Compression::from_path(path);
    debug!(path = %path.display(), ?compression, "opening input");
    let reader: InputReader = match compression {
        Compression::None => Box::new(BufReader::with_capacity(READ_BUFFER_BYTES, file)),
        Compression::Gzip => Box::new(BufReader::with_capacity(
            READ_BUFFER_BYTES,
            MultiGzDecoder::new(file),
        )),
        Compression::Bzip2 => Box::new(BufReader::with_capacity(
            READ_BUFFER_BYTES,
            MultiBzDecoder::new(file),
        )),
    };
    Ok(reader)
}

/// Line-numbered iterator over the data records following the header.
///
/// Each physical line is one record, split on tabs with no quoting rules.
/// Blank lines are skipped but still counted.
pub struct RowSource<R> {
    lines: LineReader<R>,
}

impl<R: BufRead> RowSource<R> {
    /// Wrap a reader positioned at the first data record.
    ///
    /// `line_offset` is the number of lines already consumed, so reported
    /// line numbers refer to the whole file.
    pub fn new(reader: R, line_offset: u64) -> Self {
        Self {
            lines: LineReader::new(reader, line_offset),
        }
    }

    /// Lines consumed so far, header included.
    pub fn lines_read(&self) -> u64 {
        self.lines.count
    }

    fn read_next(&mut self) -> Result<Option<RawRow>> {
        loop {
            let line = self
                .lines
                .next_line()
                .map_err(|source| IngestError::Record {
                    line_number: self.lines.count + 1,
                    source,
                })?;
            let Some(line) = line else {
                return Ok(None);
            };
            if line.is_empty() {
                continue;
            }
            let fields = line.split('\t').map(str::to_string).collect();
            return Ok(Some(RawRow::new(self.lines.count, fields)));
        }
    }
}

impl<R> fmt::Debug for RowSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowSource")
            .field("lines_read", &self.lines.count)
            .finish_non_exhaustive()
    }
}

impl<R: BufRead> Iterator for RowSource<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_next().transpose()
    }
}

/// Parse the header from `reader` and return it with the row source for the rest.
pub fn read_vcf<R: BufRead>(
    mut reader: R,
    options: HeaderOptions,
) -> Result<(VcfHeader, RowSource<R>)> {
    let header = read_header(&mut reader, options)?;
    let rows = RowSource::new(reader, header.line_count);
    Ok((header, rows))
}

/// Open a VCF file from disk and split it into header and row source.
pub fn open_vcf(
    path: &Path,
    options: HeaderOptions,
) -> Result<(VcfHeader, RowSource<InputReader>)> {
    read_vcf(open_input(path)?, options)
}
