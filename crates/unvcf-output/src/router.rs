//! File-backed [`CellSink`] with one buffered writer per output key.

use std::collections::{BTreeMap, HashMap};
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use unvcf_model::{CellSink, CleanupPolicy, OutputFile, OutputKey, SplitOptions};

use crate::error::{OutputError, Result};
use crate::naming::{base_name, output_file_name};

const WRITE_BUFFER_BYTES: usize = 64 * 1024;
const CELL_SEPARATOR: &[u8] = b"\t";
const ROW_SEPARATOR: &[u8] = b"\n";

struct Target {
    path: PathBuf,
    writer: BufWriter<File>,
    rows: u64,
}

/// Routes rows to `<dest>/<base>.<kind>.<id>.<ext>` files.
///
/// The header is written without a trailing newline and every data row is
/// prefixed with one, so a file never ends with a newline. Writers are
/// flushed and closed by [`OutputRouter::finalize`]; dropping the router
/// closes them as well.
pub struct OutputRouter {
    destination: PathBuf,
    base: String,
    extension: String,
    cleanup: CleanupPolicy,
    targets: BTreeMap<OutputKey, Target>,
    /// Case-folded file names already taken, with their owner.
    claimed: HashMap<String, OutputKey>,
}

impl OutputRouter {
    /// Prepare a router for outputs derived from `input` inside `destination`.
    ///
    /// The destination directory is created when missing.
    pub fn new(destination: &Path, input: &Path, options: &SplitOptions) -> Result<Self> {
        fs::create_dir_all(destination).map_err(|source| OutputError::CreateDir {
            path: destination.to_path_buf(),
            source,
        })?;
        Ok(Self {
            destination: destination.to_path_buf(),
            base: base_name(input),
            extension: options.file_extension().to_string(),
            cleanup: options.cleanup,
            targets: BTreeMap::new(),
            claimed: HashMap::new(),
        })
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Path a key is (or would be) written to.
    pub fn path_for(&self, key: &OutputKey) -> PathBuf {
        self.destination
            .join(output_file_name(&self.base, key, &self.extension))
    }

    /// Number of open outputs.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Flush and close every output, then apply the cleanup policy.
    pub fn finalize(self) -> Result<Vec<OutputFile>> {
        let mut outputs = Vec::with_capacity(self.targets.len());
        for (key, target) in self.targets {
            let Target {
                path,
                mut writer,
                rows,
            } = target;
            writer
                .flush()
                .map_err(|source| OutputError::write(&path, source))?;
            drop(writer);
            outputs.push(OutputFile {
                key,
                path,
                rows,
                removed: false,
            });
        }
        debug!(outputs = outputs.len(), "outputs closed");

        if self.cleanup == CleanupPolicy::EmptyFiles {
            remove_empty_outputs(&mut outputs)?;
        }
        Ok(outputs)
    }
}

impl CellSink for OutputRouter {
    type Error = OutputError;

    fn open(&mut self, key: &OutputKey, header: &[String]) -> Result<()> {
        if self.targets.contains_key(key) {
            return Err(OutputError::AlreadyOpen { key: key.clone() });
        }
        let path = self.path_for(key);
        // Case-folded so ids differing only in case cannot share a file on
        // case-insensitive file systems either.
        let claim = path.to_string_lossy().to_lowercase();
        if let Some(holder) = self.claimed.get(&claim) {
            return Err(OutputError::PathCollision {
                key: key.clone(),
                holder: holder.clone(),
                path,
            });
        }
        let file = File::create(&path).map_err(|source| OutputError::Create {
            path: path.clone(),
            source,
        })?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_BYTES, file);
        write_cells(&mut writer, header).map_err(|source| OutputError::write(&path, source))?;
        debug!(key = %key, path = %path.display(), "output opened");
        self.claimed.insert(claim, key.clone());
        self.targets.insert(
            key.clone(),
            Target {
                path,
                writer,
                rows: 0,
            },
        );
        Ok(())
    }

    fn append_row(&mut self, key: &OutputKey, cells: &[String]) -> Result<()> {
        let target = self
            .targets
            .get_mut(key)
            .ok_or_else(|| OutputError::NotOpen { key: key.clone() })?;
        target
            .writer
            .write_all(ROW_SEPARATOR)
            .and_then(|()| write_cells(&mut target.writer, cells))
            .map_err(|source| OutputError::write(&target.path, source))?;
        target.rows += 1;
        Ok(())
    }
}

fn write_cells<W: Write>(writer: &mut W, cells: &[String]) -> std::io::Result<()> {
    for (idx, cell) in cells.iter().enumerate() {
        if idx > 0 {
            writer.write_all(CELL_SEPARATOR)?;
        }
        writer.write_all(cell.as_bytes())?;
    }
    Ok(())
}

/// Delete closed outputs whose size on disk is zero bytes.
///
/// Works from the file system, not from the row counts, so it can run over
/// any set of closed outputs.
pub fn remove_empty_outputs(outputs: &mut [OutputFile]) -> Result<usize> {
    let mut removed = 0;
    for output in outputs.iter_mut().filter(|output| !output.removed) {
        let size = match fs::metadata(&output.path) {
            Ok(meta) => meta.len(),
            Err(source) if source.kind() == ErrorKind::NotFound => {
                debug!(path = %output.path.display(), "output already gone, skipping cleanup");
                continue;
            }
            Err(source) => {
                return Err(OutputError::Remove {
                    path: output.path.clone(),
                    source,
                });
            }
        };
        if size > 0 {
            continue;
        }
        fs::remove_file(&output.path).map_err(|source| OutputError::Remove {
            path: output.path.clone(),
            source,
        })?;
        output.removed = true;
        removed += 1;
        debug!(path = %output.path.display(), "removed empty output");
    }
    if removed > 0 {
        info!(removed, "empty outputs removed");
    }
    Ok(removed)
}
