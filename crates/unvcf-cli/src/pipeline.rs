//! Split pipeline with explicit stages.
//!
//! 1. **Read**: open the input and scan the header
//! 2. **Prepare**: build the decomposer and open every output
//! 3. **Decompose**: stream records into the outputs
//! 4. **Finalize**: close outputs and apply the cleanup policy
//!
//! The header is fully parsed before any output is created, so a malformed
//! header leaves the destination untouched.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tracing::{debug, info, info_span};

use unvcf_core::RowDecomposer;
use unvcf_ingest::{HeaderOptions, InputReader, RowSource, VcfHeader, open_vcf};
use unvcf_model::{Namespace, OutputFile, SplitOptions, SplitSummary};
use unvcf_output::OutputRouter;

// ============================================================================
// Stage 1: Read
// ============================================================================

/// Open `input` and parse its header.
pub fn read_input(
    input: &Path,
    options: &SplitOptions,
) -> Result<(VcfHeader, RowSource<InputReader>)> {
    let span = info_span!("read", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let header_options = HeaderOptions {
        implicit_genotype: options.implicit_genotype,
    };
    let (header, rows) = open_vcf(input, header_options)
        .with_context(|| format!("read VCF header from {}", input.display()))?;
    info!(
        file_format = %header.file_format,
        samples = header.samples().len(),
        info_fields = header.registry.len(Namespace::Info),
        format_fields = header.registry.len(Namespace::Format),
        elapsed_ms = start.elapsed().as_millis(),
        "header read"
    );
    Ok((header, rows))
}

// ============================================================================
// Stage 2: Prepare
// ============================================================================

/// Build the decomposer and open every output with its header row.
pub fn prepare_outputs(
    header: &VcfHeader,
    input: &Path,
    destination: &Path,
    options: &SplitOptions,
) -> Result<(RowDecomposer, OutputRouter)> {
    let span = info_span!("prepare", destination = %destination.display());
    let _guard = span.enter();

    let decomposer = RowDecomposer::new(&header.registry, &header.columns, options);
    let mut router = OutputRouter::new(destination, input, options)
        .with_context(|| format!("prepare output directory {}", destination.display()))?;
    decomposer
        .open(&mut router)
        .context("open output tables")?;
    info!(outputs = router.len(), "outputs opened");
    Ok((decomposer, router))
}

// ============================================================================
// Stage 3: Decompose
// ============================================================================

/// Stream every record through the decomposer into the router.
pub fn decompose_rows<R: BufRead>(
    rows: RowSource<R>,
    decomposer: &mut RowDecomposer,
    router: &mut OutputRouter,
    progress: &ProgressBar,
) -> Result<u64> {
    let span = info_span!("decompose");
    let _guard = span.enter();
    let start = Instant::now();

    for row in rows {
        let row = row.context("read data record")?;
        decomposer
            .decompose(&row, router)
            .with_context(|| format!("write record from line {}", row.line_number))?;
        progress.inc(1);
    }
    let records = decomposer.records();
    info!(
        records,
        elapsed_ms = start.elapsed().as_millis(),
        "records decomposed"
    );
    Ok(records)
}

// ============================================================================
// Stage 4: Finalize
// ============================================================================

/// Close every output and remove empty ones per the cleanup policy.
pub fn finalize_outputs(router: OutputRouter) -> Result<Vec<OutputFile>> {
    let span = info_span!("finalize");
    let _guard = span.enter();

    let outputs = router.finalize().context("close output tables")?;
    let removed = outputs.iter().filter(|output| output.removed).count();
    info!(written = outputs.len() - removed, removed, "outputs closed");
    Ok(outputs)
}

/// Run every stage for one input.
pub fn split_vcf(
    input: &Path,
    destination: &Path,
    options: &SplitOptions,
    progress: &ProgressBar,
) -> Result<SplitSummary> {
    options.validate().context("invalid split options")?;
    let span = info_span!("split", input = %input.display());
    let _guard = span.enter();
    let start = Instant::now();

    let (header, rows) = read_input(input, options)?;
    let (mut decomposer, mut router) = prepare_outputs(&header, input, destination, options)?;
    let records = decompose_rows(rows, &mut decomposer, &mut router, progress)?;
    let outputs = finalize_outputs(router)?;

    let anomalies = decomposer.anomalies();
    if !anomalies.is_clean() {
        info!(?anomalies, "records with recoverable problems");
    }
    debug!(elapsed_ms = start.elapsed().as_millis(), "split complete");

    Ok(SplitSummary {
        input: input.to_path_buf(),
        destination: destination.to_path_buf(),
        file_format: header.file_format.clone(),
        records,
        samples: header.samples().to_vec(),
        info_fields: header.registry.len(Namespace::Info),
        format_fields: header.registry.len(Namespace::Format),
        filter_fields: header.registry.len(Namespace::Filter),
        unstructured_lines: header.unstructured.len(),
        anomalies,
        outputs,
    })
}

/// Write the run summary as pretty JSON.
pub fn write_summary_json(path: &Path, summary: &SplitSummary) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create summary file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, summary)
        .with_context(|| format!("write summary file {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flush summary file {}", path.display()))?;
    Ok(())
}
