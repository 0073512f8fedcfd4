use anyhow::{Context, Result};
use tracing::info_span;

use unvcf_cli::config::{SplitOverrides, resolve_options};
use unvcf_cli::pipeline::{split_vcf, write_summary_json};
use unvcf_cli::progress::record_spinner;
use unvcf_ingest::{HeaderOptions, open_vcf};
use unvcf_model::SplitSummary;

use crate::cli::{FieldsArgs, SplitArgs};
use crate::summary::print_fields;

pub fn run_split(args: &SplitArgs) -> Result<SplitSummary> {
    let overrides = SplitOverrides {
        fixed_columns: args.fixed_columns,
        info_layout: args.info_layout.map(Into::into),
        extension: args.extension.clone(),
        keep_empty: args.keep_empty,
        no_implicit_genotype: args.no_implicit_gt,
    };
    let options = resolve_options(args.config.as_deref(), overrides)?;

    let progress = record_spinner(!args.no_progress);
    let result = split_vcf(&args.input, &args.destination, &options, &progress);
    progress.finish_and_clear();
    let summary = result?;

    if let Some(path) = &args.summary_json {
        write_summary_json(path, &summary)?;
    }
    Ok(summary)
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let span = info_span!("fields", input = %args.input.display());
    let _guard = span.enter();
    let options = HeaderOptions {
        implicit_genotype: !args.no_implicit_gt,
    };
    let (header, _rows) = open_vcf(&args.input, options)
        .with_context(|| format!("read VCF header from {}", args.input.display()))?;
    print_fields(&header);
    Ok(())
}
