//! CLI argument definitions for the VCF splitter.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use unvcf_cli::logging::{LogConfig, LogFormat};
use unvcf_model::InfoLayout;

#[derive(Parser)]
#[command(
    name = "unvcf",
    version,
    about = "Split a VCF file into per-field tab-delimited tables",
    long_about = "Split a VCF file into per-field tab-delimited tables.\n\n\
                  Writes one table for the leading positional columns, one per INFO\n\
                  field and one per FORMAT field with a column per sample.\n\
                  Plain, gzip/bgzip and bzip2 inputs are supported."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// `--log-level` beats `-v`/`-q`; either one disables `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        let with_ansi = match self.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => io::stderr().is_terminal(),
        };
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            format: self.log_format.into(),
            with_ansi,
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Split a VCF file into per-field tables.
    Split(SplitArgs),

    /// List the fields declared in a VCF header.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct SplitArgs {
    /// Input VCF (plain, .gz, .bgz or .bz2).
    #[arg(value_name = "VCF")]
    pub input: PathBuf,

    /// Directory receiving the output tables (created when missing).
    #[arg(value_name = "DEST")]
    pub destination: PathBuf,

    /// TOML file with split options; flags given here take precedence.
    #[arg(long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Layout of INFO outputs.
    #[arg(long = "info-layout", value_enum)]
    pub info_layout: Option<InfoLayoutArg>,

    /// Number of leading columns copied to the default table.
    #[arg(long = "fixed-columns", value_name = "N")]
    pub fixed_columns: Option<usize>,

    /// File extension of every output table.
    #[arg(long = "extension", value_name = "EXT")]
    pub extension: Option<String>,

    /// Keep outputs that end up empty.
    #[arg(long = "keep-empty")]
    pub keep_empty: bool,

    /// Do not declare FORMAT GT when the header omits it.
    #[arg(long = "no-implicit-gt")]
    pub no_implicit_gt: bool,

    /// Also write the run summary as JSON.
    #[arg(long = "summary-json", value_name = "PATH")]
    pub summary_json: Option<PathBuf>,

    /// Hide the progress spinner.
    #[arg(long = "no-progress")]
    pub no_progress: bool,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Input VCF (plain, .gz, .bgz or .bz2).
    #[arg(value_name = "VCF")]
    pub input: PathBuf,

    /// Do not declare FORMAT GT when the header omits it.
    #[arg(long = "no-implicit-gt")]
    pub no_implicit_gt: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum InfoLayoutArg {
    /// One file per INFO field.
    PerField,
    /// One file with a column per INFO field.
    Combined,
}

impl From<InfoLayoutArg> for InfoLayout {
    fn from(arg: InfoLayoutArg) -> Self {
        match arg {
            InfoLayoutArg::PerField => InfoLayout::PerField,
            InfoLayoutArg::Combined => InfoLayout::Combined,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let argv = ["unvcf"].iter().chain(args).chain(&["fields", "in.vcf"]).copied();
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn defaults_defer_to_rust_log() {
        let config = parse(&["--color", "never"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(!config.with_ansi);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn verbosity_flags_pin_the_level() {
        let config = parse(&["-vv"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn explicit_level_beats_verbosity() {
        let config = parse(&["-q", "--log-level", "trace", "--log-format", "json"]).log_config();
        assert_eq!(config.level_filter, LevelFilter::TRACE);
        assert!(!config.use_env_filter);
        assert_eq!(config.format, LogFormat::Json);
    }

    #[test]
    fn color_always_enables_ansi() {
        assert!(parse(&["--color", "always"]).log_config().with_ansi);
    }
}
