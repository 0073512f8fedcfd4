//! Split options from a TOML file plus command-line overrides.
//!
//! ```toml
//! fixed-columns = 7
//! info-layout = "combined"
//! cleanup = "keep"
//! extension = "tsv"
//! implicit-genotype = false
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use unvcf_model::{CleanupPolicy, InfoLayout, SplitOptions};

/// Options given on the command line; unset values leave the file's choice.
#[derive(Debug, Clone, Default)]
pub struct SplitOverrides {
    pub fixed_columns: Option<usize>,
    pub info_layout: Option<InfoLayout>,
    pub extension: Option<String>,
    pub keep_empty: bool,
    pub no_implicit_genotype: bool,
}

impl SplitOverrides {
    pub fn apply(self, mut options: SplitOptions) -> SplitOptions {
        if let Some(count) = self.fixed_columns {
            options.fixed_columns = count;
        }
        if let Some(layout) = self.info_layout {
            options.info_layout = layout;
        }
        if let Some(extension) = self.extension {
            options.extension = extension;
        }
        if self.keep_empty {
            options.cleanup = CleanupPolicy::Keep;
        }
        if self.no_implicit_genotype {
            options.implicit_genotype = false;
        }
        options
    }
}

/// Read split options from a TOML file. Missing keys take their defaults.
pub fn load_options(path: &Path) -> Result<SplitOptions> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let options: SplitOptions =
        toml::from_str(&text).with_context(|| format!("parse config file {}", path.display()))?;
    debug!(path = %path.display(), ?options, "loaded split options");
    Ok(options)
}

/// Defaults, then the config file, then the overrides; validated.
pub fn resolve_options(config: Option<&Path>, overrides: SplitOverrides) -> Result<SplitOptions> {
    let base = match config {
        Some(path) => load_options(path)?,
        None => SplitOptions::default(),
    };
    let options = overrides.apply(base);
    options.validate().context("invalid split options")?;
    Ok(options)
}
