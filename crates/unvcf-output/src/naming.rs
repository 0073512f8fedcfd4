//! Deterministic output file names.

use std::path::Path;

use unvcf_model::OutputKey;

/// File name of the input including every extension (`calls.vcf.gz`).
pub fn base_name(input: &Path) -> String {
    input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string())
}

/// `<base>.default.<ext>`, `<base>.info.<ID>.<ext>`, `<base>.genotype.<ext>`
/// or `<base>.sample.<ID>.<ext>`.
pub fn output_file_name(base: &str, key: &OutputKey, extension: &str) -> String {
    match key {
        OutputKey::Default => format!("{base}.default.{extension}"),
        OutputKey::Info(id) => format!("{base}.info.{}.{extension}", sanitize(id)),
        OutputKey::InfoTable => format!("{base}.genotype.{extension}"),
        OutputKey::Sample(id) => format!("{base}.sample.{}.{extension}", sanitize(id)),
    }
}

/// Replace characters that cannot appear in a file name.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|ch| match ch {
            '/' | '\\' | '\0' => '_',
            c => c,
        })
        .collect()
}
