//! Meta-information line parsing (`##KEY=<...>`).

use std::collections::BTreeMap;

use unvcf_model::{Cardinality, FieldSpec, Namespace};

use crate::error::{IngestError, MetaInfoProblem, Result};

/// Prefix of every header line.
pub const META_MARKER: &str = "##";

/// Stands in for separator commas while splitting; never expected in header text.
const PAIR_DELIMITER: char = '\u{E000}';

/// Classification of one `##` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaInfoLine {
    /// An `INFO`, `FORMAT` or `FILTER` declaration.
    Field(FieldSpec),
    /// Any other header line, kept verbatim.
    Unstructured(String),
}

/// Key between `##` and the first `=`, if it is purely alphabetic.
pub fn meta_key(line: &str) -> Option<&str> {
    let rest = line.strip_prefix(META_MARKER)?;
    let (key, _) = rest.split_once('=')?;
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    Some(key)
}

/// Parse one header line into a field declaration.
///
/// Lines whose key is not `INFO`, `FORMAT` or `FILTER` are returned as
/// [`MetaInfoLine::Unstructured`]. A recognized line without a `<...>` span
/// or without an `ID` entry is an error.
pub fn parse_meta_info_line(line: &str, line_number: u64) -> Result<MetaInfoLine> {
    let Some(namespace) = meta_key(line).and_then(Namespace::from_key) else {
        return Ok(MetaInfoLine::Unstructured(line.to_string()));
    };
    let fail = |problem| IngestError::MetaInfo {
        line_number,
        line: line.to_string(),
        problem,
    };

    let entries = parse_entries(line).ok_or_else(|| fail(MetaInfoProblem::MissingBrackets))?;
    let id = entries
        .get("ID")
        .filter(|id| !id.is_empty())
        .ok_or_else(|| fail(MetaInfoProblem::MissingId))?;

    let spec = FieldSpec::new(
        namespace,
        id.clone(),
        Cardinality::parse(entries.get("Number").map(String::as_str)),
    )
    .with_type(entries.get("Type").cloned().unwrap_or_default())
    .with_description(
        entries
            .get("Description")
            .map(|value| unquote(value).to_string())
            .unwrap_or_default(),
    )
    .with_raw_line(line);
    Ok(MetaInfoLine::Field(spec))
}

/// `KEY=VALUE` entries between the first `<` and the last `>`.
///
/// Returns `None` when there is no such span. A later duplicate key
/// overwrites an earlier one; a piece without `=` maps to an empty value.
pub fn parse_entries(line: &str) -> Option<BTreeMap<String, String>> {
    let start = line.find('<')?;
    let end = line.rfind('>')?;
    if end <= start {
        return None;
    }
    let body = replace_unquoted(&line[start + 1..end], ',', PAIR_DELIMITER);
    let mut entries = BTreeMap::new();
    for piece in body.split(PAIR_DELIMITER) {
        if piece.is_empty() {
            continue;
        }
        let (key, value) = piece.split_once('=').unwrap_or((piece, ""));
        entries.insert(key.trim().to_string(), value.to_string());
    }
    Some(entries)
}

/// Replace `sep` with `mark` wherever it is outside a double-quoted span.
///
/// A backslash escapes the following character, so `\"` does not toggle
/// the quote state.
pub fn replace_unquoted(text: &str, sep: char, mark: char) -> String {
    let mut out = String::with_capacity(text.len());
    let mut inside = false;
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
            out.push(ch);
            continue;
        }
        match ch {
            '\\' => {
                escaped = true;
                out.push(ch);
            }
            '"' => {
                inside = !inside;
                out.push(ch);
            }
            c if c == sep && !inside => out.push(mark),
            c => out.push(c),
        }
    }
    out
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}
