//! Field declarations parsed from `##INFO`, `##FORMAT` and `##FILTER` lines.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Header namespace a field is declared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Namespace {
    /// Per-variant annotation (`##INFO`).
    Info,
    /// Per-sample value (`##FORMAT`).
    Format,
    /// Filter declaration (`##FILTER`).
    Filter,
}

impl Namespace {
    pub const ALL: [Namespace; 3] = [Namespace::Info, Namespace::Format, Namespace::Filter];

    /// Header key as written after the `##` marker.
    pub fn as_str(self) -> &'static str {
        match self {
            Namespace::Info => "INFO",
            Namespace::Format => "FORMAT",
            Namespace::Filter => "FILTER",
        }
    }

    /// Match a meta-information key exactly (`INFO`, `FORMAT`, `FILTER`).
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.as_str() == key)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Namespace {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_key(&value.trim().to_ascii_uppercase()).ok_or_else(|| {
            ModelError::UnknownNamespace {
                value: value.to_string(),
            }
        })
    }
}

/// Declared `Number` of a field, resolved once when the header is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count", rename_all = "lowercase")]
pub enum Cardinality {
    /// A non-negative integer count; `Fixed(0)` is a flag.
    Fixed(usize),
    /// `.`, `A`, `G`, `R` or any other non-numeric token.
    Variable,
}

impl Cardinality {
    /// Resolve the raw `Number` token. A missing token is treated as variable.
    pub fn parse(token: Option<&str>) -> Self {
        let Some(token) = token.map(str::trim) else {
            return Cardinality::Variable;
        };
        if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Cardinality::Variable;
        }
        token
            .parse::<usize>()
            .map_or(Cardinality::Variable, Cardinality::Fixed)
    }

    pub fn is_flag(self) -> bool {
        matches!(self, Cardinality::Fixed(0))
    }

    /// Cell for a field whose key never appears in the row.
    ///
    /// Flags read as `0`; everything else collapses to a single `.`,
    /// regardless of the declared count.
    pub fn absent_cell(self) -> Cell {
        match self {
            Cardinality::Fixed(0) => Cell::single(FLAG_ABSENT),
            _ => Cell::single(MISSING_VALUE),
        }
    }

    /// Cell for a field present in the row with the given raw value.
    pub fn present_cell(self, raw: &str) -> Cell {
        match self {
            Cardinality::Fixed(0) => Cell::single(FLAG_PRESENT),
            Cardinality::Fixed(_) if raw == MISSING_VALUE => Cell::single(MISSING_VALUE),
            Cardinality::Fixed(count) => {
                let mut slots: Vec<String> = raw.split(',').map(str::to_string).collect();
                let dropped = slots.len().saturating_sub(count);
                slots.truncate(count);
                slots.resize(count, String::new());
                Cell { slots, dropped }
            }
            Cardinality::Variable => Cell::single(raw),
        }
    }

    /// Cell for an optional raw value.
    pub fn cell(self, raw: Option<&str>) -> Cell {
        match raw {
            Some(raw) => self.present_cell(raw),
            None => self.absent_cell(),
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cardinality::Fixed(count) => write!(f, "{count}"),
            Cardinality::Variable => f.write_str("variable"),
        }
    }
}

/// Placeholder for "value not available".
pub const MISSING_VALUE: &str = ".";
/// Cell text of an absent flag.
pub const FLAG_ABSENT: &str = "0";
/// Cell text of a present flag, and raw value of a bare INFO key.
pub const FLAG_PRESENT: &str = "1";

/// One output value for one field in one row (and one sample).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    slots: Vec<String>,
    dropped: usize,
}

impl Cell {
    pub fn single(value: impl Into<String>) -> Self {
        Self {
            slots: vec![value.into()],
            dropped: 0,
        }
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    /// Slots beyond the declared count that were cut off.
    pub fn dropped_slots(&self) -> usize {
        self.dropped
    }

    /// Comma-joined cell text.
    pub fn text(&self) -> String {
        self.slots.join(",")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// A structured `##INFO`/`##FORMAT`/`##FILTER` declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: String,
    pub namespace: Namespace,
    pub number: Cardinality,
    /// Declared `Type`, empty when not given.
    pub value_type: String,
    /// `Description` with surrounding quotes removed.
    pub description: String,
    /// The header line exactly as read.
    pub raw_line: String,
}

impl FieldSpec {
    pub fn new(namespace: Namespace, id: impl Into<String>, number: Cardinality) -> Self {
        Self {
            id: id.into(),
            namespace,
            number,
            value_type: String::new(),
            description: String::new(),
            raw_line: String::new(),
        }
    }

    pub fn with_type(mut self, value_type: impl Into<String>) -> Self {
        self.value_type = value_type.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_raw_line(mut self, raw_line: impl Into<String>) -> Self {
        self.raw_line = raw_line.into();
        self
    }

    /// The `FORMAT` `GT` declaration assumed when a header omits it.
    pub fn implicit_genotype() -> Self {
        Self::new(Namespace::Format, "GT", Cardinality::Fixed(1))
            .with_type("String")
            .with_description("Genotype")
            .with_raw_line(r#"##FORMAT=<ID=GT,Number=1,Type=String,Description="Genotype">"#)
    }
}
