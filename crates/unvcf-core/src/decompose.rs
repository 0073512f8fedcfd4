//! Row decomposition into per-field cells.

use std::collections::HashMap;

use tracing::{debug, warn};

use unvcf_model::{
    AnomalyCounts, Cardinality, CellSink, FIRST_SAMPLE_COLUMN, FLAG_PRESENT, FieldRegistry,
    InfoLayout, MISSING_VALUE, Namespace, OutputKey, RawRow, SplitOptions,
};

/// One declared field resolved to its output slot.
#[derive(Debug, Clone)]
struct Target {
    id: String,
    key: OutputKey,
    number: Cardinality,
}

/// Turns raw records into cells for every declared field.
///
/// Built once from the frozen registry and the column header; every call to
/// [`RowDecomposer::decompose`] writes exactly one row to every opened key.
#[derive(Debug)]
pub struct RowDecomposer {
    fixed_columns: usize,
    fixed_header: Vec<String>,
    info_layout: InfoLayout,
    /// `INFO` fields in canonical order.
    info: Vec<Target>,
    info_index: HashMap<String, usize>,
    /// `FORMAT` fields in canonical order; empty when there are no samples.
    format: Vec<Target>,
    format_index: HashMap<String, usize>,
    samples: Vec<String>,
    records: u64,
    anomalies: AnomalyCounts,
}

impl RowDecomposer {
    /// `columns` is the tab-split column header line.
    pub fn new(registry: &FieldRegistry, columns: &[String], options: &SplitOptions) -> Self {
        let fixed_columns = options.fixed_columns;
        let mut fixed_header: Vec<String> = columns.iter().take(fixed_columns).cloned().collect();
        fixed_header.resize(fixed_columns, String::new());

        let samples: Vec<String> = columns
            .get(FIRST_SAMPLE_COLUMN..)
            .unwrap_or(&[])
            .to_vec();

        let info: Vec<Target> = registry
            .fields(Namespace::Info)
            .map(|spec| Target {
                id: spec.id.clone(),
                key: OutputKey::Info(spec.id.clone()),
                number: spec.number,
            })
            .collect();
        let format: Vec<Target> = if samples.is_empty() {
            Vec::new()
        } else {
            registry
                .fields(Namespace::Format)
                .map(|spec| Target {
                    id: spec.id.clone(),
                    key: OutputKey::Sample(spec.id.clone()),
                    number: spec.number,
                })
                .collect()
        };
        if samples.is_empty() && registry.len(Namespace::Format) > 0 {
            debug!("no sample columns, per-sample tables are not produced");
        }

        Self {
            fixed_columns,
            fixed_header,
            info_layout: options.info_layout,
            info_index: index_of(&info),
            info,
            format_index: index_of(&format),
            format,
            samples,
            records: 0,
            anomalies: AnomalyCounts::default(),
        }
    }

    /// Keys written for every record, in open order.
    pub fn output_keys(&self) -> Vec<OutputKey> {
        let mut keys = vec![OutputKey::Default];
        match self.info_layout {
            InfoLayout::PerField => keys.extend(self.info.iter().map(|t| t.key.clone())),
            InfoLayout::Combined if !self.info.is_empty() => keys.push(OutputKey::InfoTable),
            InfoLayout::Combined => {}
        }
        keys.extend(self.format.iter().map(|t| t.key.clone()));
        keys
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// Records decomposed so far.
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn anomalies(&self) -> AnomalyCounts {
        self.anomalies
    }

    /// Open every output with its header row.
    pub fn open<S: CellSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.open(&OutputKey::Default, &self.fixed_header)?;
        match self.info_layout {
            InfoLayout::PerField => {
                for target in &self.info {
                    sink.open(&target.key, std::slice::from_ref(&target.id))?;
                }
            }
            InfoLayout::Combined => {
                if !self.info.is_empty() {
                    let ids: Vec<String> = self.info.iter().map(|t| t.id.clone()).collect();
                    sink.open(&OutputKey::InfoTable, &ids)?;
                }
            }
        }
        for target in &self.format {
            sink.open(&target.key, &self.samples)?;
        }
        Ok(())
    }

    /// Write one row to every output for `row`.
    pub fn decompose<S: CellSink>(&mut self, row: &RawRow, sink: &mut S) -> Result<(), S::Error> {
        self.records += 1;
        self.write_fixed(row, sink)?;
        self.write_info(row, sink)?;
        if !self.format.is_empty() {
            self.write_samples(row, sink)?;
        }
        Ok(())
    }

    fn write_fixed<S: CellSink>(&mut self, row: &RawRow, sink: &mut S) -> Result<(), S::Error> {
        let mut cells: Vec<String> = row.fields.iter().take(self.fixed_columns).cloned().collect();
        if cells.len() < self.fixed_columns {
            self.anomalies.short_rows += 1;
            report(
                self.anomalies.short_rows,
                row.line_number,
                "record has fewer columns than the fixed prefix, padding with '.'",
            );
            cells.resize(self.fixed_columns, MISSING_VALUE.to_string());
        }
        sink.append_row(&OutputKey::Default, &cells)
    }

    fn write_info<S: CellSink>(&mut self, row: &RawRow, sink: &mut S) -> Result<(), S::Error> {
        let mut values: Vec<Option<&str>> = vec![None; self.info.len()];
        for token in split_tokens(row.info().unwrap_or(MISSING_VALUE), ';') {
            let (key, value) = token.split_once('=').unwrap_or((token, FLAG_PRESENT));
            match self.info_index.get(key) {
                Some(&idx) => values[idx] = Some(value),
                None => {
                    self.anomalies.unknown_info_keys += 1;
                    debug!(line_number = row.line_number, key, "undeclared INFO key skipped");
                }
            }
        }

        let mut cells = Vec::with_capacity(self.info.len());
        for (target, value) in self.info.iter().zip(values) {
            let cell = target.number.cell(value);
            if cell.dropped_slots() > 0 {
                self.anomalies.truncated_values += 1;
                report_truncated(self.anomalies.truncated_values, row.line_number, &target.id);
            }
            cells.push(cell.text());
        }

        match self.info_layout {
            InfoLayout::PerField => {
                for (target, cell) in self.info.iter().zip(cells) {
                    sink.append_row(&target.key, &[cell])?;
                }
                Ok(())
            }
            InfoLayout::Combined if cells.is_empty() => Ok(()),
            InfoLayout::Combined => sink.append_row(&OutputKey::InfoTable, &cells),
        }
    }

    fn write_samples<S: CellSink>(&mut self, row: &RawRow, sink: &mut S) -> Result<(), S::Error> {
        let keys: Vec<Option<usize>> = split_tokens(row.format_keys().unwrap_or(""), ':')
            .map(|key| {
                let idx = self.format_index.get(key).copied();
                if idx.is_none() {
                    self.anomalies.unknown_format_keys += 1;
                    debug!(line_number = row.line_number, key, "undeclared FORMAT key skipped");
                }
                idx
            })
            .collect();

        let supplied = row.samples();
        if supplied.len() > self.samples.len() {
            self.anomalies.extra_sample_columns += (supplied.len() - self.samples.len()) as u64;
            report(
                self.anomalies.extra_sample_columns,
                row.line_number,
                "record has more sample columns than the header, extras ignored",
            );
        }

        // values[field][sample]
        let mut values: Vec<Vec<Option<&str>>> =
            vec![vec![None; self.samples.len()]; self.format.len()];
        for (sample, column) in supplied.iter().take(self.samples.len()).enumerate() {
            if column.is_empty() || column == MISSING_VALUE {
                continue;
            }
            for (key, value) in keys.iter().zip(column.split(':')) {
                if let Some(&idx) = key.as_ref() {
                    values[idx][sample] = Some(value);
                }
            }
        }

        for (target, per_sample) in self.format.iter().zip(values) {
            let mut cells = Vec::with_capacity(per_sample.len());
            for value in per_sample {
                let cell = target.number.cell(value);
                if cell.dropped_slots() > 0 {
                    self.anomalies.truncated_values += 1;
                    report_truncated(self.anomalies.truncated_values, row.line_number, &target.id);
                }
                cells.push(cell.text());
            }
            sink.append_row(&target.key, &cells)?;
        }
        Ok(())
    }
}

fn index_of(targets: &[Target]) -> HashMap<String, usize> {
    targets
        .iter()
        .enumerate()
        .map(|(idx, target)| (target.id.clone(), idx))
        .collect()
}

/// Non-empty tokens of a `;`- or `:`-joined column; `.` alone means none.
fn split_tokens(column: &str, sep: char) -> impl Iterator<Item = &str> {
    let column = if column == MISSING_VALUE { "" } else { column };
    column.split(sep).filter(|token| !token.is_empty())
}

/// Warn on the first occurrence of an anomaly, log later ones at debug.
fn report(count: u64, line_number: u64, message: &str) {
    if count == 1 {
        warn!(line_number, "{message} (further occurrences are only counted)");
    } else {
        debug!(line_number, "{message}");
    }
}

fn report_truncated(count: u64, line_number: u64, field_id: &str) {
    if count == 1 {
        warn!(
            line_number,
            field_id,
            "value has more entries than declared, extra entries dropped (further occurrences are only counted)"
        );
    } else {
        debug!(line_number, field_id, "value truncated to declared count");
    }
}
