//! In-memory [`CellSink`] for tests and previews.

use std::collections::BTreeMap;

use unvcf_model::{CellSink, OutputKey};

use crate::error::{OutputError, Result};

/// Header and rows collected for one key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl MemoryTable {
    /// Text exactly as [`crate::OutputRouter`] would write it.
    pub fn render(&self) -> String {
        let mut text = self.header.join("\t");
        for row in &self.rows {
            text.push('\n');
            text.push_str(&row.join("\t"));
        }
        text
    }

    /// Cell `column` of every row.
    pub fn column(&self, column: usize) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| row.get(column).map_or("", String::as_str))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    tables: BTreeMap<OutputKey, MemoryTable>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, key: &OutputKey) -> Option<&MemoryTable> {
        self.tables.get(key)
    }

    /// Keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &OutputKey> {
        self.tables.keys()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl CellSink for MemorySink {
    type Error = OutputError;

    fn open(&mut self, key: &OutputKey, header: &[String]) -> Result<()> {
        if self.tables.contains_key(key) {
            return Err(OutputError::AlreadyOpen { key: key.clone() });
        }
        self.tables.insert(
            key.clone(),
            MemoryTable {
                header: header.to_vec(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    fn append_row(&mut self, key: &OutputKey, cells: &[String]) -> Result<()> {
        let table = self
            .tables
            .get_mut(key)
            .ok_or_else(|| OutputError::NotOpen { key: key.clone() })?;
        table.rows.push(cells.to_vec());
        Ok(())
    }
}
