use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use unvcf_ingest::VcfHeader;
use unvcf_model::{AnomalyCounts, Namespace, OutputFile, OutputKey, SplitSummary};

pub fn print_summary(summary: &SplitSummary) {
    println!(
        "Input: {} ({})",
        summary.input.display(),
        summary.file_format
    );
    println!("Output: {}", summary.destination.display());
    println!(
        "Records: {}  Samples: {}",
        summary.records,
        summary.samples.len()
    );

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Field"),
        header_cell("Rows"),
        header_cell("File"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);

    let mut written = 0usize;
    for output in summary.written() {
        written += 1;
        table.add_row(vec![
            kind_cell(&output.key),
            field_cell(&output.key),
            Cell::new(output.rows),
            dim_cell(file_name(output)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(format!("{written} outputs"))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(summary.records).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    let removed = summary.outputs.len() - written;
    if removed > 0 {
        println!("Removed {removed} empty output(s)");
    }
    print_anomaly_table(&summary.anomalies);
}

fn print_anomaly_table(anomalies: &AnomalyCounts) {
    if anomalies.is_clean() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Problem"), header_cell("Count")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    let rows = [
        ("Undeclared INFO keys skipped", anomalies.unknown_info_keys),
        ("Undeclared FORMAT keys skipped", anomalies.unknown_format_keys),
        ("Values truncated to declared count", anomalies.truncated_values),
        ("Records padded to fixed columns", anomalies.short_rows),
        ("Sample columns ignored", anomalies.extra_sample_columns),
    ];
    for (label, count) in rows.into_iter().filter(|(_, count)| *count > 0) {
        table.add_row(vec![
            Cell::new(label),
            Cell::new(count).fg(Color::Yellow),
        ]);
    }
    eprintln!("{table}");
}

/// Declared fields of every namespace, ids in canonical order.
pub fn print_fields(header: &VcfHeader) {
    println!("File format: {}", header.file_format);
    println!("Samples: {}", header.samples().len());

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Namespace"),
        header_cell("ID"),
        header_cell("Number"),
        header_cell("Type"),
        header_cell("Description"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for namespace in Namespace::ALL {
        for spec in header.registry.fields(namespace) {
            table.add_row(vec![
                Cell::new(namespace.as_str()).fg(Color::Blue),
                Cell::new(&spec.id).add_attribute(Attribute::Bold),
                Cell::new(spec.number.to_string()),
                dim_cell(&spec.value_type),
                Cell::new(&spec.description),
            ]);
        }
    }
    println!("{table}");
    if !header.unstructured.is_empty() {
        println!("Other header lines: {}", header.unstructured.len());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn kind_cell(key: &OutputKey) -> Cell {
    let label = match key {
        OutputKey::Default => "default",
        OutputKey::Info(_) | OutputKey::InfoTable => "info",
        OutputKey::Sample(_) => "sample",
    };
    Cell::new(label).fg(Color::Blue)
}

fn field_cell(key: &OutputKey) -> Cell {
    match key {
        OutputKey::Info(id) | OutputKey::Sample(id) => {
            Cell::new(id).add_attribute(Attribute::Bold)
        }
        OutputKey::Default => dim_cell("fixed columns"),
        OutputKey::InfoTable => dim_cell("all INFO fields"),
    }
}

fn file_name(output: &OutputFile) -> String {
    output
        .path
        .file_name()
        .map_or_else(|| output.path.display().to_string(), |name| {
            name.to_string_lossy().into_owned()
        })
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
