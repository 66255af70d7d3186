use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use vw_core::{FileSummary, ImportSummary};

pub fn print_summary(summary: &ImportSummary) {
    println!("State: {}", summary.state.display_name());
    println!("Import type: {}", summary.import_type);
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Export date"),
        header_cell("Records"),
        header_cell("Batches"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for file in &summary.files {
        table.add_row(file_row(file));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(summary.total_records).add_attribute(Attribute::Bold),
        Cell::new(summary.total_batches()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("Elapsed: {:.2}s", summary.elapsed.as_secs_f64());
}

/// Machine-readable summary for `--json`.
pub fn print_summary_json(summary: &ImportSummary) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(summary)?);
    Ok(())
}

fn file_row(file: &FileSummary) -> Vec<Cell> {
    let records = if file.records == 0 {
        dim_cell(0)
    } else {
        Cell::new(file.records)
    };
    vec![
        Cell::new(&file.entry),
        file.export_date.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
        records,
        Cell::new(file.batches),
    ]
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
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

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
