use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use pta_model::{ChartEmbedding, SeriesRecord};
use pta_transform::{format_iso8601_date, format_thousands};

use crate::types::AnalyzeResult;

pub fn print_summary(result: &AnalyzeResult) {
    println!("Input: {}", result.input.display());
    if let Some(path) = &result.report_path {
        println!("Report: {}", path.display());
    }
    if let Some(path) = &result.chart_path {
        println!("Chart: {}", path.display());
    }
    if let Some(path) = &result.chart_json_path {
        println!("Chart traces: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("Item"), header_cell("Value")]);
    apply_summary_table_style(&mut table);
    table.add_row(vec![label_cell("Date column"), Cell::new(&result.date_column)]);
    table.add_row(vec![label_cell("Value column"), Cell::new(&result.value_column)]);
    table.add_row(vec![label_cell("Records"), Cell::new(result.records)]);
    if let (Some(first), Some(latest)) = (&result.first, &result.latest) {
        table.add_row(vec![
            label_cell("Date range"),
            Cell::new(format!(
                "{} .. {}",
                format_iso8601_date(first.date),
                format_iso8601_date(latest.date)
            )),
        ]);
        table.add_row(vec![
            label_cell("Latest value"),
            Cell::new(format_thousands(latest.value, 2)).add_attribute(Attribute::Bold),
        ]);
    }
    for overlay in &result.overlays {
        let value = match overlay.last {
            Some(last) => Cell::new(format!(
                "{} ({} points)",
                format_thousands(last, 2),
                overlay.defined
            )),
            None => dim_cell("not enough data"),
        };
        table.add_row(vec![label_cell(&overlay.name), value]);
    }
    if let Some(chart) = &result.chart {
        table.add_row(vec![label_cell("Chart"), chart_cell(chart)]);
    }
    println!("{table}");

    if !result.tail.is_empty() {
        print_tail_table(&result.tail);
    }
}

fn print_tail_table(tail: &[SeriesRecord]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Date"), header_cell("Price")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for record in tail {
        table.add_row(vec![
            Cell::new(format_iso8601_date(record.date)),
            Cell::new(format_thousands(record.value, 2)),
        ]);
    }
    println!("{table}");
}

fn chart_cell(chart: &ChartEmbedding) -> Cell {
    match chart {
        ChartEmbedding::Embedded => Cell::new("embedded").fg(Color::Green),
        ChartEmbedding::Placeholder(message) => {
            Cell::new(format!("placeholder: {message}")).fg(Color::Yellow)
        }
        ChartEmbedding::Omitted => dim_cell("omitted"),
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

pub fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn label_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

pub fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
