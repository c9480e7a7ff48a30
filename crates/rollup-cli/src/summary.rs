use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use rollup_common::{any_to_string, is_null_value};
use rollup_model::ConsolidationReport;

use rollup_cli::commands::{ConsolidateResult, FrameResult};

pub fn print_consolidation(result: &ConsolidateResult) {
    match &result.output {
        Some(path) => println!("Output: {}", path.display()),
        None => print_frame(&result.consolidation.data),
    }
    if let Some(path) = &result.report_json {
        println!("Report: {}", path.display());
    }
    print_report(&result.consolidation.report);
    if result.consolidation.report.has_conflicts() {
        println!(
            "Warning: {} rows conflict and were left unmerged",
            result.consolidation.report.conflict_rows
        );
    }
}

pub fn print_frame_result(result: &FrameResult) {
    match &result.output {
        Some(path) => println!("Output: {} ({} rows)", path.display(), result.frame.height()),
        None => print_frame(&result.frame),
    }
}

fn print_report(report: &ConsolidationReport) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Rows / Cells")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    table.add_row(vec![Cell::new("Input rows"), Cell::new(report.input_rows)]);
    table.add_row(vec![
        Cell::new("Output rows").add_attribute(Attribute::Bold),
        Cell::new(report.output_rows).add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new("Removed rows"),
        count_cell(report.removed_rows(), Color::Blue),
    ]);
    table.add_row(vec![
        Cell::new("Coincident rows"),
        count_cell(report.coincident_rows, Color::Blue),
    ]);
    table.add_row(vec![
        Cell::new("Merged rows"),
        count_cell(report.merged_rows, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Conflict rows"),
        count_cell(report.conflict_rows, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Vetoed pairings"),
        count_cell(report.vetoed_pairings, Color::Red),
    ]);
    table.add_row(vec![
        Cell::new("Filled cells"),
        count_cell(report.filled_cells, Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Overridden cells"),
        count_cell(report.overridden_cells, Color::Yellow),
    ]);
    println!("{table}");
}

fn print_frame(df: &DataFrame) {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for (index, column) in df.get_columns().iter().enumerate() {
        let dtype = column.dtype();
        if dtype.is_integer() || dtype.is_float() {
            align_column(&mut table, index, CellAlignment::Right);
        }
    }
    let columns = df.get_columns();
    for idx in 0..df.height() {
        let row: Vec<Cell> = columns
            .iter()
            .map(|column| match column.get(idx) {
                Ok(value) if is_null_value(&value) => dim_cell("-"),
                Ok(value) => Cell::new(any_to_string(value)),
                Err(_) => dim_cell("?"),
            })
            .collect();
        table.add_row(row);
    }
    println!("{table}");
    println!("{} rows x {} columns", df.height(), df.width());
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(60);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
