use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::DataFrame;

use tlf_common::any_to_string;
use tlf_model::GroupValue;

use crate::types::{CountResult, SubjectsResult};

pub fn print_subjects(result: &SubjectsResult) {
    println!("{}", subjects_table(result));
}

pub fn print_count(result: &CountResult) {
    println!("{}", summary_table(&result.table));
    if let Some(path) = &result.ard_path {
        println!("ARD: {} ({} records)", path.display(), result.ard.len());
    }
}

/// Denominator table: one row per group, `Total` highlighted.
pub fn subjects_table(result: &SubjectsResult) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(&result.group_col), header_cell("Subjects")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (group, count) in result.counts.iter() {
        let row = match group {
            GroupValue::Total => vec![
                Cell::new(group)
                    .fg(Color::Cyan)
                    .add_attribute(Attribute::Bold),
                Cell::new(count).add_attribute(Attribute::Bold),
            ],
            GroupValue::Missing => vec![dim_cell(group), dim_cell(count)],
            GroupValue::Arm(_) => vec![Cell::new(group), Cell::new(count)],
        };
        table.add_row(row);
    }
    table
}

/// Wide summary table: the label column, then one right-aligned column per group.
pub fn summary_table(df: &DataFrame) -> Table {
    let mut table = Table::new();
    table.set_header(
        df.get_column_names()
            .iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for index in 1..df.width() {
        align_column(&mut table, index, CellAlignment::Right);
    }
    let columns = df.get_columns();
    for row in 0..df.height() {
        let cells: Vec<Cell> = columns
            .iter()
            .map(|column| match column.get(row) {
                Ok(value) if !value.is_null() => Cell::new(any_to_string(value)),
                _ => dim_cell("-"),
            })
            .collect();
        table.add_row(cells);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
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
