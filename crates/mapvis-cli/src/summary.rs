use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::commands::RunSummary;

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Count table printed after the rendered table was written to a file.
pub fn summary_table(summary: &RunSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(summary.kind), header_cell("Count")]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    let mut total = 0usize;
    for (label, count) in &summary.counts {
        total += count;
        let count_cell = if *count == 0 {
            Cell::new(count).fg(Color::DarkGrey)
        } else {
            Cell::new(count)
        };
        table.add_row(vec![Cell::new(label), count_cell]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);
    table
}

pub fn print_summary(summary: &RunSummary) {
    if let Some(path) = &summary.output {
        println!("Output: {}", path.display());
    }
    println!("{}", summary_table(summary));
}
