//! Terminal rendering with `comfy-table`.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use mapvis_map::{contrast_text_color, lighten};
use mapvis_model::{
    CELL_OPACITY, FontStyle, HexColor, Legend, TableCell, TableModel, TextColor,
};

use crate::html::{EMPTY_TABLE_TEXT, LEGEND_TITLE};

#[derive(Debug, Clone, Copy)]
pub struct TerminalOptions {
    /// Emit ANSI colors even when stdout is not a terminal.
    pub styled: bool,
    pub width: Option<u16>,
}

impl Default for TerminalOptions {
    fn default() -> Self {
        Self {
            styled: true,
            width: None,
        }
    }
}

fn rgb(color: HexColor) -> Color {
    let [r, g, b] = color.rgb();
    Color::Rgb { r, g, b }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Terminals have no alpha channel, so the cell opacity is applied by
/// blending the background over white. The text color is picked again for
/// the blended background.
fn blended_colors(cell: &TableCell) -> (HexColor, TextColor) {
    let background = lighten(cell.style.background, CELL_OPACITY);
    (background, contrast_text_color(background))
}

fn body_cell(cell: &TableCell) -> Cell {
    let (background, text) = blended_colors(cell);
    let rendered = Cell::new(cell.values.join("\n"))
        .bg(rgb(background))
        .fg(rgb(text.as_color()));
    match cell.style.font {
        FontStyle::Normal => rendered,
        FontStyle::Bold => rendered.add_attribute(Attribute::Bold),
        FontStyle::Italic => rendered.add_attribute(Attribute::Italic),
    }
}

fn apply_style(table: &mut Table, options: &TerminalOptions) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    if let Some(width) = options.width {
        table.set_width(width);
    }
    if options.styled {
        table.enforce_styling();
    } else {
        table.force_no_tty();
    }
}

fn legend_table(legend: &Legend, options: &TerminalOptions) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell(LEGEND_TITLE), header_cell("Label")]);
    apply_style(&mut table, options);
    for section in legend.sections.iter().filter(|s| !s.entries.is_empty()) {
        let mut entries: Vec<_> = section.entries.iter().collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));
        for (idx, entry) in entries.into_iter().enumerate() {
            let title = if idx == 0 { section.title.as_str() } else { "" };
            table.add_row(vec![
                Cell::new(title).fg(Color::DarkGrey),
                Cell::new(&entry.label)
                    .bg(rgb(entry.color))
                    .fg(rgb(contrast_text_color(entry.color).as_color())),
            ]);
        }
    }
    table
}

/// Renders the caption, the table and its legend as terminal text.
pub fn render_terminal(table: &TableModel, options: &TerminalOptions) -> String {
    if table.is_empty() {
        return format!("{}\n{EMPTY_TABLE_TEXT}\n", table.caption);
    }
    let mut grid = Table::new();
    grid.set_header(
        table
            .columns
            .iter()
            .map(|column| header_cell(&column.name))
            .collect::<Vec<_>>(),
    );
    apply_style(&mut grid, options);
    for row in &table.rows {
        grid.add_row(row.cells.iter().map(body_cell).collect::<Vec<_>>());
    }

    let mut out = format!("{}\n{grid}\n", table.caption);
    if let Some(legend) = table.legend.as_ref().filter(|legend| !legend.is_empty()) {
        out.push_str(&format!("{}\n", legend_table(legend, options)));
    }
    out
}

#[cfg(test)]
mod tests {
    use mapvis_model::CellStyle;

    use super::*;

    fn cell(background: &str, text: TextColor) -> TableCell {
        TableCell {
            values: vec!["T-cell".to_string()],
            style: CellStyle {
                background: HexColor::parse(background).unwrap(),
                text,
                font: FontStyle::Normal,
            },
        }
    }

    #[test]
    fn text_contrasts_with_blended_background() {
        // White on #1f77b4, but the blend is #8fbbda.
        let (background, text) = blended_colors(&cell("#1f77b4", TextColor::White));
        assert_eq!(background.to_hex(), "#8fbbda");
        assert_eq!(text, TextColor::Black);
    }

    #[test]
    fn dark_backgrounds_keep_white_text() {
        let (background, text) = blended_colors(&cell("#000000", TextColor::White));
        assert_eq!(background.to_hex(), "#808080");
        assert_eq!(text, TextColor::White);
    }
}
