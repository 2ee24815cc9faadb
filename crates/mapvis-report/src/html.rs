//! HTML rendering of mapping tables and their legends.

use std::io::Write;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use mapvis_map::format_with_opacity;
use mapvis_model::{CELL_OPACITY, FontStyle, Legend, TableCell, TableModel};

pub const EMPTY_TABLE_TEXT: &str = "No data to display";
pub const LEGEND_TITLE: &str = "Legend";

const TABLE_STYLE: &str = "border: 1px solid black; width: 100%; border-collapse: collapse;";
const CELL_BORDER: &str = "border: 1px solid black; padding: 4px;";
const LEGEND_CONTAINER_STYLE: &str = "padding: 10px; border: 1px solid #ccc; margin-top: 10px;";
const LEGEND_TITLE_STYLE: &str = "margin-top:0; margin-bottom:10px;";
const LEGEND_SECTION_STYLE: &str = "margin: 8px 0 4px 0;";
const LEGEND_ITEM_STYLE: &str = "display: flex; align-items: center; margin-bottom: 5px;";
const LEGEND_SWATCH_STYLE: &str =
    "width: 12px; height: 12px; margin-right: 5px; border: 1px solid #000;";

#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Alpha applied to cell backgrounds.
    pub cell_opacity: f64,
    /// Alpha applied to legend swatches.
    pub swatch_opacity: f64,
    pub legend_title: String,
    /// Indent nested elements; off keeps each fragment on one line.
    pub indent: bool,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            cell_opacity: CELL_OPACITY,
            swatch_opacity: 1.0,
            legend_title: LEGEND_TITLE.to_string(),
            indent: false,
        }
    }
}

/// Rendered table fragment plus the legend fragment, if the table has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlReport {
    pub table: String,
    pub legend: Option<String>,
}

impl HtmlReport {
    /// Table followed by the legend.
    pub fn fragment(&self) -> String {
        match &self.legend {
            Some(legend) => format!("{}\n{legend}", self.table),
            None => self.table.clone(),
        }
    }
}

fn new_writer(indent: bool) -> Writer<Vec<u8>> {
    if indent {
        Writer::new_with_indent(Vec::new(), b' ', 2)
    } else {
        Writer::new(Vec::new())
    }
}

fn finish(writer: Writer<Vec<u8>>) -> Result<String> {
    String::from_utf8(writer.into_inner()).context("rendered HTML is not UTF-8")
}

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    element: BytesStart<'_>,
    text: &str,
) -> Result<()> {
    let name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
    writer.write_event(Event::Start(element))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn styled(name: &str, style: &str) -> BytesStart<'static> {
    let mut element = BytesStart::new(name.to_string());
    element.push_attribute(("style", style));
    element
}

fn cell_css(cell: &TableCell, opacity: f64) -> String {
    let mut css = format!(
        "background-color: {}; color: {};",
        format_with_opacity(cell.style.background, opacity),
        cell.style.text.as_color()
    );
    match cell.style.font {
        FontStyle::Normal => {}
        FontStyle::Bold => css.push_str(" font-weight: bold;"),
        FontStyle::Italic => css.push_str(" font-style: italic;"),
    }
    css.push(' ');
    css.push_str(CELL_BORDER);
    css
}

fn write_cell<W: Write>(writer: &mut Writer<W>, cell: &TableCell, opacity: f64) -> Result<()> {
    writer.write_event(Event::Start(styled("td", &cell_css(cell, opacity))))?;
    for (idx, value) in cell.values.iter().enumerate() {
        if idx > 0 {
            writer.write_event(Event::Empty(BytesStart::new("br")))?;
        }
        writer.write_event(Event::Text(BytesText::new(value)))?;
    }
    writer.write_event(Event::End(BytesEnd::new("td")))?;
    Ok(())
}

/// Writes the `<table>` element. The row index is never rendered.
pub fn write_table<W: Write>(
    writer: &mut Writer<W>,
    table: &TableModel,
    options: &HtmlOptions,
) -> Result<()> {
    if table.is_empty() {
        writer.write_event(Event::Start(BytesStart::new("table")))?;
        write_text_element(writer, BytesStart::new("caption"), EMPTY_TABLE_TEXT)?;
        writer.write_event(Event::End(BytesEnd::new("table")))?;
        return Ok(());
    }

    writer.write_event(Event::Start(styled("table", TABLE_STYLE)))?;
    write_text_element(writer, BytesStart::new("caption"), &table.caption)?;

    writer.write_event(Event::Start(BytesStart::new("thead")))?;
    writer.write_event(Event::Start(BytesStart::new("tr")))?;
    for column in &table.columns {
        write_text_element(writer, styled("th", CELL_BORDER), &column.name)?;
    }
    writer.write_event(Event::End(BytesEnd::new("tr")))?;
    writer.write_event(Event::End(BytesEnd::new("thead")))?;

    writer.write_event(Event::Start(BytesStart::new("tbody")))?;
    for row in &table.rows {
        writer.write_event(Event::Start(BytesStart::new("tr")))?;
        for cell in &row.cells {
            write_cell(writer, cell, options.cell_opacity)?;
        }
        writer.write_event(Event::End(BytesEnd::new("tr")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("tbody")))?;
    writer.write_event(Event::End(BytesEnd::new("table")))?;
    Ok(())
}

/// Writes the legend `<div>`: a title, then one heading per non-empty
/// section with its entries in label order.
pub fn write_legend<W: Write>(
    writer: &mut Writer<W>,
    legend: &Legend,
    options: &HtmlOptions,
) -> Result<()> {
    writer.write_event(Event::Start(styled("div", LEGEND_CONTAINER_STYLE)))?;
    if !options.legend_title.is_empty() {
        write_text_element(writer, styled("h4", LEGEND_TITLE_STYLE), &options.legend_title)?;
    }
    for section in legend.sections.iter().filter(|s| !s.entries.is_empty()) {
        write_text_element(writer, styled("h5", LEGEND_SECTION_STYLE), &section.title)?;
        let mut entries: Vec<_> = section.entries.iter().collect();
        entries.sort_by(|a, b| a.label.cmp(&b.label));
        for entry in entries {
            writer.write_event(Event::Start(styled("div", LEGEND_ITEM_STYLE)))?;
            let swatch = format!(
                "{LEGEND_SWATCH_STYLE} background-color: {};",
                format_with_opacity(entry.color, options.swatch_opacity)
            );
            writer.write_event(Event::Start(styled("span", &swatch)))?;
            writer.write_event(Event::End(BytesEnd::new("span")))?;
            write_text_element(writer, BytesStart::new("span"), &entry.label)?;
            writer.write_event(Event::End(BytesEnd::new("div")))?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new("div")))?;
    Ok(())
}

/// Renders the table and, when present and non-empty, its legend.
pub fn render_html(table: &TableModel, options: &HtmlOptions) -> Result<HtmlReport> {
    let mut writer = new_writer(options.indent);
    write_table(&mut writer, table, options).context("write table HTML")?;
    let table_html = finish(writer)?;

    let legend = match &table.legend {
        Some(legend) if !table.is_empty() && !legend.is_empty() => {
            let mut writer = new_writer(options.indent);
            write_legend(&mut writer, legend, options).context("write legend HTML")?;
            Some(finish(writer)?)
        }
        _ => None,
    };
    debug!(
        rows = table.rows.len(),
        legend = legend.is_some(),
        "rendered HTML table"
    );
    Ok(HtmlReport {
        table: table_html,
        legend,
    })
}

/// Renders a standalone HTML5 document holding the table and legend.
pub fn render_html_document(table: &TableModel, options: &HtmlOptions) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer.write_event(Event::DocType(BytesText::from_escaped("html")))?;
    let mut html = BytesStart::new("html");
    html.push_attribute(("lang", "en"));
    writer.write_event(Event::Start(html))?;

    writer.write_event(Event::Start(BytesStart::new("head")))?;
    let mut meta = BytesStart::new("meta");
    meta.push_attribute(("charset", "utf-8"));
    writer.write_event(Event::Empty(meta))?;
    write_text_element(&mut writer, BytesStart::new("title"), &table.caption)?;
    writer.write_event(Event::End(BytesEnd::new("head")))?;

    writer.write_event(Event::Start(BytesStart::new("body")))?;
    write_table(&mut writer, table, options).context("write table HTML")?;
    if let Some(legend) = table
        .legend
        .as_ref()
        .filter(|legend| !legend.is_empty() && !table.is_empty())
    {
        write_legend(&mut writer, legend, options).context("write legend HTML")?;
    }
    writer.write_event(Event::End(BytesEnd::new("body")))?;
    writer.write_event(Event::End(BytesEnd::new("html")))?;

    let mut document = finish(writer)?;
    document.push('\n');
    Ok(document)
}
