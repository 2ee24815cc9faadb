use anyhow::{Context, Result};

use mapvis_model::TableModel;

/// Pretty JSON of the full table model: columns, styled cells and legend.
pub fn render_json(table: &TableModel) -> Result<String> {
    let mut json = serde_json::to_string_pretty(table).context("serialize table model")?;
    json.push('\n');
    Ok(json)
}
