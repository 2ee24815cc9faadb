use serde::{Deserialize, Serialize};

use crate::{Bucket, HexColor, TextColor};

/// Opacity renderers apply to every cell background.
pub const CELL_OPACITY: f64 = 0.5;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Bold,
    Italic,
}

/// Presentation hints for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellStyle {
    pub background: HexColor,
    pub text: TextColor,
    pub font: FontStyle,
}

/// What a column holds; drives the per-cell font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Labels,
    Consensus,
    Operator,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub role: ColumnRole,
}

impl Column {
    pub fn new(name: impl Into<String>, role: ColumnRole) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }
}

/// A cell holding a vertical stack of values. An empty stack is a blank cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub values: Vec<String>,
    pub style: CellStyle,
}

impl TableCell {
    pub fn is_blank(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }

    /// Joins the stack with `separator`.
    pub fn text(&self, separator: &str) -> String {
        self.values.join(separator)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub consensus: String,
    /// Set for celltype tables only.
    pub bucket: Option<Bucket>,
    pub cells: Vec<TableCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: HexColor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendSection {
    pub title: String,
    /// Sorted by label.
    pub entries: Vec<LegendEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legend {
    pub sections: Vec<LegendSection>,
}

impl Legend {
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(|section| section.entries.is_empty())
    }

    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|section| section.entries.len()).sum()
    }
}

/// The ordered grid both reconcilers produce for a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableModel {
    pub caption: String,
    pub columns: Vec<Column>,
    pub rows: Vec<TableRow>,
    pub legend: Option<Legend>,
    /// Renderers never show a row index when this is set.
    pub hide_index: bool,
}

impl TableModel {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Consensus labels in row order.
    pub fn consensus_labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.consensus.as_str()).collect()
    }
}
