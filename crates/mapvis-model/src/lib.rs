#![deny(unsafe_code)]

pub mod color;
pub mod consensus;
pub mod error;
pub mod feature;
pub mod mapping;
pub mod options;
pub mod table;

pub use color::{ColorEntry, ColorSource, HexColor, TextColor};
pub use consensus::{Bucket, ConsensusGroup};
pub use error::{MapvisError, Result};
pub use feature::{Cardinality, Classification, FeatureGroup, FeatureRow, Operator};
pub use mapping::LabelMapping;
pub use options::ReconcileOptions;
pub use table::{
    CELL_OPACITY, CellStyle, Column, ColumnRole, FontStyle, Legend, LegendEntry, LegendSection,
    TableCell, TableModel, TableRow,
};
