//! # Export Table Module
//!
//! The row-per-feature quantification table handed to the networking
//! service: feature metadata columns followed by one intensity column per
//! sample.
//!
//! ## Column Layout
//!
//! | Column | Source | Notes |
//! |--------|--------|-------|
//! | id column (default `Row.names`) | feature identifier | always first |
//! | mzmed, mzmin, mzmax | feature m/z range | |
//! | rtmed, rtmin, rtmax | feature RT range | seconds |
//! | npeaks | grouped peak count | only when any feature has it |
//! | auxiliary fields | feature metadata | union, first-seen order |
//! | one per sample | integrated area | missing when not recovered |

mod builder;
mod writer;


pub use builder::{FeatureTableBuilder, DEFAULT_ID_COLUMN};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Metadata columns every table carries, in order
pub const RANGE_COLUMNS: [&str; 6] = ["mzmed", "mzmin", "mzmax", "rtmed", "rtmin", "rtmax"];

/// Role of a column in the export table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    /// Feature metadata (ranges, peak counts, auxiliary fields)
    Metadata,
    /// Integrated intensity in one sample
    Sample,
}

/// A non-identifier column of the export table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Header text
    pub name: String,
    /// Column role
    pub kind: ColumnKind,
}

impl Column {
    /// Create a metadata column
    pub fn metadata(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Metadata,
        }
    }

    /// Create a sample intensity column
    pub fn sample(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Sample,
        }
    }
}

/// A single populated cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    /// Floating point value (ranges, intensities)
    Number(f64),
    /// Integer count
    Count(u32),
    /// Free text
    Text(String),
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Count(v) => write!(f, "{}", v),
            CellValue::Text(v) => f.write_str(v),
        }
    }
}

/// One feature's row. `cells` aligns with [`ExportTable::columns`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Feature identifier
    pub feature_id: String,
    /// Cell values; `None` is a missing value
    pub cells: Vec<Option<CellValue>>,
}

/// Row-per-feature export table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportTable {
    id_column: String,
    columns: Vec<Column>,
    rows: Vec<TableRow>,
}

impl ExportTable {
    /// Create an empty table with a fixed column schema
    pub fn new(id_column: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            id_column: id_column.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. The cell count must match the schema.
    pub fn push_row(&mut self, row: TableRow) -> Result<(), ExportError> {
        if row.cells.len() != self.columns.len() {
            return Err(ExportError::InvalidValue {
                column: self.id_column.clone(),
                row: self.rows.len() + 1,
                value: format!(
                    "{} has {} cells, expected {}",
                    row.feature_id,
                    row.cells.len(),
                    self.columns.len()
                ),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    /// Header of the identifier column
    pub fn id_column(&self) -> &str {
        &self.id_column
    }

    /// Non-identifier columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Full header row, identifier column first
    pub fn header(&self) -> Vec<&str> {
        std::iter::once(self.id_column.as_str())
            .chain(self.columns.iter().map(|c| c.name.as_str()))
            .collect()
    }

    /// Names of the sample columns in order
    pub fn sample_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.kind == ColumnKind::Sample)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Rows in order
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature identifiers in row order
    pub fn feature_ids(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.feature_id.as_str())
    }

    /// Find a row by feature identifier
    pub fn row(&self, feature_id: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.feature_id == feature_id)
    }

    /// Look up a cell by feature identifier and column name
    pub fn cell(&self, feature_id: &str, column: &str) -> Option<&CellValue> {
        let idx = self.columns.iter().position(|c| c.name == column)?;
        self.row(feature_id)?.cells.get(idx)?.as_ref()
    }

    /// Copy of the table keeping only rows matching `predicate`, in order
    pub fn filter_rows<F>(&self, mut predicate: F) -> ExportTable
    where
        F: FnMut(&TableRow) -> bool,
    {
        ExportTable {
            id_column: self.id_column.clone(),
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|&r| predicate(r)).cloned().collect(),
        }
    }
}
