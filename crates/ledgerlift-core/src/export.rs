use crate::error::LiftError;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// One cell of an export table.
///
/// Empty is a real value: a document-scoped total that was never found
/// stays Empty all the way to the sink (JSON null, blank CSV cell) instead
/// of being defaulted to zero. The Ord impl exists so cell tuples can key
/// a BTreeMap during aggregation, which makes summary row order
/// deterministic.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Empty,
    Int(i64),
    Decimal(Decimal),
    Text(String),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Cell {
        Cell::Text(s.into())
    }

    /// Empty for None, Decimal otherwise.
    pub fn opt_decimal(v: Option<Decimal>) -> Cell {
        match v {
            Some(d) => Cell::Decimal(d),
            None => Cell::Empty,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Int(v) => write!(f, "{v}"),
            Cell::Decimal(v) => write!(f, "{v}"),
            Cell::Text(v) => write!(f, "{v}"),
        }
    }
}

/// A named table with a fixed column order, as handed to an export sink.
#[derive(Debug, Clone, Serialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(name: impl Into<String>, columns: &[&str]) -> Table {
        Table {
            name: name.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row. The row must have one cell per column.
    pub fn push_row(&mut self, row: Vec<Cell>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == column)
    }

    fn require_column(&self, column: &str) -> Result<usize, LiftError> {
        self.column_index(column)
            .ok_or_else(|| LiftError::UnknownColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Derive a sub-table keeping only rows whose `column` cell equals
    /// `value`. Used for the Credits/Debits views over the transaction
    /// table; the subsets are filtered from the primary table, never
    /// recomputed from the source lines.
    pub fn filter_eq(&self, name: &str, column: &str, value: &Cell) -> Result<Table, LiftError> {
        let idx = self.require_column(column)?;
        Ok(Table {
            name: name.to_string(),
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| &row[idx] == value)
                .cloned()
                .collect(),
        })
    }

    pub(crate) fn resolve_columns(&self, columns: &[&str]) -> Result<Vec<usize>, LiftError> {
        columns.iter().map(|c| self.require_column(c)).collect()
    }
}
