//! Core data structures and types for the Kubus Data Cube converter

use oxigraph::model::NamedNode;
use std::sync::Arc;

/// One CSV row as read from the row stream.
/// The header is shared by every row of a stream; values are kept in header order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRecord {
    header: Arc<Vec<String>>,
    values: Vec<String>,
}

impl RowRecord {
    /// Build a row from a shared header and its cells.
    /// Missing trailing cells are read as empty strings, extra cells are dropped.
    pub fn new(header: Arc<Vec<String>>, mut values: Vec<String>) -> Self {
        values.resize(header.len(), String::new());
        Self { header, values }
    }

    /// Build a row with its own header from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let (header, values): (Vec<String>, Vec<String>) =
            pairs.into_iter().map(|(k, v)| (k.into(), v.into())).unzip();
        Self { header: Arc::new(header), values }
    }

    /// Raw cell value of `column`, if the column exists
    pub fn get(&self, column: &str) -> Option<&str> {
        self.header.iter().position(|h| h == column).map(|i| self.values[i].as_str())
    }

    /// Cell value of `column` when present and not blank
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        self.get(column).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn contains(&self, column: &str) -> bool {
        self.header.iter().any(|h| h == column)
    }

    pub fn columns(&self) -> &[String] {
        &self.header
    }

    /// Iterate `(column, value)` pairs in header order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.header.iter().map(String::as_str).zip(self.values.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
    }
}

/// Role of a DSD component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentRole {
    Dimension,
    Measure,
}

/// One component of the inferred Data Structure Definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Source column name, or `refArea` / `refPeriod` for the synthetic dimensions
    pub name: String,
    pub role: ComponentRole,
    /// Position in the DSD, starting at 0
    pub order: u32,
    /// Property carrying the observation value
    pub predicate: NamedNode,
    /// The `qb:ComponentSpecification` node
    pub component: NamedNode,
    pub label: String,
    /// True for the refArea / refPeriod components that are not backed by a single column
    pub synthetic: bool,
}

pub mod descriptor;
pub mod encoding;
pub use descriptor::DatasetDescriptor;
pub use encoding::*;
