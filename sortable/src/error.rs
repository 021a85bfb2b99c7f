//! Error types for table construction and sorting.

use crate::table::HeaderId;

/// Errors reported by the sort engine and the table it operates on.
///
/// Only structural problems are errors. Sorting an unsortable header or an
/// index no header covers is defined inaction and returns `Ok(false)` instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SortError {
    /// The table has no header row to resolve columns against.
    #[error("Table has no header cells")]
    NoHeaders,

    /// A header declares a span of zero logical columns.
    #[error("Header {header} spans zero columns")]
    ZeroSpan { header: HeaderId },

    /// More than one header is declared as the active sort column.
    #[error("Headers {first} and {second} are both marked active")]
    MultipleActive { first: HeaderId, second: HeaderId },

    /// A header was not found among the table's headers.
    #[error("Header {0} not found in table")]
    HeaderNotFound(HeaderId),

    /// A direction tag other than `asc` or `desc`.
    #[error("Invalid sort direction '{0}', expected 'asc' or 'desc'")]
    InvalidDirection(String),
}

impl SortError {
    /// Creates a new invalid direction error.
    pub fn invalid_direction(tag: impl Into<String>) -> Self {
        Self::InvalidDirection(tag.into())
    }
}
