//! Header, row, and cell types.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::direction::Direction;

/// Unique identifier for a header cell.
///
/// Assigned when the header is created and kept across clones, so a header
/// taken from one table is never found in another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HeaderId(usize);

impl HeaderId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for HeaderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__header_{}", self.0)
    }
}

/// A header cell.
///
/// Headers declare how their column sorts: a comparator tag, how many logical
/// columns they cover, and an optional default direction. The engine writes
/// the active direction; everything else is declarative.
///
/// # Examples
///
/// ```
/// use sortable::{Direction, Header};
///
/// let headers = vec![
///     Header::new("Name").span(2),
///     Header::new("Age").sort_type("int"),
///     Header::new("Score").sort_type("float").default_direction(Direction::Desc),
/// ];
/// assert!(!headers[0].is_sortable());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Header {
    id: HeaderId,
    /// Display text.
    pub label: String,
    /// Comparator tag. `None` means the column is not sortable.
    pub sort_type: Option<String>,
    /// Number of logical columns covered.
    pub span: usize,
    /// Direction used when the header is sorted while inactive.
    pub default_direction: Option<Direction>,
    active: Option<Direction>,
}

impl Header {
    /// Create a header covering one column, not sortable.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: HeaderId::new(),
            label: label.into(),
            sort_type: None,
            span: 1,
            default_direction: None,
            active: None,
        }
    }

    /// Make the column sortable with the given comparator tag.
    pub fn sort_type(mut self, tag: impl Into<String>) -> Self {
        self.sort_type = Some(tag.into());
        self
    }

    /// Set the number of logical columns this header covers.
    pub fn span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    /// Set the direction used when this header is first sorted.
    pub fn default_direction(mut self, direction: Direction) -> Self {
        self.default_direction = Some(direction);
        self
    }

    /// Declare the table as already sorted by this header.
    ///
    /// The next undirected sort of this header flips the direction.
    pub fn active(mut self, direction: Direction) -> Self {
        self.active = Some(direction);
        self
    }

    /// Get the header ID.
    pub fn id(&self) -> HeaderId {
        self.id
    }

    /// Whether the header has a comparator tag.
    pub fn is_sortable(&self) -> bool {
        self.sort_type.is_some()
    }

    /// Get the direction this header is currently sorted in, if active.
    pub fn active_direction(&self) -> Option<Direction> {
        self.active
    }

    /// Whether this header is the active sort column.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Marker class for the active direction (`sorting-asc`/`sorting-desc`).
    pub fn marker(&self) -> Option<&'static str> {
        self.active.map(Direction::marker_class)
    }

    pub(crate) fn set_active(&mut self, direction: Option<Direction>) {
        self.active = direction;
    }

    pub(crate) fn set_id(&mut self, id: HeaderId) {
        self.id = id;
    }
}

/// A body cell: displayed text plus an optional sort value override.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cell {
    /// Displayed text.
    pub text: String,
    /// Value compared instead of `text` when present.
    pub sort_value: Option<String>,
}

impl Cell {
    /// Create a cell that sorts by its displayed text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sort_value: None,
        }
    }

    /// Sort by `value` instead of the displayed text.
    ///
    /// Useful when the display is not machine-sortable, e.g. a date shown
    /// as "Mar 15, 1986" sorted by `19860315`.
    pub fn sort_value(mut self, value: impl Into<String>) -> Self {
        self.sort_value = Some(value.into());
        self
    }

    /// The value compared for this cell.
    pub fn sort_key(&self) -> &str {
        self.sort_value.as_deref().unwrap_or(&self.text)
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Cell::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Cell::new(text)
    }
}

/// A body row, one cell per logical column.
///
/// Rows may be shorter than the table's column count. A short row has no
/// cell at the missing columns and is left out of sorts on them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Row {
    /// The cells, in logical column order.
    pub cells: Vec<Cell>,
}

impl Row {
    /// Create a row from cells.
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Create a row of plain text cells.
    pub fn from_texts<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cells: texts.into_iter().map(Cell::new).collect(),
        }
    }

    /// Get the cell at a logical column.
    pub fn cell(&self, column: usize) -> Option<&Cell> {
        self.cells.get(column)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
