//! Shared table state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::direction::Direction;
use crate::error::SortError;

use super::item::{Header, HeaderId, Row};

/// Internal state for a table.
#[derive(Debug)]
struct TableInner {
    /// Header cells in declaration order.
    headers: Vec<Header>,
    /// Prefix sum over header spans.
    /// offsets[i] = logical index of the first column covered by headers[i].
    offsets: Vec<usize>,
    /// Sum of all header spans.
    total_span: usize,
    /// Body rows in display order.
    rows: Vec<Row>,
}

impl TableInner {
    fn new(headers: Vec<Header>, rows: Vec<Row>) -> Self {
        let (offsets, total_span) = Self::calculate_offsets(&headers);
        Self {
            headers,
            offsets,
            total_span,
            rows,
        }
    }

    /// Calculate the starting logical column of each header.
    fn calculate_offsets(headers: &[Header]) -> (Vec<usize>, usize) {
        let mut offsets = Vec::with_capacity(headers.len());
        let mut start = 0;
        for header in headers {
            offsets.push(start);
            start += header.span;
        }
        (offsets, start)
    }

    fn recalculate(&mut self) {
        let (offsets, total_span) = Self::calculate_offsets(&self.headers);
        self.offsets = offsets;
        self.total_span = total_span;
    }

    fn position(&self, id: HeaderId) -> Option<usize> {
        self.headers.iter().position(|h| h.id() == id)
    }

    fn position_at(&self, index: usize) -> Option<usize> {
        if index >= self.total_span {
            return None;
        }
        // First header starting after `index`, minus one.
        let after = self.offsets.partition_point(|&start| start <= index);
        after.checked_sub(1)
    }
}

/// Check that a header row is well formed.
///
/// A header row needs at least one header, every span must cover at least
/// one column, and at most one header may be active.
pub fn validate_headers(headers: &[Header]) -> Result<(), SortError> {
    if headers.is_empty() {
        return Err(SortError::NoHeaders);
    }
    if let Some(header) = headers.iter().find(|h| h.span == 0) {
        return Err(SortError::ZeroSpan { header: header.id() });
    }
    let mut active = headers.iter().filter(|h| h.is_active());
    if let (Some(first), Some(second)) = (active.next(), active.next()) {
        return Err(SortError::MultipleActive {
            first: first.id(),
            second: second.id(),
        });
    }
    Ok(())
}

/// A table of headers and body rows.
///
/// `Table` is a handle: clones share the same headers and rows, so the host
/// that renders the table and the engine that sorts it see the same state.
///
/// Header spans are folded into a prefix sum whenever headers change, so
/// mapping between headers and logical column indices never walks the
/// header row.
///
/// # Examples
///
/// ```
/// use sortable::{Header, Row, Table};
///
/// let table = Table::with_rows(
///     vec![Header::new("Name").span(2), Header::new("Age").sort_type("int")],
///     vec![Row::from_texts(["Ada", "Lovelace", "36"])],
/// );
/// assert_eq!(table.column_count(), 3);
/// assert_eq!(table.header_at(2).map(|h| h.label), Some("Age".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Table {
    inner: Arc<RwLock<TableInner>>,
    /// Set whenever rows or header state change.
    dirty: Arc<AtomicBool>,
}

impl Table {
    /// Create a table with headers and no rows.
    pub fn new(headers: Vec<Header>) -> Self {
        Self::with_rows(headers, Vec::new())
    }

    /// Create a table with headers and initial rows.
    pub fn with_rows(headers: Vec<Header>, rows: Vec<Row>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(TableInner::new(headers, rows))),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    // -------------------------------------------------------------------------
    // Header access
    // -------------------------------------------------------------------------

    /// Get the headers in declaration order.
    pub fn headers(&self) -> Vec<Header> {
        self.inner
            .read()
            .map(|g| g.headers.clone())
            .unwrap_or_default()
    }

    /// Get a header by ID.
    pub fn header(&self, id: HeaderId) -> Option<Header> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.position(id).map(|i| g.headers[i].clone()))
    }

    /// Get the number of header cells.
    pub fn header_count(&self) -> usize {
        self.inner.read().map(|g| g.headers.len()).unwrap_or(0)
    }

    /// Get the number of logical columns (sum of header spans).
    pub fn column_count(&self) -> usize {
        self.inner.read().map(|g| g.total_span).unwrap_or(0)
    }

    /// Replace the header row.
    pub fn set_headers(&self, headers: Vec<Header>) -> Result<(), SortError> {
        validate_headers(&headers)?;
        if let Ok(mut guard) = self.inner.write() {
            guard.headers = headers;
            guard.recalculate();
            self.dirty.store(true, Ordering::SeqCst);
        }
        Ok(())
    }

    /// Modify a header's declarations in place.
    ///
    /// The header keeps its ID even if `f` replaces it wholesale. Spans are
    /// re-folded afterwards. A span of zero, or activating the header while
    /// another one is active, is rejected and leaves the header unchanged.
    pub fn update_header<F>(&self, id: HeaderId, f: F) -> Result<(), SortError>
    where
        F: FnOnce(&mut Header),
    {
        let Ok(mut guard) = self.inner.write() else {
            return Ok(());
        };
        let index = guard.position(id).ok_or(SortError::HeaderNotFound(id))?;

        let mut header = guard.headers[index].clone();
        f(&mut header);
        header.set_id(id);
        if header.span == 0 {
            return Err(SortError::ZeroSpan { header: id });
        }
        if header.is_active() {
            let other = guard
                .headers
                .iter()
                .enumerate()
                .find(|(i, h)| *i != index && h.is_active());
            if let Some((other_index, other)) = other {
                let (first, second) = if other_index < index {
                    (other.id(), id)
                } else {
                    (id, other.id())
                };
                return Err(SortError::MultipleActive { first, second });
            }
        }

        let span_changed = header.span != guard.headers[index].span;
        guard.headers[index] = header;
        if span_changed {
            guard.recalculate();
        }
        self.dirty.store(true, Ordering::SeqCst);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Column resolution
    // -------------------------------------------------------------------------

    /// Get the logical index of the first column a header covers.
    ///
    /// Fails if the header does not belong to this table.
    pub fn logical_index_of(&self, id: HeaderId) -> Result<usize, SortError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| SortError::HeaderNotFound(id))?;
        guard
            .position(id)
            .map(|i| guard.offsets[i])
            .ok_or(SortError::HeaderNotFound(id))
    }

    /// Get the header covering a logical column.
    ///
    /// Returns `None` when the index is past the last header's span.
    pub fn header_at(&self, index: usize) -> Option<Header> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.position_at(index).map(|i| g.headers[i].clone()))
    }

    /// Get the active header and its direction.
    pub fn active(&self) -> Option<(HeaderId, Direction)> {
        self.inner.read().ok().and_then(|g| {
            g.headers
                .iter()
                .find_map(|h| h.active_direction().map(|d| (h.id(), d)))
        })
    }

    /// Mark `id` as the active header and clear every other header.
    pub(crate) fn mark_active(&self, id: HeaderId, direction: Direction) {
        if let Ok(mut guard) = self.inner.write() {
            for header in guard.headers.iter_mut() {
                let state = (header.id() == id).then_some(direction);
                header.set_active(state);
            }
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Row access
    // -------------------------------------------------------------------------

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get a row by position.
    pub fn row(&self, index: usize) -> Option<Row> {
        self.inner
            .read()
            .ok()
            .and_then(|g| g.rows.get(index).cloned())
    }

    /// Get all rows in display order.
    pub fn rows(&self) -> Vec<Row> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    /// Get the displayed text of every row's cell at a logical column.
    ///
    /// Rows without a cell there are skipped.
    pub fn column_texts(&self, column: usize) -> Vec<String> {
        self.inner
            .read()
            .map(|g| {
                g.rows
                    .iter()
                    .filter_map(|row| row.cell(column).map(|c| c.text.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Row mutation
    // -------------------------------------------------------------------------

    /// Replace all rows.
    pub fn set_rows(&self, rows: Vec<Row>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Append a row.
    pub fn push_row(&self, row: Row) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows.push(row);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Remove all rows.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows.clear();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    /// Check whether the table changed since the last `take_dirty`.
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag, returning its previous value.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }
}
