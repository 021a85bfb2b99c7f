//! The sort engine.

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::config::{InitialSort, SortConfig, SortOptions, SupersedePolicy};
use crate::direction::{Direction, next_direction};
use crate::error::SortError;
use crate::events::{ListenerId, Listeners, SortEvent, SortPhase};
use crate::key::order_rows;
use crate::queue::{PendingSort, SortQueue};
use crate::table::{Header, HeaderId, Table, validate_headers};

/// Sorts the rows of one table by one column at a time.
///
/// A sort happens in two halves. [`sort`](Sortable::sort) resolves the
/// column and direction, notifies before-sort listeners, and queues the
/// reorder. The host later drives the queue with
/// [`run_pending`](Sortable::run_pending) or
/// [`next_tick`](Sortable::next_tick), which reorders the rows, marks the
/// header active, and notifies after-sort listeners.
///
/// Each table gets its own engine; engines share nothing with each other.
///
/// # Example
///
/// ```
/// use sortable::{Direction, Header, Row, SortOptions, Sortable, Table};
///
/// let table = Table::with_rows(
///     vec![Header::new("Value").sort_type("int")],
///     ["95", "-53", "2", "195", "15"].map(|v| Row::from_texts([v])).to_vec(),
/// );
/// let sortable = Sortable::new(&table, SortOptions::new()).unwrap();
///
/// sortable.sort_column(0, None).unwrap();
/// sortable.run_pending();
///
/// assert_eq!(table.column_texts(0), vec!["-53", "2", "15", "95", "195"]);
/// assert_eq!(table.active().map(|(_, d)| d), Some(Direction::Asc));
/// ```
#[derive(Debug)]
pub struct Sortable {
    table: Table,
    config: SortConfig,
    listeners: Listeners,
    queue: SortQueue,
    /// Generation of the most recent sort request.
    generation: AtomicU64,
}

impl Sortable {
    /// Attach an engine to a table.
    ///
    /// Fails without returning an engine if the table has no headers, a
    /// header spans zero columns, or more than one header is marked active.
    /// Listeners given with [`SortOptions::on_before_sort`] and
    /// [`SortOptions::on_after_sort`] are registered first. A configured
    /// initial sort is then requested, so those listeners see its before-sort
    /// notification here and its after-sort notification when the queue is
    /// next driven.
    pub fn new(table: &Table, mut options: SortOptions) -> Result<Self, SortError> {
        validate_headers(&table.headers())?;

        let listeners = options.take_listeners();
        let config = SortConfig::default().extend(options);
        let sortable = Self {
            table: table.clone(),
            config,
            listeners: Listeners::default(),
            queue: SortQueue::new(),
            generation: AtomicU64::new(0),
        };
        debug!(
            "Sortable attached to table with {} header(s), {} column(s), {} row(s)",
            table.header_count(),
            table.column_count(),
            table.len()
        );

        for (phase, listener) in listeners {
            sortable.listeners.insert(phase, listener);
        }
        if let InitialSort::Column(column) = sortable.config.initial_sort {
            sortable.sort_column(column, None)?;
        }
        Ok(sortable)
    }

    /// Get the table this engine sorts.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Get the resolved configuration.
    pub fn config(&self) -> &SortConfig {
        &self.config
    }

    /// Get the header covering a logical column.
    pub fn header_at(&self, column: usize) -> Option<Header> {
        self.table.header_at(column)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    /// Sort by the header covering a logical column.
    ///
    /// Returns `Ok(false)` and does nothing if no header covers `column`.
    pub fn sort_column(
        &self,
        column: usize,
        direction: Option<Direction>,
    ) -> Result<bool, SortError> {
        let Some(header) = self.table.header_at(column) else {
            trace!("No header covers column {}, ignoring sort", column);
            return Ok(false);
        };
        self.sort(header.id(), direction)
    }

    /// Sort by a header.
    ///
    /// Without an explicit direction, an active header flips direction and an
    /// inactive one uses its default direction, else ascending.
    ///
    /// Returns `Ok(false)` and emits nothing if the header has no `sort_type`.
    /// Otherwise before-sort listeners have run and the reorder is queued when
    /// this returns `Ok(true)`.
    pub fn sort(
        &self,
        header: HeaderId,
        direction: Option<Direction>,
    ) -> Result<bool, SortError> {
        let header = self
            .table
            .header(header)
            .ok_or(SortError::HeaderNotFound(header))?;
        let Some(sort_type) = header.sort_type.clone() else {
            trace!("Header {} is not sortable, ignoring sort", header.id());
            return Ok(false);
        };

        let column = self.table.logical_index_of(header.id())?;
        let direction = next_direction(&header, direction);
        let event = SortEvent {
            header: header.id(),
            column,
            direction,
        };
        debug!(
            "Sort requested: column {} ({}) {} as '{}'",
            column, header.label, direction, sort_type
        );

        self.listeners.emit(SortPhase::Before, &event, &self.table);

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.queue.push(PendingSort {
            generation,
            event,
            sort_type,
        });
        Ok(true)
    }

    /// Run every queued sort, oldest first.
    ///
    /// Returns the number of queued sorts taken off the queue, including any
    /// dropped as stale. Calling this from inside a listener while the queue is
    /// already being drained returns 0; the outer drain picks up new work.
    pub fn run_pending(&self) -> usize {
        self.queue.drain(|pending| {
            self.complete(pending);
        })
    }

    /// Wait for the next queued sort and run it.
    ///
    /// Pending forever while nothing is queued, so hosts typically select on
    /// it alongside their other event sources. Returns `false` only if the
    /// queue has closed.
    pub async fn next_tick(&self) -> bool {
        match self.queue.next().await {
            Some(pending) => {
                self.complete(pending);
                true
            }
            None => false,
        }
    }

    /// Number of sorts waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// The deferred half of a sort: reorder, mark, notify.
    ///
    /// Returns `false` if the sort was dropped as stale.
    fn complete(&self, pending: PendingSort) -> bool {
        let PendingSort {
            generation,
            event,
            sort_type,
        } = pending;

        if self.config.supersede == SupersedePolicy::DiscardStale
            && generation != self.generation.load(Ordering::SeqCst)
        {
            debug!(
                "Dropping stale sort of column {} (generation {})",
                event.column, generation
            );
            return false;
        }

        // Before-sort listeners may have retagged the header.
        let sort_type = self
            .table
            .header(event.header)
            .and_then(|h| h.sort_type)
            .unwrap_or(sort_type);
        let comparator = self.config.comparators.resolve(&sort_type);

        let rows = self.table.rows();
        let total = rows.len();
        let ordered = order_rows(rows, event.column, &comparator, event.direction);
        debug!(
            "Sorted column {} {}: {} row(s), {} without a cell dropped",
            event.column,
            event.direction,
            ordered.len(),
            total - ordered.len()
        );

        self.table.set_rows(ordered);
        self.table.mark_active(event.header, event.direction);

        self.listeners.emit(SortPhase::After, &event, &self.table);
        true
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a listener notified before rows are reordered.
    pub fn on_before_sort<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SortEvent, &Table) + Send + Sync + 'static,
    {
        self.listeners.add(SortPhase::Before, listener)
    }

    /// Register a listener notified after rows are reordered.
    pub fn on_after_sort<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&SortEvent, &Table) + Send + Sync + 'static,
    {
        self.listeners.add(SortPhase::After, listener)
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}
