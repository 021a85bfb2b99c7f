//! Sort notifications.
//!
//! Every sort emits two notifications carrying the same [`SortEvent`]:
//! - before-sort, synchronously from `Sortable::sort`, before any row moves
//! - after-sort, from the deferred step, once rows and header state are updated
//!
//! Listeners receive the table handle, so a before-sort listener can still
//! inspect or change the table (for example a header's `sort_type`) before
//! the rows are compared.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use log::trace;

use crate::direction::Direction;
use crate::table::{HeaderId, Table};

/// Detail of one sort request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortEvent {
    /// Header being sorted.
    pub header: HeaderId,
    /// Logical index of the header's first column.
    pub column: usize,
    /// Direction chosen for this sort.
    pub direction: Direction,
}

/// When a listener is notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortPhase {
    /// Before rows are reordered.
    Before,
    /// After rows are reordered and header markers updated.
    After,
}

/// Handle returned when registering a listener, used to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

impl ListenerId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

pub(crate) type Listener = Arc<dyn Fn(&SortEvent, &Table) + Send + Sync>;

/// Registered sort listeners.
#[derive(Default)]
pub(crate) struct Listeners {
    entries: RwLock<Vec<(ListenerId, SortPhase, Listener)>>,
}

impl Listeners {
    pub fn add<F>(&self, phase: SortPhase, listener: F) -> ListenerId
    where
        F: Fn(&SortEvent, &Table) + Send + Sync + 'static,
    {
        self.insert(phase, Arc::new(listener))
    }

    pub fn insert(&self, phase: SortPhase, listener: Listener) -> ListenerId {
        let id = ListenerId::new();
        if let Ok(mut guard) = self.entries.write() {
            guard.push((id, phase, listener));
        }
        id
    }

    pub fn remove(&self, id: ListenerId) -> bool {
        let Ok(mut guard) = self.entries.write() else {
            return false;
        };
        let before = guard.len();
        guard.retain(|(entry, _, _)| *entry != id);
        guard.len() != before
    }

    /// Notify every listener of `phase`, in registration order.
    ///
    /// Listeners run without the registry locked, so they may register or
    /// remove listeners themselves. Such changes apply to the next emit.
    pub fn emit(&self, phase: SortPhase, event: &SortEvent, table: &Table) {
        let snapshot: Vec<Listener> = self
            .entries
            .read()
            .map(|g| {
                g.iter()
                    .filter(|(_, p, _)| *p == phase)
                    .map(|(_, _, listener)| Arc::clone(listener))
                    .collect()
            })
            .unwrap_or_default();

        trace!(
            "Emitting {:?} for {} to {} listener(s)",
            phase,
            event.header,
            snapshot.len()
        );
        for listener in snapshot {
            listener(event, table);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|g| g.len()).unwrap_or(0)
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners")
            .field("count", &self.len())
            .finish()
    }
}
