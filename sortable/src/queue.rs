//! Queue for the deferred half of a sort.
//!
//! `Sortable::sort` emits the before-sort notification and then enqueues a
//! [`PendingSort`] instead of reordering rows immediately. The host drains
//! the queue when it is ready, either synchronously or by awaiting it, so
//! before-sort listeners have always run to completion before rows move.

use tokio::sync::{Mutex, mpsc};

use crate::events::SortEvent;

/// The deferred part of one sort request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingSort {
    /// Generation stamped when the sort was requested.
    pub generation: u64,
    /// Detail shared with both notifications.
    pub event: SortEvent,
    /// Comparator tag the header declared when the sort was requested.
    pub sort_type: String,
}

/// FIFO of pending sorts.
#[derive(Debug)]
pub(crate) struct SortQueue {
    tx: mpsc::UnboundedSender<PendingSort>,
    rx: Mutex<mpsc::UnboundedReceiver<PendingSort>>,
}

impl SortQueue {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Enqueue a pending sort.
    ///
    /// Non-blocking. The receiver lives as long as the queue, so sending
    /// cannot fail while `self` exists.
    pub fn push(&self, pending: PendingSort) {
        let _ = self.tx.send(pending);
    }

    /// Run `f` on every queued sort, oldest first.
    ///
    /// Sorts enqueued while draining are run in the same pass. Returns 0
    /// without running anything when the queue is already being drained,
    /// which makes a nested drain from inside a listener a no-op.
    pub fn drain<F>(&self, mut f: F) -> usize
    where
        F: FnMut(PendingSort),
    {
        let Ok(mut rx) = self.rx.try_lock() else {
            return 0;
        };
        let mut count = 0;
        while let Ok(pending) = rx.try_recv() {
            f(pending);
            count += 1;
        }
        count
    }

    /// Wait for the next queued sort.
    pub async fn next(&self) -> Option<PendingSort> {
        self.rx.lock().await.recv().await
    }

    /// Number of sorts waiting to run.
    pub fn len(&self) -> usize {
        self.rx.try_lock().map(|rx| rx.len()).unwrap_or(0)
    }
}
