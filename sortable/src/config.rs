//! Engine configuration.
//!
//! Callers describe what they want to change in [`SortOptions`]; the engine
//! resolves it against [`SortConfig::default`] with [`SortConfig::extend`].
//! Options that are set replace the default outright, except comparators,
//! which are merged tag by tag so custom tags sit next to the built-ins.
//! Listeners given in the options are registered before the initial sort,
//! so they see both of its notifications.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::compare::{Comparator, Comparators};
use crate::events::{Listener, SortEvent, SortPhase};
use crate::table::Table;

/// Column sorted once when the engine is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InitialSort {
    /// Leave the rows in their original order.
    #[default]
    Disabled,
    /// Sort this logical column (0 included) with the header's usual
    /// direction rules.
    Column(usize),
}

/// What happens to a queued sort when a newer sort is requested before it ran.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SupersedePolicy {
    /// Run every queued sort in request order. Each emits its own
    /// notifications and the last one decides the final row order.
    #[default]
    RunAll,
    /// Drop a queued sort if a newer one was requested. Dropped sorts do not
    /// touch the table and emit no after-sort notification.
    DiscardStale,
}

/// Resolved engine configuration.
#[derive(Debug, Clone)]
pub struct SortConfig {
    /// Column sorted at construction.
    pub initial_sort: InitialSort,
    /// Comparators available to headers, keyed by `sort_type`.
    pub comparators: Comparators,
    /// Handling of overlapping sort requests.
    pub supersede: SupersedePolicy,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            initial_sort: InitialSort::Disabled,
            comparators: Comparators::builtin(),
            supersede: SupersedePolicy::RunAll,
        }
    }
}

impl SortConfig {
    /// Apply caller options on top of this configuration.
    pub fn extend(mut self, options: SortOptions) -> Self {
        if let Some(initial_sort) = options.initial_sort {
            self.initial_sort = initial_sort;
        }
        if let Some(supersede) = options.supersede {
            self.supersede = supersede;
        }
        self.comparators.merge(options.comparators);
        self
    }
}

/// Caller-supplied configuration overrides.
///
/// # Examples
///
/// ```
/// use sortable::{InitialSort, SortConfig, SortOptions};
///
/// let options = SortOptions::new()
///     .initial_sort(0)
///     .comparator("length", |a: &str, b: &str| a.len().cmp(&b.len()));
///
/// let config = SortConfig::default().extend(options);
/// assert_eq!(config.initial_sort, InitialSort::Column(0));
/// assert!(config.comparators.contains("length"));
/// assert!(config.comparators.contains("int"));
/// ```
#[derive(Clone, Default)]
pub struct SortOptions {
    /// Replaces the default initial sort when set.
    pub initial_sort: Option<InitialSort>,
    /// Merged over the built-in comparators.
    pub comparators: Comparators,
    /// Replaces the default supersede policy when set.
    pub supersede: Option<SupersedePolicy>,
    /// Registered on the engine before the initial sort, in this order.
    listeners: Vec<(SortPhase, Listener)>,
}

impl std::fmt::Debug for SortOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SortOptions")
            .field("initial_sort", &self.initial_sort)
            .field("comparators", &self.comparators)
            .field("supersede", &self.supersede)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl SortOptions {
    /// Create empty options (all defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort a logical column once the engine is constructed.
    pub fn initial_sort(mut self, column: usize) -> Self {
        self.initial_sort = Some(InitialSort::Column(column));
        self
    }

    /// Explicitly disable the initial sort.
    pub fn no_initial_sort(mut self) -> Self {
        self.initial_sort = Some(InitialSort::Disabled);
        self
    }

    /// Register or override a comparator tag.
    pub fn comparator<F>(mut self, tag: impl Into<String>, f: F) -> Self
    where
        F: Fn(&str, &str) -> Ordering + Send + Sync + 'static,
    {
        self.comparators.insert(tag, Comparator::new(f));
        self
    }

    /// Merge a whole registry of comparators.
    pub fn comparators(mut self, comparators: Comparators) -> Self {
        self.comparators.merge(comparators);
        self
    }

    /// Set the supersede policy.
    pub fn supersede(mut self, policy: SupersedePolicy) -> Self {
        self.supersede = Some(policy);
        self
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    /// Register a before-sort listener when the engine is constructed.
    ///
    /// Unlike [`Sortable::on_before_sort`](crate::Sortable::on_before_sort),
    /// this listener is in place for the initial sort.
    pub fn on_before_sort<F>(mut self, listener: F) -> Self
    where
        F: Fn(&SortEvent, &Table) + Send + Sync + 'static,
    {
        self.listeners.push((SortPhase::Before, Arc::new(listener)));
        self
    }

    /// Register an after-sort listener when the engine is constructed.
    pub fn on_after_sort<F>(mut self, listener: F) -> Self
    where
        F: Fn(&SortEvent, &Table) + Send + Sync + 'static,
    {
        self.listeners.push((SortPhase::After, Arc::new(listener)));
        self
    }

    pub(crate) fn take_listeners(&mut self) -> Vec<(SortPhase, Listener)> {
        std::mem::take(&mut self.listeners)
    }
}
