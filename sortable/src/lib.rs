//! Column sorting for tables with a header row and a body of rows.
//!
//! A [`Table`] holds [`Header`]s (which may span several logical columns)
//! and [`Row`]s of [`Cell`]s. A [`Sortable`] attached to the table reorders
//! its rows by one column using the comparator named by the header's
//! `sort_type`, toggles direction on repeated sorts, keeps exactly one header
//! marked active, and notifies listeners before and after every reorder.

pub mod compare;
pub mod config;
pub mod direction;
pub mod error;
pub mod events;
pub mod key;
pub mod table;

mod queue;
mod sortable;

pub use compare::{Comparator, Comparators};
pub use config::{InitialSort, SortConfig, SortOptions, SupersedePolicy};
pub use direction::{Direction, next_direction};
pub use error::SortError;
pub use events::{ListenerId, SortEvent, SortPhase};
pub use sortable::Sortable;
pub use table::{Cell, Header, HeaderId, Row, Table};

pub mod prelude {
    pub use crate::compare::{Comparator, Comparators};
    pub use crate::config::{InitialSort, SortOptions, SupersedePolicy};
    pub use crate::direction::Direction;
    pub use crate::error::SortError;
    pub use crate::events::{SortEvent, SortPhase};
    pub use crate::sortable::Sortable;
    pub use crate::table::{Cell, Header, HeaderId, Row, Table};
}
