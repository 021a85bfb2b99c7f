//! Table model - headers with spans, body rows, and cells.
//!
//! The table provides:
//! - Header cells declaring a comparator tag, a span, and a default direction
//! - Mapping between headers and logical column indices across spans
//! - Body rows whose cells carry displayed text and an optional sort value
//! - Active header tracking with `sorting-asc`/`sorting-desc` markers
//!
//! # Example
//!
//! ```
//! use sortable::{Cell, Header, Row, Table};
//!
//! let table = Table::with_rows(
//!     vec![
//!         Header::new("Born").sort_type("int"),
//!         Header::new("Name").sort_type("string"),
//!     ],
//!     vec![
//!         Row::new(vec![Cell::new("Mar 15, 1986").sort_value("19860315"), "Ada".into()]),
//!         Row::new(vec![Cell::new("Sep 15, 2002").sort_value("20020915"), "Bob".into()]),
//!     ],
//! );
//! assert_eq!(table.len(), 2);
//! ```

mod item;
mod state;

pub use item::{Cell, Header, HeaderId, Row};
pub use state::{Table, validate_headers};
