//! Sort key extraction and row ordering.

use crate::compare::Comparator;
use crate::direction::Direction;
use crate::table::Row;

/// Get the value compared for a row at a logical column.
///
/// The cell's sort value wins over its displayed text. Returns `None` when
/// the row has no cell at `column`.
pub fn sort_key(row: &Row, column: usize) -> Option<&str> {
    row.cell(column).map(|cell| cell.sort_key())
}

/// Order rows by their key at `column`.
///
/// Rows without a cell at `column` are dropped from the result. The sort is
/// stable, and a descending order is the ascending result reversed as a
/// whole, so rows with equal keys also swap their relative order.
pub fn order_rows(
    rows: Vec<Row>,
    column: usize,
    comparator: &Comparator,
    direction: Direction,
) -> Vec<Row> {
    let mut keyed: Vec<(String, Row)> = rows
        .into_iter()
        .filter_map(|row| {
            let key = sort_key(&row, column)?.to_owned();
            Some((key, row))
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| comparator.compare(a, b));
    if direction == Direction::Desc {
        keyed.reverse();
    }

    keyed.into_iter().map(|(_, row)| row).collect()
}
