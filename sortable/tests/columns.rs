//! Tests for mapping between headers and logical columns.

use sortable::{Header, Row, SortError, SortOptions, Sortable, Table};

fn colspan_table() -> Table {
    Table::with_rows(
        vec![
            Header::new("Name").span(2),
            Header::new("Letter").sort_type("string"),
            Header::new("Notes").span(3),
            Header::new("Count").sort_type("int"),
        ],
        vec![
            Row::from_texts(["b", "1", "Z", "", "", "", "3"]),
            Row::from_texts(["a", "2", "X", "", "", "", "1"]),
            Row::from_texts(["c", "3", "Y", "", "", "", "2"]),
        ],
    )
}

// ============================================================================
// Logical index of a header
// ============================================================================

#[test]
fn test_plain_header_after_span_starts_at_two() {
    let table = colspan_table();
    let letter = table.headers()[1].id();
    assert_eq!(table.logical_index_of(letter), Ok(2));
}

#[test]
fn test_logical_indices_strictly_increase() {
    let table = colspan_table();
    let indices: Vec<usize> = table
        .headers()
        .iter()
        .map(|h| table.logical_index_of(h.id()).unwrap())
        .collect();
    assert_eq!(indices, vec![0, 2, 3, 6]);
    assert!(indices.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_foreign_header_is_an_error() {
    let table = colspan_table();
    let stranger = Header::new("Elsewhere");
    assert_eq!(
        table.logical_index_of(stranger.id()),
        Err(SortError::HeaderNotFound(stranger.id()))
    );
}

// ============================================================================
// Header at a logical index
// ============================================================================

#[test]
fn test_header_at_round_trips() {
    let table = colspan_table();
    for header in table.headers() {
        let index = table.logical_index_of(header.id()).unwrap();
        assert_eq!(table.header_at(index).map(|h| h.id()), Some(header.id()));
    }
}

#[test]
fn test_header_at_covers_every_column_of_a_span() {
    let table = colspan_table();
    for i in 0..table.column_count() {
        let header = table.header_at(i).unwrap();
        let start = table.logical_index_of(header.id()).unwrap();
        assert!(start <= i && i < start + header.span, "column {}", i);
    }
    assert_eq!(table.header_at(1).unwrap().label, "Name");
    assert_eq!(table.header_at(5).unwrap().label, "Notes");
}

#[test]
fn test_header_at_past_the_end() {
    let table = colspan_table();
    assert_eq!(table.column_count(), 7);
    assert!(table.header_at(7).is_none());
    assert!(table.header_at(usize::MAX).is_none());
}

// ============================================================================
// Sorting through spans
// ============================================================================

#[test]
fn test_sort_column_after_colspan() {
    let table = colspan_table();
    let sortable = Sortable::new(&table, SortOptions::new()).unwrap();

    assert_eq!(sortable.header_at(2).unwrap().label, "Letter");
    assert_eq!(sortable.sort_column(2, None), Ok(true));
    sortable.run_pending();

    assert_eq!(table.column_texts(2), vec!["X", "Y", "Z"]);
}

#[test]
fn test_sort_column_inside_span_uses_spanning_header() {
    let table = colspan_table();
    let sortable = Sortable::new(&table, SortOptions::new()).unwrap();

    // Column 4 lies inside "Notes", which is not sortable.
    assert_eq!(sortable.sort_column(4, None), Ok(false));
    assert_eq!(sortable.pending(), 0);
}

#[test]
fn test_respan_moves_later_columns() {
    let table = colspan_table();
    let name = table.headers()[0].id();
    let count = table.headers()[3].id();

    table.update_header(name, |h| h.span = 1).unwrap();

    assert_eq!(table.logical_index_of(count), Ok(5));
    assert_eq!(table.header_at(1).unwrap().label, "Letter");
}
