//! Tests for engine construction and configuration merging.

use std::cmp::Ordering;

use sortable::{
    Comparators, Direction, Header, InitialSort, Row, SortConfig, SortError, SortOptions,
    Sortable, SupersedePolicy, Table,
};

fn numbers() -> Table {
    Table::with_rows(
        vec![
            Header::new("N").sort_type("int"),
            Header::new("Word").sort_type("string"),
        ],
        vec![
            Row::from_texts(["3", "c"]),
            Row::from_texts(["1", "b"]),
            Row::from_texts(["2", "a"]),
        ],
    )
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_table_without_headers_is_rejected() {
    let table = Table::with_rows(Vec::new(), vec![Row::from_texts(["1"])]);
    assert_eq!(
        Sortable::new(&table, SortOptions::new()).unwrap_err(),
        SortError::NoHeaders
    );
}

#[test]
fn test_zero_span_is_rejected() {
    let broken = Header::new("Broken").span(0);
    let id = broken.id();
    let table = Table::new(vec![Header::new("Ok"), broken]);
    assert_eq!(
        Sortable::new(&table, SortOptions::new()).unwrap_err(),
        SortError::ZeroSpan { header: id }
    );
}

#[test]
fn test_two_active_headers_are_rejected() {
    let table = Table::new(vec![
        Header::new("A").active(Direction::Asc),
        Header::new("B").active(Direction::Asc),
    ]);
    assert!(matches!(
        Sortable::new(&table, SortOptions::new()),
        Err(SortError::MultipleActive { .. })
    ));
}

#[test]
fn test_construction_leaves_rows_alone_by_default() {
    let table = numbers();
    let sortable = Sortable::new(&table, SortOptions::new()).unwrap();
    assert_eq!(sortable.pending(), 0);
    assert_eq!(sortable.config().initial_sort, InitialSort::Disabled);
    assert_eq!(table.column_texts(0), vec!["3", "1", "2"]);
}

#[test]
fn test_engines_are_independent() {
    let first = numbers();
    let second = numbers();
    let a = Sortable::new(&first, SortOptions::new()).unwrap();
    let _b = Sortable::new(&second, SortOptions::new()).unwrap();

    a.sort_column(0, None).unwrap();
    a.run_pending();

    assert_eq!(first.column_texts(0), vec!["1", "2", "3"]);
    assert_eq!(second.column_texts(0), vec!["3", "1", "2"]);
    assert_eq!(second.active(), None);
}

// ============================================================================
// Initial sort
// ============================================================================

#[test]
fn test_initial_sort_column_zero() {
    let table = numbers();
    let sortable = Sortable::new(&table, SortOptions::new().initial_sort(0)).unwrap();

    assert_eq!(sortable.pending(), 1);
    sortable.run_pending();
    assert_eq!(table.column_texts(0), vec!["1", "2", "3"]);
    assert_eq!(table.active().map(|(_, d)| d), Some(Direction::Asc));
}

#[test]
fn test_initial_sort_honors_default_direction() {
    let table = Table::with_rows(
        vec![Header::new("N").sort_type("int").default_direction(Direction::Desc)],
        vec![Row::from_texts(["1"]), Row::from_texts(["3"]), Row::from_texts(["2"])],
    );
    let sortable = Sortable::new(&table, SortOptions::new().initial_sort(0)).unwrap();
    sortable.run_pending();
    assert_eq!(table.column_texts(0), vec!["3", "2", "1"]);
}

#[test]
fn test_initial_sort_past_the_end_is_ignored() {
    let table = numbers();
    let sortable = Sortable::new(&table, SortOptions::new().initial_sort(5)).unwrap();
    assert_eq!(sortable.pending(), 0);
}

// ============================================================================
// Merge
// ============================================================================

#[test]
fn test_defaults() {
    let config = SortConfig::default();
    assert_eq!(config.initial_sort, InitialSort::Disabled);
    assert_eq!(config.supersede, SupersedePolicy::RunAll);
    assert_eq!(
        config.comparators.tags(),
        vec!["float", "int", "string", "string-ins", "string-insensitive"]
    );
}

#[test]
fn test_scalars_replace_defaults() {
    let base = SortConfig {
        initial_sort: InitialSort::Column(3),
        ..SortConfig::default()
    };

    let kept = base.clone().extend(SortOptions::new());
    assert_eq!(kept.initial_sort, InitialSort::Column(3));

    let replaced = base
        .extend(SortOptions::new().no_initial_sort().supersede(SupersedePolicy::DiscardStale));
    assert_eq!(replaced.initial_sort, InitialSort::Disabled);
    assert_eq!(replaced.supersede, SupersedePolicy::DiscardStale);
}

#[test]
fn test_comparators_merge_by_tag() {
    let reversed = |a: &str, b: &str| b.cmp(a);
    let options = SortOptions::new()
        .comparator("int", reversed)
        .comparators(Comparators::new().with("length", |a: &str, b: &str| a.len().cmp(&b.len())));
    let config = SortConfig::default().extend(options);

    assert_eq!(
        config.comparators.tags(),
        vec!["float", "int", "length", "string", "string-ins", "string-insensitive"]
    );
    assert_eq!(config.comparators.resolve("int").compare("1", "2"), Ordering::Greater);
    assert_eq!(config.comparators.resolve("float").compare("1", "2"), Ordering::Less);
}

#[test]
fn test_overridden_comparator_drives_sort() {
    let table = numbers();
    let options = SortOptions::new().comparator("int", |a: &str, b: &str| b.cmp(a));
    let sortable = Sortable::new(&table, options).unwrap();

    sortable.sort_column(0, Some(Direction::Asc)).unwrap();
    sortable.run_pending();
    assert_eq!(table.column_texts(0), vec!["3", "2", "1"]);
}
