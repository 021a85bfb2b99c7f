//! Sorts a small table a few times and prints it after each sort.
//!
//! Run with: cargo run -p sortable --example demo
//! Engine logs go to sortable-demo.log.

use std::cmp::Ordering;
use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use sortable::prelude::*;

/// Blank strings sort after everything else.
fn blanks_last(a: &str, b: &str) -> Ordering {
    match (a.is_empty(), b.is_empty()) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        _ => a.cmp(b),
    }
}

fn print_table(table: &Table) {
    let header_line: Vec<String> = table
        .headers()
        .iter()
        .map(|h| {
            let marker = match h.active_direction() {
                Some(Direction::Asc) => " ▲",
                Some(Direction::Desc) => " ▼",
                None => "",
            };
            let width = 12 * h.span + 2 * (h.span - 1);
            format!("{:<width$}", format!("{}{}", h.label, marker))
        })
        .collect();
    println!("{}", header_line.join("  "));

    for row in table.rows() {
        let cells: Vec<String> = row.cells.iter().map(|c| format!("{:<12}", c.text)).collect();
        println!("{}", cells.join("  "));
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let log_file = File::create("sortable-demo.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;

    let table = Table::with_rows(
        vec![
            Header::new("Name").span(2),
            Header::new("Age").sort_type("int"),
            Header::new("Nickname").sort_type("blanks-last"),
            Header::new("Born").sort_type("int").default_direction(Direction::Desc),
        ],
        vec![
            Row::new(vec![
                "Ada".into(),
                "Lovelace".into(),
                "36".into(),
                "Enchantress".into(),
                Cell::new("Dec 10, 1815").sort_value("18151210"),
            ]),
            Row::new(vec![
                "Alan".into(),
                "Turing".into(),
                "41".into(),
                "".into(),
                Cell::new("Jun 23, 1912").sort_value("19120623"),
            ]),
            Row::new(vec![
                "Grace".into(),
                "Hopper".into(),
                "85".into(),
                "Amazing Grace".into(),
                Cell::new("Dec 09, 1906").sort_value("19061209"),
            ]),
        ],
    );

    let options = SortOptions::new()
        .initial_sort(2)
        .comparator("blanks-last", blanks_last)
        .on_before_sort(|event, _| {
            println!("sorting column {} {}...", event.column, event.direction);
        })
        .on_after_sort(|event, table| {
            println!("sorted column {} {}, {} rows", event.column, event.direction, table.len());
        });
    let sortable = Sortable::new(&table, options)?;

    sortable.run_pending();
    print_table(&table);

    for (column, direction) in [(2, None), (3, None), (4, None), (4, Some(Direction::Desc))] {
        sortable.sort_column(column, direction)?;
        sortable.run_pending();
        print_table(&table);
    }

    Ok(())
}
