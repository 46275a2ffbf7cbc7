use availability_merge::merge::{MergedTable, merge_sources};
use availability_merge::model::{Flag, Row, SourceTable, parse_marker};

fn row(date: &str, day: &str, preferential: &str, available: &str, impossible: &str) -> Row {
    Row::from_cells(date, day, preferential, available, impossible)
}

fn sources(entries: Vec<(&str, Vec<Row>)>) -> SourceTable {
    entries
        .into_iter()
        .map(|(source, rows)| (source.to_string(), rows))
        .collect()
}

#[test]
fn markers_only_accept_x_in_either_case() {
    assert!(parse_marker("x"));
    assert!(parse_marker("X"));
    for value in ["", "y", "1", "  x", "x ", "yes"] {
        assert!(!parse_marker(value), "{value:?} should not set a flag");
    }
}

#[test]
fn same_date_from_two_sources_is_attributed_per_flag() {
    let table = merge_sources(&sources(vec![
        ("jan", vec![row("2024-01-01", "Mon", "x", "", "")]),
        ("feb", vec![row("2024-01-01", "Mon", "", "x", "")]),
    ]));

    assert_eq!(table.len(), 1);
    assert_eq!(
        table.rows()[0].to_record(),
        ["2024-01-01", "Mon", "jan", "feb", ""].map(String::from)
    );
}

#[test]
fn first_unique_date_is_kept_after_the_header() {
    let table = merge_sources(&sources(vec![(
        "alice",
        vec![
            row("2024-03-01", "Fri", "x", "", ""),
            row("2024-03-02", "Sat", "", "", "x"),
        ],
    )]));

    let records = table.records();
    assert_eq!(
        records[0],
        ["Date", "Day of Week", "Preferential", "Available", "Impossible"].map(String::from)
    );
    assert_eq!(records.len(), 3);
    assert_eq!(records[1][0], "2024-03-01");
    assert_eq!(records[1][2], "alice");
}

#[test]
fn sources_sharing_a_flag_are_joined_in_first_seen_order() {
    let table = merge_sources(&sources(vec![
        ("b", vec![row("2024-05-10", "Fri", "x", "", "")]),
        ("a", vec![row("2024-05-10", "Fri", "x", "x", "")]),
        ("c", vec![row("2024-05-10", "Fri", "", "", "x")]),
    ]));

    let merged = table.get("2024-05-10").expect("date merged");
    assert_eq!(merged.column(Flag::Preferential), "a | b");
    assert_eq!(merged.column(Flag::Available), "a");
    assert_eq!(merged.column(Flag::Impossible), "c");
}

#[test]
fn dates_are_unique_and_ordered_by_first_encounter() {
    let table = merge_sources(&sources(vec![
        (
            "alice",
            vec![
                row("2024-01-02", "Tue", "x", "", ""),
                row("2024-01-01", "Mon", "", "x", ""),
            ],
        ),
        (
            "bob",
            vec![
                row("2024-01-01", "Mon", "", "", "x"),
                row("2024-01-03", "Wed", "x", "", ""),
                row("2024-01-02", "Tue", "", "", ""),
            ],
        ),
    ]));

    let dates: Vec<&str> = table.rows().iter().map(|row| row.date.as_str()).collect();
    assert_eq!(dates, ["2024-01-02", "2024-01-01", "2024-01-03"]);
}

#[test]
fn repeated_date_within_a_source_is_listed_twice() {
    let table = merge_sources(&sources(vec![(
        "carol",
        vec![
            row("2024-02-14", "Wed", "x", "", ""),
            row("2024-02-14", "Wed", "x", "", ""),
        ],
    )]));

    let merged = table.get("2024-02-14").expect("date merged");
    assert_eq!(merged.sources(Flag::Preferential), ["carol", "carol"]);
    assert_eq!(merged.column(Flag::Preferential), "carol | carol");
}

#[test]
fn day_of_week_comes_from_the_first_row() {
    let table = merge_sources(&sources(vec![
        ("a", vec![row("2024-01-01", "Monday", "", "", "")]),
        ("b", vec![row("2024-01-01", "Mon", "x", "", "")]),
    ]));

    let merged = table.get("2024-01-01").expect("date merged");
    assert_eq!(merged.day_of_week, "Monday");
    assert_eq!(merged.column(Flag::Preferential), "b");
}

#[test]
fn empty_sources_produce_only_the_header() {
    let table = merge_sources(&SourceTable::new());
    assert!(table.is_empty());
    assert_eq!(table.records(), vec![MergedTable::header().map(String::from).to_vec()]);
}

#[test]
fn lookup_by_date_follows_merge_order() {
    let table = merge_sources(&sources(vec![
        ("a", vec![row("2024-01-02", "Tue", "x", "", "")]),
        ("b", vec![row("2024-01-01", "Mon", "", "x", ""), row("2024-01-02", "Tue", "", "x", "")]),
    ]));

    let merged = table.get("2024-01-02").expect("date merged");
    assert_eq!(merged, &table.rows()[0]);
    assert_eq!(merged.column(Flag::Available), "b");
    assert_eq!(table.get("2024-01-01").map(|row| row.date.as_str()), Some("2024-01-01"));
    assert!(table.get("2024-12-25").is_none());
}
