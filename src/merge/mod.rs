use std::collections::HashMap;

use crate::model::{Flag, Row, SourceId, SourceTable};

/// Separator placed between source identifiers sharing a flag column.
pub const SOURCE_SEPARATOR: &str = " | ";
/// Label of the date column in the merged table.
pub const DATE_HEADER: &str = "Date";
/// Label of the day-of-week column in the merged table.
pub const DAY_OF_WEEK_HEADER: &str = "Day of Week";

/// Consolidated view of one date across every source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedRow {
    pub date: String,
    /// Day-of-week of the row that first introduced the date.
    pub day_of_week: String,
    sources: [Vec<SourceId>; 3],
}

impl MergedRow {
    fn new(row: &Row) -> Self {
        Self {
            date: row.date.clone(),
            day_of_week: row.day_of_week.clone(),
            sources: Default::default(),
        }
    }

    fn attribute(&mut self, row: &Row, source: &str) {
        for flag in row.flags() {
            self.sources[column_index(flag)].push(source.to_string());
        }
    }

    /// Sources that set `flag` for this date, in first-seen order.
    pub fn sources(&self, flag: Flag) -> &[SourceId] {
        &self.sources[column_index(flag)]
    }

    /// Rendered flag column: empty, or the sources joined by ` | `.
    pub fn column(&self, flag: Flag) -> String {
        self.sources(flag).join(SOURCE_SEPARATOR)
    }

    /// The five output cells of this row.
    pub fn to_record(&self) -> [String; 5] {
        [
            self.date.clone(),
            self.day_of_week.clone(),
            self.column(Flag::Preferential),
            self.column(Flag::Available),
            self.column(Flag::Impossible),
        ]
    }
}

fn column_index(flag: Flag) -> usize {
    match flag {
        Flag::Preferential => 0,
        Flag::Available => 1,
        Flag::Impossible => 2,
    }
}

/// Date-unique table produced by [`merge_sources`]. Rows are kept in the
/// order their dates were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedTable {
    rows: Vec<MergedRow>,
    index: HashMap<String, usize>,
}

impl MergedTable {
    /// Header written before any data row.
    pub fn header() -> [&'static str; 5] {
        [
            DATE_HEADER,
            DAY_OF_WEEK_HEADER,
            Flag::Preferential.label(),
            Flag::Available.label(),
            Flag::Impossible.label(),
        ]
    }

    pub fn rows(&self) -> &[MergedRow] {
        &self.rows
    }

    /// Looks up the merged row of a date.
    pub fn get(&self, date: &str) -> Option<&MergedRow> {
        self.index.get(date).map(|&position| &self.rows[position])
    }

    /// Header followed by every data row, as plain string records.
    pub fn records(&self) -> Vec<Vec<String>> {
        let mut records = Vec::with_capacity(self.rows.len() + 1);
        records.push(Self::header().iter().map(|cell| cell.to_string()).collect());
        records.extend(self.rows.iter().map(|row| row.to_record().to_vec()));
        records
    }

    /// Number of data rows, excluding the header.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Merges the rows of every source into a single table keyed by date.
///
/// Sources are visited in identifier order and rows in file order. The first
/// row carrying a date creates its merged row; later rows only append their
/// source identifier to the flag columns they set. Identifiers are not
/// deduplicated, so a source repeating a date with the same flag is listed
/// twice.
pub fn merge_sources(sources: &SourceTable) -> MergedTable {
    let mut rows: Vec<MergedRow> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for (source, source_rows) in sources {
        for row in source_rows {
            let position = *index.entry(row.date.clone()).or_insert_with(|| {
                rows.push(MergedRow::new(row));
                rows.len() - 1
            });
            rows[position].attribute(row, source);
        }
    }

    MergedTable { rows, index }
}
