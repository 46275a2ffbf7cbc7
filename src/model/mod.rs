use std::collections::BTreeMap;

/// Identifier of a source file: its base name with the extension stripped.
/// It is the attribution label written into the merged flag columns.
pub type SourceId = String;

/// Marker that sets a flag when it appears (case-insensitively) in a cell.
pub const FLAG_MARKER: &str = "x";

/// Rows of every source keyed by identifier. The ordered map fixes the
/// iteration order used by the merge.
pub type SourceTable = BTreeMap<SourceId, Vec<Row>>;

/// One scheduling flag carried by an availability row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Preferential,
    Available,
    Impossible,
}

impl Flag {
    /// All flags in output column order.
    pub const ALL: [Flag; 3] = [Flag::Preferential, Flag::Available, Flag::Impossible];

    /// Header label used for the flag column in the merged table.
    pub fn label(self) -> &'static str {
        match self {
            Flag::Preferential => "Preferential",
            Flag::Available => "Available",
            Flag::Impossible => "Impossible",
        }
    }
}

/// One availability record read from one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// Date cell, kept verbatim. It is never parsed or normalised.
    pub date: String,
    /// Day-of-week label. Informational only.
    pub day_of_week: String,
    pub preferential: bool,
    pub available: bool,
    pub impossible: bool,
}

impl Row {
    /// Builds a row from the five raw cells of a record.
    pub fn from_cells(
        date: &str,
        day_of_week: &str,
        preferential: &str,
        available: &str,
        impossible: &str,
    ) -> Self {
        Self {
            date: date.to_string(),
            day_of_week: day_of_week.to_string(),
            preferential: parse_marker(preferential),
            available: parse_marker(available),
            impossible: parse_marker(impossible),
        }
    }

    /// Returns whether the given flag is set on this row.
    pub fn has(&self, flag: Flag) -> bool {
        match flag {
            Flag::Preferential => self.preferential,
            Flag::Available => self.available,
            Flag::Impossible => self.impossible,
        }
    }

    /// Iterates over the flags set on this row, in column order.
    pub fn flags(&self) -> impl Iterator<Item = Flag> + '_ {
        Flag::ALL.into_iter().filter(|flag| self.has(*flag))
    }
}

/// Interprets a marker cell. Only `x` (in either case) counts; the value is
/// not trimmed, so surrounding whitespace makes it false.
pub fn parse_marker(value: &str) -> bool {
    value.to_lowercase() == FLAG_MARKER
}
