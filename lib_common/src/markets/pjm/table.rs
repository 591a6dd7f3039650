//! # Tabular Feed Data Model
//!
//! Data Miner feeds are tabular no matter how they arrive on the wire, so
//! this module defines one in-memory shape for them: an ordered list of
//! column names plus row-major cells. Every cell is a tagged value — plain
//! text, a parsed timestamp, or an explicit missing marker — which keeps the
//! "best-effort timestamp parsing" rules representable without resorting to
//! sentinel strings.
//!
//! The module also owns the column-name normalization (snake_case), the
//! lenient timestamp-column reparsing policy, and the three output encodings
//! (table, records, CSV text).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::markets::pjm::error::FeedError;

/// Accepted layouts for timestamp-like cells, tried in order after RFC 3339.
/// The slash forms cover the EPT-style strings some feeds emit.
const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
];

/// How a timestamp cell is rendered back to text (CSV and records output).
const TIMESTAMP_RENDER_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A single value in a [`DataTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// A plain textual value, exactly as it arrived from the feed.
    Text(String),
    /// A successfully parsed date/time value.
    Timestamp(NaiveDateTime),
    /// An absent or unparseable value. Not an error.
    Missing,
}

impl Cell {
    /// The textual content, if this cell is plain text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Renders the cell for delimited-text output. Missing cells render empty.
    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Timestamp(ts) => ts.format(TIMESTAMP_RENDER_FORMAT).to_string(),
            Cell::Missing => String::new(),
        }
    }

    /// Converts the cell into a JSON value for record output.
    pub fn to_json(&self) -> Value {
        match self {
            Cell::Text(text) => Value::String(text.clone()),
            Cell::Timestamp(ts) => Value::String(ts.format(TIMESTAMP_RENDER_FORMAT).to_string()),
            Cell::Missing => Value::Null,
        }
    }
}

/// Normalizes a column header to its canonical snake_case form.
///
/// Each uppercase character becomes an underscore plus its lowercase form,
/// spaces and hyphens become underscores, everything else passes through,
/// and leading/trailing underscores are stripped. The mapping is
/// deterministic and locale-independent, and idempotent on names that are
/// already canonical.
pub fn snake_case(name: &str) -> String {
    let mut cleaned = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            cleaned.push('_');
            cleaned.extend(ch.to_lowercase());
        } else if ch == ' ' || ch == '-' {
            cleaned.push('_');
        } else {
            cleaned.push(ch);
        }
    }
    cleaned.trim_matches('_').to_string()
}

/// Attempts to parse a single cell's text as a date/time value.
///
/// RFC 3339 strings are accepted first (the offset is dropped, keeping the
/// wall-clock reading), then the layouts in [`TIMESTAMP_FORMATS`], then a
/// bare `YYYY-MM-DD` date which is taken as midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(fixed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(fixed.naive_local());
    }
    for format in TIMESTAMP_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// An ordered tabular result: named columns, row-major cells.
///
/// Row order is the source order. Column order is the source header order.
/// Name collisions after normalization are not detected; the columns simply
/// end up sharing a name.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl DataTable {
    /// Builds a table from column names and rows. Rows shorter than the
    /// column list are padded with [`Cell::Missing`]; longer rows are
    /// truncated to the column count.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<Cell>>) -> Self {
        let width = columns.len();
        for row in &mut rows {
            row.truncate(width);
            while row.len() < width {
                row.push(Cell::Missing);
            }
        }
        Self { columns, rows }
    }

    /// A table with zero rows and zero columns.
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    /// The column names, in order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The rows, in source order.
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The cells of the named column, in row order, if the column exists.
    pub fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.columns.iter().position(|col| col == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Normalizes every column name to its canonical snake_case form.
    pub fn normalize_columns(&mut self) {
        for column in &mut self.columns {
            *column = snake_case(column);
        }
    }

    /// Renames a column by exact (not substring) match. A total operation:
    /// when no column carries `from`, the table is left unchanged.
    pub fn rename_column(&mut self, from: &str, to: &str) {
        if let Some(column) = self.columns.iter_mut().find(|col| col.as_str() == from) {
            *column = to.to_string();
        }
    }

    /// Reparses every column whose name contains `date`, `time`, or
    /// `timestamp` as date/time values, on a best-effort basis.
    ///
    /// A column where every cell fails to parse is left untouched as text.
    /// Otherwise parseable cells become [`Cell::Timestamp`] and the
    /// stragglers degrade to [`Cell::Missing`] — never an error.
    pub fn parse_timestamp_columns(&mut self) {
        let candidates: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                ["date", "time", "timestamp"]
                    .iter()
                    .any(|key| name.contains(key))
            })
            .map(|(index, _)| index)
            .collect();

        for index in candidates {
            let any_parsed = self.rows.iter().any(|row| match &row[index] {
                Cell::Text(text) => parse_timestamp(text).is_some(),
                Cell::Timestamp(_) => true,
                Cell::Missing => false,
            });
            if any_parsed {
                self.coerce_timestamp_cells(index);
            }
        }
    }

    /// Unconditionally reparses the named column as date/time values,
    /// coercing unparseable cells to [`Cell::Missing`]. No-op when the
    /// column does not exist.
    pub fn coerce_timestamp_column(&mut self, name: &str) {
        if let Some(index) = self.columns.iter().position(|col| col == name) {
            self.coerce_timestamp_cells(index);
        }
    }

    fn coerce_timestamp_cells(&mut self, index: usize) {
        for row in &mut self.rows {
            row[index] = match &row[index] {
                Cell::Text(text) => match parse_timestamp(text) {
                    Some(parsed) => Cell::Timestamp(parsed),
                    None => Cell::Missing,
                },
                other => other.clone(),
            };
        }
    }

    /// Encodes the table as one ordered `column -> value` mapping per row,
    /// preserving column order.
    pub fn to_records(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                let mut record = Map::new();
                for (column, cell) in self.columns.iter().zip(row) {
                    record.insert(column.clone(), cell.to_json());
                }
                record
            })
            .collect()
    }

    /// Re-serializes the table as comma-delimited text with a header line,
    /// no index column, rows in original order.
    pub fn to_csv_text(&self) -> Result<String, csv::Error> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row.iter().map(Cell::render))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|err| csv::Error::from(err.into_error()))?;
        Ok(String::from_utf8(bytes).expect("CSV writer produces UTF-8"))
    }

    /// Encodes the table per the requested output format.
    pub fn into_output(self, format: OutputFormat) -> Result<FeedData, csv::Error> {
        match format {
            OutputFormat::Table => Ok(FeedData::Table(self)),
            OutputFormat::Records => Ok(FeedData::Records(self.to_records())),
            OutputFormat::Csv => Ok(FeedData::Csv(self.to_csv_text()?)),
        }
    }
}

/// The output encodings a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// The in-memory [`DataTable`], as-is.
    Table,
    /// One ordered key/value mapping per row, JSON-serializable.
    Records,
    /// Comma-delimited text with a header row.
    Csv,
}

impl FromStr for OutputFormat {
    type Err = FeedError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "table" => Ok(OutputFormat::Table),
            "records" => Ok(OutputFormat::Records),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(FeedError::InvalidArgument(format!(
                "unknown output format '{other}' (expected table, records, or csv)"
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Table => "table",
            OutputFormat::Records => "records",
            OutputFormat::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// Feed data encoded per the caller's requested [`OutputFormat`].
#[derive(Debug, Clone)]
pub enum FeedData {
    /// The normalized in-memory table.
    Table(DataTable),
    /// An ordered list of flat key/value mappings.
    Records(Vec<Map<String, Value>>),
    /// RFC-4180-ish delimited text with a header line.
    Csv(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn timestamp(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn snake_case_examples() {
        assert_eq!(snake_case("FuelType"), "fuel_type");
        assert_eq!(snake_case("DatetimeBeginningUtc"), "datetime_beginning_utc");
        assert_eq!(snake_case("Some Column-Name"), "some__column__name");
        assert_eq!(snake_case("mw"), "mw");
        // consecutive capitals expand letter by letter
        assert_eq!(snake_case("datetime_beginning_UTC"), "datetime_beginning__u_t_c");
    }

    #[test]
    fn snake_case_is_idempotent() {
        for name in ["fuel_type", "datetime_beginning_utc", "mw", "timestamp_ept"] {
            assert_eq!(snake_case(name), name);
        }
        let once = snake_case("FuelType");
        assert_eq!(snake_case(&once), once);
    }

    #[test]
    fn parse_timestamp_accepts_common_layouts() {
        let expected = timestamp(2024, 1, 1, 0, 0, 0);
        assert_eq!(parse_timestamp("2024-01-01T00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01 00:00:00"), Some(expected));
        assert_eq!(parse_timestamp("1/1/2024 12:00:00 AM"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-01"), Some(expected));
        assert_eq!(parse_timestamp("not a date"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn rename_is_exact_not_substring() {
        let mut table = DataTable::new(
            vec!["datetime_beginning_utc".into(), "datetime_beginning_utc_extra".into()],
            vec![vec![Cell::Text("a".into()), Cell::Text("b".into())]],
        );
        table.rename_column("datetime_beginning_utc", "timestamp");
        assert_eq!(table.columns(), &["timestamp", "datetime_beginning_utc_extra"]);

        // renaming a column that does not exist is a no-op
        table.rename_column("fueltype", "fuel_type");
        assert_eq!(table.columns(), &["timestamp", "datetime_beginning_utc_extra"]);
    }

    #[test]
    fn timestamp_columns_parse_leniently() {
        let mut table = DataTable::new(
            vec!["datetime_beginning_utc".into(), "mw".into()],
            vec![
                vec![Cell::Text("2024-01-01T00:00:00".into()), Cell::Text("100.5".into())],
                vec![Cell::Text("garbage".into()), Cell::Text("99.0".into())],
            ],
        );
        table.parse_timestamp_columns();

        let parsed = table.column("datetime_beginning_utc").unwrap();
        assert_eq!(parsed[0], &Cell::Timestamp(timestamp(2024, 1, 1, 0, 0, 0)));
        // the unparseable cell degrades to missing, not an error
        assert_eq!(parsed[1], &Cell::Missing);
        // non-timestamp columns are untouched
        assert_eq!(table.column("mw").unwrap()[0], &Cell::Text("100.5".into()));
    }

    #[test]
    fn fully_unparseable_timestamp_column_stays_textual() {
        let mut table = DataTable::new(
            vec!["update_time".into()],
            vec![
                vec![Cell::Text("soon".into())],
                vec![Cell::Text("later".into())],
            ],
        );
        table.parse_timestamp_columns();
        assert_eq!(table.column("update_time").unwrap()[0], &Cell::Text("soon".into()));
        assert_eq!(table.column("update_time").unwrap()[1], &Cell::Text("later".into()));
    }

    #[test]
    fn records_preserve_column_order_and_counts() {
        let table = DataTable::new(
            vec!["timestamp".into(), "fuel_type".into(), "mw".into()],
            vec![
                vec![
                    Cell::Timestamp(timestamp(2024, 1, 1, 0, 0, 0)),
                    Cell::Text("Gas".into()),
                    Cell::Text("100.5".into()),
                ],
                vec![Cell::Missing, Cell::Text("Coal".into()), Cell::Text("50".into())],
            ],
        );
        let records = table.to_records();
        assert_eq!(records.len(), table.row_count());
        for record in &records {
            let keys: Vec<&String> = record.keys().collect();
            assert_eq!(keys, vec!["timestamp", "fuel_type", "mw"]);
        }
        assert_eq!(records[0]["timestamp"], Value::String("2024-01-01T00:00:00".into()));
        assert_eq!(records[1]["timestamp"], Value::Null);
    }

    #[test]
    fn csv_text_round_trips_values() {
        let table = DataTable::new(
            vec!["fuel_type".into(), "mw".into()],
            vec![
                vec![Cell::Text("Gas".into()), Cell::Text("100.5".into())],
                vec![Cell::Text("Hydro, pumped".into()), Cell::Text("12".into())],
            ],
        );
        let text = table.to_csv_text().unwrap();

        let mut reader = csv::Reader::from_reader(text.as_bytes());
        let headers = reader.headers().unwrap().clone();
        assert_eq!(headers.iter().collect::<Vec<_>>(), vec!["fuel_type", "mw"]);

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "Hydro, pumped");
        assert_eq!(&rows[0][1], "100.5");
    }

    #[test]
    fn output_format_parses_known_names_only() {
        assert_eq!("table".parse::<OutputFormat>().unwrap(), OutputFormat::Table);
        assert_eq!("records".parse::<OutputFormat>().unwrap(), OutputFormat::Records);
        assert_eq!("csv".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!(matches!(
            "dataframe".parse::<OutputFormat>(),
            Err(FeedError::InvalidArgument(_))
        ));
    }

    #[test]
    fn short_rows_are_padded_with_missing() {
        let table = DataTable::new(
            vec!["a".into(), "b".into()],
            vec![vec![Cell::Text("1".into())]],
        );
        assert_eq!(table.rows()[0].len(), 2);
        assert_eq!(table.rows()[0][1], Cell::Missing);
    }
}
