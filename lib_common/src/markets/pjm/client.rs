//! # PJM Feed Client
//!
//! The high-level client for PJM Data Miner 2 public feeds. It is designed
//! to work with any feed under `https://dataminer2.pjm.com/feed/<feed_name>`
//! by passing arbitrary query parameters; convenience methods are layered on
//! top for feed-specific behavior (see `fetch_gen_by_fuel`).
//!
//! ## Pipeline:
//! 1. GET the feed body through [`ApiCallPjm`] (bounded retries).
//! 2. Decide whether the body is CSV or JSON (content-type hint first, then
//!    a comma heuristic over the first lines).
//! 3. Parse into a [`DataTable`], resolving the JSON top-level shape once
//!    into a tagged variant rather than probing dynamically.
//! 4. Normalize column names to snake_case and best-effort-parse
//!    timestamp-like columns.
//! 5. Encode per the caller's requested [`OutputFormat`].
//!
//! Values are kept textual by default; apart from timestamp columns no
//! numeric coercion is applied.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};

use crate::markets::pjm::apicall::{ApiCallPjm, RetryPolicy};
use crate::markets::pjm::error::{FeedError, FetchFailure};
use crate::markets::pjm::table::{parse_timestamp, Cell, DataTable, FeedData, OutputFormat};
use crate::retrieve::feed_http::TextResponse;

/// Feed identifier for generation by fuel type.
pub const GEN_BY_FUEL_FEED: &str = "gen_by_fuel";

/// A start/end bound for a feed query: either an ISO-8601 string passed
/// through as-is, or a structured value rendered to ISO-8601 before
/// transmission.
#[derive(Debug, Clone)]
pub enum DateTimeParam {
    /// An ISO-8601-formatted string supplied by the caller.
    Iso(String),
    /// A structured date/time value.
    Timestamp(NaiveDateTime),
}

impl DateTimeParam {
    /// The string form transmitted as the query-parameter value.
    pub fn to_query_value(&self) -> String {
        match self {
            DateTimeParam::Iso(text) => text.clone(),
            DateTimeParam::Timestamp(ts) => ts.format("%Y-%m-%dT%H:%M:%S").to_string(),
        }
    }

    /// The parsed instant, when one can be derived.
    fn instant(&self) -> Option<NaiveDateTime> {
        match self {
            DateTimeParam::Iso(text) => parse_timestamp(text),
            DateTimeParam::Timestamp(ts) => Some(*ts),
        }
    }
}

impl From<&str> for DateTimeParam {
    fn from(value: &str) -> Self {
        DateTimeParam::Iso(value.to_string())
    }
}

impl From<String> for DateTimeParam {
    fn from(value: String) -> Self {
        DateTimeParam::Iso(value)
    }
}

impl From<NaiveDateTime> for DateTimeParam {
    fn from(value: NaiveDateTime) -> Self {
        DateTimeParam::Timestamp(value)
    }
}

/// Client for PJM Data Miner 2 public feeds.
///
/// Holds no mutable state between calls; the retry policy is fixed at
/// construction, so independent calls may run concurrently at the caller's
/// discretion.
pub struct FeedClient {
    api: ApiCallPjm,
}

impl Default for FeedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedClient {
    /// A client against the production endpoint with the default policy.
    pub fn new() -> Self {
        Self::with_policy(RetryPolicy::default())
    }

    /// A client against the production endpoint with an explicit policy.
    pub fn with_policy(policy: RetryPolicy) -> Self {
        Self {
            api: ApiCallPjm::new(policy),
        }
    }

    /// A client against an alternate endpoint. Used by tests and mirrors.
    ///
    /// # Panics
    /// Panics if `base_url` is not a valid absolute URL.
    pub fn with_base_url(base_url: &str, policy: RetryPolicy) -> Self {
        Self {
            api: ApiCallPjm::with_base_url(base_url, policy),
        }
    }

    /// Fetches a generic feed.
    ///
    /// # Arguments
    /// * `feed_name` - Name of the Data Miner 2 feed, appended to the base URL.
    /// * `params` - Query parameters passed directly to the request.
    /// * `output_format` - The encoding of the returned data.
    ///
    /// # Errors
    /// `FeedError::InvalidArgument` for an empty feed name;
    /// `FeedError::Fetch` on network exhaustion or an unparseable body.
    pub async fn fetch_feed(
        &self,
        feed_name: &str,
        params: &[(String, String)],
        output_format: OutputFormat,
    ) -> Result<FeedData, FeedError> {
        let table = self.fetch_table(feed_name, params).await?;
        table
            .into_output(output_format)
            .map_err(|err| FeedError::fetch(feed_name, err))
    }

    /// Fetches generation by fuel type with normalized columns.
    ///
    /// `start` and `end` are optional bounds sent as query parameters; when
    /// both are present they must parse and satisfy `end >= start`, checked
    /// before any network call. `row_count` caps the number of rows the
    /// feed returns (`rowCount` parameter).
    ///
    /// The known columns are renamed by exact match
    /// (`datetime_beginning_utc` -> `timestamp`,
    /// `datetime_beginning_ept` -> `timestamp_ept`,
    /// `fueltype` -> `fuel_type`) and the `timestamp` column is reparsed,
    /// coercing unparseable cells to missing rather than failing.
    ///
    /// # Errors
    /// `FeedError::InvalidArgument` for an invalid date range;
    /// `FeedError::Fetch` on network or parsing errors.
    pub async fn fetch_gen_by_fuel(
        &self,
        start: Option<DateTimeParam>,
        end: Option<DateTimeParam>,
        row_count: Option<u64>,
        output_format: OutputFormat,
    ) -> Result<FeedData, FeedError> {
        let mut params: Vec<(String, String)> = Vec::new();
        if let Some(start) = &start {
            params.push(("start".to_string(), start.to_query_value()));
        }
        if let Some(end) = &end {
            params.push(("end".to_string(), end.to_query_value()));
        }
        if let Some(count) = row_count {
            params.push(("rowCount".to_string(), count.to_string()));
        }

        // Only a complete range is validated; a lone bound travels as-is.
        if let (Some(start), Some(end)) = (&start, &end) {
            let start_ts = start.instant().ok_or_else(|| {
                FeedError::InvalidArgument(format!(
                    "unparseable start datetime '{}'",
                    start.to_query_value()
                ))
            })?;
            let end_ts = end.instant().ok_or_else(|| {
                FeedError::InvalidArgument(format!(
                    "unparseable end datetime '{}'",
                    end.to_query_value()
                ))
            })?;
            if end_ts < start_ts {
                return Err(FeedError::InvalidArgument(
                    "end must be greater than or equal to start".to_string(),
                ));
            }
        }

        let mut table = self.fetch_table(GEN_BY_FUEL_FEED, &params).await?;
        for (from, to) in [
            ("datetime_beginning_utc", "timestamp"),
            ("datetime_beginning_ept", "timestamp_ept"),
            ("fueltype", "fuel_type"),
        ] {
            table.rename_column(from, to);
        }
        table.coerce_timestamp_column("timestamp");

        table
            .into_output(output_format)
            .map_err(|err| FeedError::fetch(GEN_BY_FUEL_FEED, err))
    }

    /// Fetch, parse, and normalize a feed into the in-memory table form.
    async fn fetch_table(
        &self,
        feed_name: &str,
        params: &[(String, String)],
    ) -> Result<DataTable, FeedError> {
        let response = self.api.fetch_text(feed_name, params).await?;
        let mut table =
            parse_response(&response).map_err(|err| FeedError::fetch(feed_name, err))?;
        table.normalize_columns();
        table.parse_timestamp_columns();
        Ok(table)
    }
}

/// Decides the body encoding and parses accordingly.
fn parse_response(response: &TextResponse) -> Result<DataTable, FetchFailure> {
    if body_is_csv(response) {
        parse_csv(&response.body)
    } else {
        parse_json(&response.body)
    }
}

/// CSV/JSON decision: an explicit content-type hint wins; otherwise a comma
/// heuristic over the first three non-empty body lines decides.
fn body_is_csv(response: &TextResponse) -> bool {
    if let Some(content_type) = &response.content_type {
        let lowered = content_type.to_lowercase();
        if lowered.contains("csv") {
            return true;
        }
        if lowered.contains("json") {
            return false;
        }
    }
    looks_like_csv(&response.body)
}

/// True when any of the first three non-empty lines contains a comma.
fn looks_like_csv(text: &str) -> bool {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .take(3)
        .any(|line| line.contains(','))
}

/// Parses delimited text into a table; the first line is the header.
fn parse_csv(text: &str) -> Result<DataTable, FetchFailure> {
    let mut reader = csv::Reader::from_reader(text.as_bytes());
    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(ToString::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|field| Cell::Text(field.to_string())).collect());
    }
    Ok(DataTable::new(columns, rows))
}

/// The union of top-level JSON shapes a feed may answer with, resolved once
/// at parse time.
enum JsonShape {
    /// An object whose first list-valued member holds the rows.
    Wrapped(Vec<Value>),
    /// A top-level list of rows.
    List(Vec<Value>),
    /// Anything else; yields an empty table.
    Other,
}

fn resolve_shape(value: Value) -> JsonShape {
    match value {
        Value::Object(map) => {
            // Some feeds wrap the row list under an "items" or similar key;
            // the first list-valued member wins, in document order.
            for (_, member) in map {
                if let Value::Array(items) = member {
                    return JsonShape::Wrapped(items);
                }
            }
            JsonShape::Other
        }
        Value::Array(items) => JsonShape::List(items),
        _ => JsonShape::Other,
    }
}

/// Parses a JSON body into a table.
fn parse_json(text: &str) -> Result<DataTable, FetchFailure> {
    let value: Value = serde_json::from_str(text)?;
    let rows = match resolve_shape(value) {
        JsonShape::Wrapped(items) | JsonShape::List(items) => items,
        JsonShape::Other => return Ok(DataTable::empty()),
    };
    Ok(table_from_row_objects(rows))
}

/// Builds a table from a list of row objects with possibly heterogeneous
/// keys. Columns appear in first-seen order; a key absent from a row leaves
/// a missing cell. Elements that are not objects contribute no row.
fn table_from_row_objects(rows: Vec<Value>) -> DataTable {
    let objects: Vec<Map<String, Value>> = rows
        .into_iter()
        .filter_map(|row| match row {
            Value::Object(map) => Some(map),
            _ => None,
        })
        .collect();

    let mut columns: Vec<String> = Vec::new();
    for object in &objects {
        for key in object.keys() {
            if !columns.iter().any(|col| col == key) {
                columns.push(key.clone());
            }
        }
    }

    let cells = objects
        .into_iter()
        .map(|object| {
            columns
                .iter()
                .map(|column| match object.get(column) {
                    Some(value) => json_value_to_cell(value),
                    None => Cell::Missing,
                })
                .collect()
        })
        .collect();

    DataTable::new(columns, cells)
}

/// Scalar JSON values stay textual; nulls become missing cells; nested
/// structures are kept as their compact JSON text.
fn json_value_to_cell(value: &Value) -> Cell {
    match value {
        Value::Null => Cell::Missing,
        Value::String(text) => Cell::Text(text.clone()),
        Value::Number(number) => Cell::Text(number.to_string()),
        Value::Bool(flag) => Cell::Text(flag.to_string()),
        other => Cell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{header, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            timeout: Duration::from_secs(5),
            max_attempts: 3,
            backoff_factor: 0.0,
        }
    }

    fn text_response(content_type: Option<&str>, body: &str) -> TextResponse {
        TextResponse {
            status: 200,
            content_type: content_type.map(ToString::to_string),
            body: body.to_string(),
        }
    }

    #[derive(Clone)]
    struct ServedBody {
        content_type: &'static str,
        body: &'static str,
        request_count: Arc<AtomicUsize>,
    }

    async fn body_handler(State(state): State<ServedBody>) -> (StatusCode, [(header::HeaderName, &'static str); 1], String) {
        state.request_count.fetch_add(1, Ordering::SeqCst);
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, state.content_type)],
            state.body.to_string(),
        )
    }

    async fn spawn_body_server(
        content_type: &'static str,
        body: &'static str,
    ) -> (String, Arc<AtomicUsize>) {
        let counter = Arc::new(AtomicUsize::new(0));
        let state = ServedBody {
            content_type,
            body,
            request_count: Arc::clone(&counter),
        };
        let app = Router::new()
            .route("/{feed}", get(body_handler))
            .with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("listener should bind");
        let address = listener.local_addr().expect("local addr should exist");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server should run");
        });
        (format!("http://{address}/"), counter)
    }

    #[test]
    fn comma_heuristic_inspects_leading_lines() {
        assert!(looks_like_csv("a,b\n1,2\n"));
        assert!(looks_like_csv("\n\nheader,other\n"));
        assert!(!looks_like_csv("plain\ntext\nlines\nwith,comma-too-late"));
        assert!(!looks_like_csv(""));
    }

    #[test]
    fn content_type_hint_wins_over_heuristic() {
        // JSON containing commas would fool the heuristic; the hint decides.
        let response = text_response(Some("application/json"), "{\"items\": [1, 2]}");
        assert!(!body_is_csv(&response));

        let response = text_response(Some("text/csv; charset=utf-8"), "a;b\n");
        assert!(body_is_csv(&response));

        let response = text_response(None, "a,b\n1,2\n");
        assert!(body_is_csv(&response));
    }

    #[test]
    fn json_object_shape_takes_first_list_member() {
        let table = parse_json(
            "{\"meta\": {\"page\": 1}, \"items\": [{\"A\": \"1\"}], \"links\": []}",
        )
        .unwrap();
        assert_eq!(table.columns(), &["A"]);
        assert_eq!(table.row_count(), 1);
    }

    #[test]
    fn json_top_level_list_is_the_row_list() {
        let table = parse_json("[{\"a\": 1}, {\"a\": 2, \"b\": true}]").unwrap();
        assert_eq!(table.columns(), &["a", "b"]);
        assert_eq!(table.row_count(), 2);
        // heterogeneous keys: the missing cell is explicit
        assert_eq!(table.rows()[0][1], Cell::Missing);
        assert_eq!(table.rows()[1][0], Cell::Text("2".into()));
        assert_eq!(table.rows()[1][1], Cell::Text("true".into()));
    }

    #[test]
    fn json_scalar_shape_yields_empty_table() {
        let table = parse_json("42").unwrap();
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().is_empty());

        let table = parse_json("{\"only\": \"scalars\"}").unwrap();
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn malformed_json_is_a_parse_failure() {
        let result = parse_json("{\"items\": [");
        assert!(matches!(result, Err(FetchFailure::Json(_))));
    }

    #[test]
    fn csv_parses_header_and_rows() {
        let table = parse_csv("FuelType,MW\nGas,100.5\nCoal,50\n").unwrap();
        assert_eq!(table.columns(), &["FuelType", "MW"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.rows()[0][0], Cell::Text("Gas".into()));
    }

    #[test]
    fn datetime_param_renders_iso() {
        let structured: DateTimeParam = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(6, 30, 0)
            .unwrap()
            .into();
        assert_eq!(structured.to_query_value(), "2024-01-01T06:30:00");

        let textual: DateTimeParam = "2024-01-01T00:00:00".into();
        assert_eq!(textual.to_query_value(), "2024-01-01T00:00:00");
    }

    #[tokio::test]
    async fn inverted_range_is_rejected_before_any_request() {
        let (base, counter) = spawn_body_server("application/json", "{\"items\": []}").await;
        let client = FeedClient::with_base_url(&base, fast_policy());

        let result = client
            .fetch_gen_by_fuel(
                Some("2024-02-01T00:00:00".into()),
                Some("2024-01-01T00:00:00".into()),
                None,
                OutputFormat::Table,
            )
            .await;

        assert!(matches!(result, Err(FeedError::InvalidArgument(_))));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn valid_range_is_accepted() {
        let (base, counter) = spawn_body_server("application/json", "{\"items\": []}").await;
        let client = FeedClient::with_base_url(&base, fast_policy());

        let result = client
            .fetch_gen_by_fuel(
                Some("2024-01-01T00:00:00".into()),
                Some("2024-01-01T00:00:00".into()),
                Some(10),
                OutputFormat::Table,
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lone_bound_travels_without_validation() {
        let (base, counter) = spawn_body_server("application/json", "{\"items\": []}").await;
        let client = FeedClient::with_base_url(&base, fast_policy());

        // A single bound is not range-checked, matching the feed's own
        // tolerance for partial windows.
        let result = client
            .fetch_gen_by_fuel(Some("yesterday-ish".into()), None, None, OutputFormat::Table)
            .await;

        assert!(result.is_ok());
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn gen_by_fuel_normalizes_the_documented_schema() {
        let body = "{\"items\": [{\"datetime_beginning_utc\": \"2024-01-01T00:00:00\", \
                     \"fuelType\": \"Gas\", \"mw\": \"100.5\"}]}";
        let (base, _) = spawn_body_server("application/json", body).await;
        let client = FeedClient::with_base_url(&base, fast_policy());

        let data = client
            .fetch_gen_by_fuel(None, None, None, OutputFormat::Table)
            .await
            .expect("fetch should succeed");

        let table = match data {
            FeedData::Table(table) => table,
            other => panic!("expected table output, got {other:?}"),
        };

        assert_eq!(table.columns(), &["timestamp", "fuel_type", "mw"]);
        let expected = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(table.rows()[0][0], Cell::Timestamp(expected));
        assert_eq!(table.rows()[0][1], Cell::Text("Gas".into()));
        // values stay textual; no numeric coercion
        assert_eq!(table.rows()[0][2], Cell::Text("100.5".into()));
    }

    #[tokio::test]
    async fn records_output_round_trips_shape() {
        let body = "{\"items\": [{\"fuelType\": \"Gas\", \"mw\": \"100.5\"}, \
                     {\"fuelType\": \"Wind\", \"mw\": \"20\"}]}";
        let (base, _) = spawn_body_server("application/json", body).await;
        let client = FeedClient::with_base_url(&base, fast_policy());

        let data = client
            .fetch_feed("gen_by_fuel", &[], OutputFormat::Records)
            .await
            .expect("fetch should succeed");

        let records = match data {
            FeedData::Records(records) => records,
            other => panic!("expected records output, got {other:?}"),
        };
        assert_eq!(records.len(), 2);
        for record in &records {
            let keys: Vec<&String> = record.keys().collect();
            assert_eq!(keys, vec!["fuel_type", "mw"]);
        }
    }

    #[tokio::test]
    async fn csv_feed_body_is_parsed_and_reencoded() {
        let (base, _) =
            spawn_body_server("text/csv", "fuelType,mw\nGas,100.5\nCoal,50\n").await;
        let client = FeedClient::with_base_url(&base, fast_policy());

        let data = client
            .fetch_feed("gen_by_fuel", &[], OutputFormat::Csv)
            .await
            .expect("fetch should succeed");

        let text = match data {
            FeedData::Csv(text) => text,
            other => panic!("expected csv output, got {other:?}"),
        };
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("fuel_type,mw"));
        assert_eq!(lines.next(), Some("Gas,100.5"));
        assert_eq!(lines.next(), Some("Coal,50"));
    }

    #[tokio::test]
    async fn malformed_body_surfaces_as_fetch_failure() {
        let (base, counter) = spawn_body_server("application/json", "{\"items\": [").await;
        let client = FeedClient::with_base_url(&base, fast_policy());

        let result = client
            .fetch_feed("gen_by_fuel", &[], OutputFormat::Table)
            .await;

        match result {
            Err(FeedError::Fetch { source, .. }) => {
                assert!(matches!(source, FetchFailure::Json(_)));
            }
            other => panic!("expected fetch failure, got {other:?}"),
        }
        // parse failures are not retried
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
