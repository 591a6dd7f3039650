//! # `FeedClient` Live Smoke Test
//!
//! This binary exercises the `lib_common::markets::pjm` feed client against
//! the live Data Miner 2 endpoint. It is a manual diagnostic, not part of
//! the automated suite: it needs outbound network access and a reachable
//! feed service, so run it by hand when touching the retrieval path.
//!
//! ## Purpose:
//! Verify that the production endpoint still answers the `gen_by_fuel`
//! feed, that the response parses into the normalized tabular form, and
//! that all three output encodings come back consistent with each other.

use lib_common::markets::pjm::client::FeedClient;
use lib_common::markets::pjm::table::{FeedData, OutputFormat};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let client = FeedClient::new();

    println!("--- Starting PJM Feed Client Smoke Tests ---");

    // --- TEST 1: Table output & normalization ---
    // Fetches a handful of rows and verifies the normalized column names.
    println!("\n[Test 1] Fetching gen_by_fuel as a table...");
    let data = client
        .fetch_gen_by_fuel(None, None, Some(5), OutputFormat::Table)
        .await?;
    let table = match data {
        FeedData::Table(table) => table,
        other => panic!("expected table output, got {other:?}"),
    };
    assert!(table.row_count() <= 5);
    println!("✅ Rows: {}", table.row_count());
    println!("✅ Columns: {:?}", table.columns());
    assert!(table.columns().iter().any(|col| col == "fuel_type"));

    // --- TEST 2: Records output ---
    // The record encoding must agree with the table on row count.
    println!("\n[Test 2] Fetching gen_by_fuel as records...");
    let data = client
        .fetch_gen_by_fuel(None, None, Some(5), OutputFormat::Records)
        .await?;
    let records = match data {
        FeedData::Records(records) => records,
        other => panic!("expected records output, got {other:?}"),
    };
    println!("✅ Records: {}", records.len());
    if let Some(first) = records.first() {
        println!("✅ First record: {}", serde_json::to_string(first)?);
    }

    // --- TEST 3: CSV output ---
    // The delimited encoding must carry a header line.
    println!("\n[Test 3] Fetching gen_by_fuel as csv text...");
    let data = client
        .fetch_gen_by_fuel(None, None, Some(5), OutputFormat::Csv)
        .await?;
    let text = match data {
        FeedData::Csv(text) => text,
        other => panic!("expected csv output, got {other:?}"),
    };
    let header = text.lines().next().unwrap_or_default();
    assert!(header.contains("fuel_type"));
    println!("✅ CSV header: {header}");

    println!("\n--- All Smoke Tests Passed Successfully ---");
    Ok(())
}
