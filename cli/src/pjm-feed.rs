use anyhow::Result;
use clap::{Parser, Subcommand};
use lib_common::markets::pjm::client::{DateTimeParam, FeedClient};
use lib_common::markets::pjm::table::{DataTable, FeedData, OutputFormat};

/// Number of leading rows shown in the table summary.
const PREVIEW_ROWS: usize = 5;

/// A lightweight CLI for PJM Data Miner 2 debugging.
#[derive(Parser, Debug)]
#[command(
    version,
    about = "PJM Data Miner 2 CLI helper",
    long_about = "Fetches public PJM Data Miner 2 feeds and prints them in one of three \
formats. Table output shows a human-readable summary; records and csv print the raw data."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch generation by fuel type.
    GenByFuel {
        /// Start datetime (ISO-8601).
        #[arg(long)]
        start: Option<String>,

        /// End datetime (ISO-8601).
        #[arg(long)]
        end: Option<String>,

        /// Maximum rows to fetch.
        #[arg(long)]
        row_count: Option<u64>,

        /// Output format.
        #[arg(long, default_value = "table", value_parser = ["table", "records", "csv"])]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    match args.command {
        Command::GenByFuel {
            start,
            end,
            row_count,
            output,
        } => {
            let format: OutputFormat = output.parse()?;
            let client = FeedClient::new();
            let data = client
                .fetch_gen_by_fuel(
                    start.map(DateTimeParam::from),
                    end.map(DateTimeParam::from),
                    row_count,
                    format,
                )
                .await?;
            print_feed_data(&data)?;
        }
    }

    Ok(())
}

fn print_feed_data(data: &FeedData) -> Result<()> {
    match data {
        FeedData::Table(table) => print_summary(table),
        FeedData::Records(records) => println!("{}", serde_json::to_string_pretty(records)?),
        FeedData::Csv(text) => print!("{text}"),
    }
    Ok(())
}

/// Prints a short human-readable summary: row count, the distinct fuel
/// types when present, and the first few rows.
fn print_summary(table: &DataTable) {
    println!("Rows: {}", table.row_count());

    if let Some(cells) = table.column("fuel_type") {
        let mut fuels: Vec<&str> = cells.iter().filter_map(|cell| cell.as_text()).collect();
        fuels.sort_unstable();
        fuels.dedup();
        if !fuels.is_empty() {
            println!("Fuel types: {}", fuels.join(", "));
        }
    }

    if table.columns().is_empty() {
        return;
    }

    // Column-width-aligned preview of the leading rows.
    let preview: Vec<Vec<String>> = table
        .rows()
        .iter()
        .take(PREVIEW_ROWS)
        .map(|row| row.iter().map(|cell| cell.render()).collect())
        .collect();
    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(index, name)| {
            preview
                .iter()
                .map(|row| row[index].len())
                .chain(std::iter::once(name.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(name, &width)| format!("{name:<width$}"))
        .collect();
    println!("{}", header.join("  "));
    for row in preview {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, &width)| format!("{value:<width$}"))
            .collect();
        println!("{}", line.join("  "));
    }
}
