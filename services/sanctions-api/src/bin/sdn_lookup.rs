//! Command-line SDN lookup
//!
//! Loads the list once, then answers the given term or prompts until
//! `exit`, `quit` or a blank line.

use anyhow::{Context, Result};
use clap::Parser;
use sanctions_api::{config::SourceConfig, SourceFetcher};
use sanctions_core::{extract, search_full, Dataset, FullResult, SearchQuery};
use std::io::{BufRead, Write};

#[derive(Parser)]
#[command(name = "sdn-lookup")]
#[command(about = "Search the OFAC SDN list by name")]
struct Cli {
    /// Read the list from a local XML file
    #[arg(long, conflicts_with = "url")]
    file: Option<String>,

    /// Download the list from this URL
    #[arg(long, default_value = sanctions_api::config::DEFAULT_SDN_URL)]
    url: String,

    /// Only show entries of this type (individual, entity, vessel, ...)
    #[arg(long = "type")]
    entry_type: Option<String>,

    /// Print address, type and programs as well as the name
    #[arg(long)]
    full: bool,

    /// Search term; omit to search interactively
    term: Vec<String>,
}

const COLUMNS: [(&str, usize); 6] = [
    ("Name", 40),
    ("Address", 60),
    ("Type", 12),
    ("Program(s)", 40),
    ("List", 6),
    ("Score", 6),
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match &cli.file {
        Some(path) => SourceConfig::from_path(path.clone()),
        None => SourceConfig::from_url(cli.url.clone()),
    };
    let fetcher = SourceFetcher::new(source)?;
    eprintln!("Loading SDN list from {}", fetcher.source());
    let document = fetcher.fetch().await?;
    let dataset = extract(&document).context("SDN list could not be parsed")?;
    eprintln!("Loaded {} records", dataset.len());

    if !cli.term.is_empty() {
        return run_query(&dataset, &cli, &cli.term.join(" "));
    }

    let stdin = std::io::stdin();
    loop {
        print!("Enter search term (or 'exit' to quit): ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let term = line.trim();
        if term.is_empty() || term.eq_ignore_ascii_case("exit") || term.eq_ignore_ascii_case("quit")
        {
            break;
        }
        if let Err(e) = run_query(&dataset, &cli, term) {
            eprintln!("{}", e);
        }
    }

    Ok(())
}

fn run_query(dataset: &Dataset, cli: &Cli, term: &str) -> Result<()> {
    let mut query = SearchQuery::new(term);
    if let Some(entry_type) = &cli.entry_type {
        query = query.with_category(entry_type.clone());
    }

    let results = search_full(dataset, &query)?;
    if results.count == 0 {
        println!("No results found for: {}\n", term);
        return Ok(());
    }

    println!("\n# Results (Total: {}):", results.count);
    if cli.full {
        print_table(&results.results);
    } else {
        for result in &results.results {
            println!("{}", result.name);
        }
    }
    println!();
    Ok(())
}

fn print_table(results: &[FullResult]) {
    let header = format_row(&COLUMNS.map(|(title, _)| title));
    println!("{}", header);
    println!("{}", "-".repeat(header.len()));

    for result in results {
        println!(
            "{}",
            format_row(&[
                result.name.as_str(),
                result.address.as_str(),
                result.entry_type.as_str(),
                result.programs.as_str(),
                result.list.as_str(),
                result.score.as_str(),
            ])
        );
    }
}

fn format_row(cells: &[&str; 6]) -> String {
    cells
        .iter()
        .zip(COLUMNS)
        .map(|(cell, (_, width))| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ")
}
