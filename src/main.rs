//! ngram-density CLI
//!
//! Fetches one web page, scores its n-grams by where they occur, and prints
//! the top-ranked keyword phrases:
//!
//! 1. Fetch: download and parse the page (bounded by a timeout)
//! 2. Extract: n-grams from URL, title, meta description, headings, body
//! 3. Aggregate: sum source-weighted occurrences per phrase
//! 4. Rank: group equal totals, keep the top N
//! 5. Report: fixed-width table (or JSON)
//!
//! Failures print a short diagnostic on stdout. The process still exits
//! normally.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::Level;

use ngram_density::logging;
use ngram_density::progress::DotTicker;
use ngram_density::{analyze_url, DensityConfig, DensityError, Report};

const OOPS: &str = "Oops! Something seems to have gone wrong!";

/// Weighted n-gram keyword density for a web page
///
/// Phrases found in the URL path, title, meta description and headings count
/// for more than phrases in the body text. Phrases with equal totals share a
/// rank.
///
/// Examples:
///   ngram-density https://www.rust-lang.org/
///   ngram-density --json https://example.com/blog/post
///   ngram-density --config density.json https://example.com/
#[derive(Parser, Debug)]
#[command(name = "ngram-density")]
#[command(version)]
#[command(about, long_about = None)]
pub struct Cli {
    /// Web page to analyse
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// JSON config file overriding weights, phrase length, floor and top N
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the report as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Do not print progress dots
    #[arg(short, long)]
    pub quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    logging::init_tracing(Level::WARN);

    let Some(url) = cli.url.as_deref() else {
        println!("{OOPS}");
        println!("No website URL entered. Try again!");
        return;
    };

    if let Err(err) = run(&cli, url) {
        tracing::debug!(error = ?err, "run failed");
        println!("{OOPS}");
        // Only our own errors carry a message meant for users
        if let Some(known) = err.downcast_ref::<DensityError>() {
            println!("{known}");
        }
    }
}

fn run(cli: &Cli, url: &str) -> Result<()> {
    let config = match &cli.config {
        Some(path) => DensityConfig::load(path)?,
        None => DensityConfig::default(),
    }
    .validated()?;

    let show_progress = !cli.quiet && !cli.json;
    let mut ticker = None;
    if show_progress {
        print!("Please be patient while the website is being parsed");
        std::io::stdout().flush().context("flushing stdout")?;
        ticker = Some(DotTicker::stdout());
    }

    let result = analyze_url(url, &config);

    if let Some(mut ticker) = ticker {
        ticker.stop();
        println!("\n");
    }

    let analysis = result?;
    let report = Report::from_analysis(&analysis);
    if cli.json {
        println!("{}", report.to_json().context("serializing report")?);
    } else {
        print!("{}", report.render_table());
    }
    Ok(())
}
