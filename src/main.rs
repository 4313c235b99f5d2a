// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Discover the documents listed in the GitHub directory
// 3. Fetch and count them all concurrently
// 4. Write the word list and print the ranking
// 5. Exit with proper code (0 = success, 1 = some documents failed, 2 = error)
//
// Logging goes to stderr through tracing (set RUST_LOG=debug for per-URL
// detail); results go to stdout.
// =============================================================================

// Module declarations - tells Rust about our other source files
mod aggregate; // src/aggregate/ - concurrent word counting
mod cli; // src/cli.rs - command-line parsing
mod error; // src/error.rs - error types
mod fetch; // src/fetch/ - downloading documents
mod github; // src/github/ - listing a GitHub directory
mod output; // src/output/ - word list file, JSON and table output
mod pipeline; // src/pipeline/ - fan-out/fan-in coordinator
mod rank; // src/rank/ - ordering the words
mod text; // src/text/ - tokenizer

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use fetch::HttpFetcher;
use pipeline::{Coordinator, RunReport};

#[tokio::main]
async fn main() {
    init_logging();

    let result = run().await;
    if let Err(e) = &result {
        // {:#} prints the whole context chain on one line
        eprintln!("Error: {:#}", e);
    }

    std::process::exit(exit_code(&result));
}

// 0 = every document fetched
// 1 = word list written, but some documents failed
// 2 = discovery failed, strict abort, deadline or I/O error
fn exit_code(result: &Result<RunReport>) -> i32 {
    match result {
        Ok(report) if report.is_degraded() => 1,
        Ok(_) => 0,
        Err(_) => 2,
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wordrank=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<RunReport> {
    let cli = Cli::parse();
    let chatty = cli.progress_enabled();

    let raw_base_url = match &cli.raw_base_url {
        Some(url) => url.clone(),
        None => github::raw_base_from_listing(&cli.listing_url)?,
    };

    let fetcher = HttpFetcher::new(cli.request_timeout()).context("building HTTP client")?;

    if chatty {
        println!("🔍 Listing: {}", cli.listing_url);
    }
    let urls = github::discover_documents(
        fetcher.client(),
        &cli.listing_url,
        &raw_base_url,
        &cli.prefix,
    )
    .await
    .context("discovering documents")?;

    if urls.is_empty() {
        info!(prefix = %cli.prefix, "no documents matched");
    }
    if chatty {
        println!("📄 Found {} document(s) starting with '{}'", urls.len(), cli.prefix);
    }

    let coordinator = Coordinator::new(Arc::new(fetcher), cli.pipeline_settings());
    let report = coordinator.run(urls).await?;

    let written = output::write_word_list(&cli.output, &report.ranked, cli.max_word_len)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    info!(path = %cli.output.display(), words = written, "word list written");

    if cli.json {
        output::print_json(&report.ranked)?;
    } else {
        println!();
        output::print_table(&report.ranked, cli.top);
        output::print_summary(&report);
        println!("💾 Wrote {} word(s) to {}", written, cli.output.display());
    }

    Ok(report)
}
