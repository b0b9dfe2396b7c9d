//! # News Summarizer
//!
//! A browser dashboard that fetches the last day's headlines for a topic (or
//! the day's AI research papers), scrapes each article and shows it with two
//! short extractive summaries.
//!
//! ## Usage
//!
//! ```sh
//! news_summarizer                      # serve the dashboard
//! news_summarizer pass -t Science      # one pass printed as Markdown
//! ```
//!
//! ## Architecture
//!
//! Each pass is a sequential pipeline:
//! 1. **Feed**: query the news feed for the topic (or the papers listing)
//! 2. **Extraction**: scrape main text and top image of each linked article
//! 3. **Summarization**: keyword summary plus LexRank "important points"
//! 4. **Output**: dashboard cards, Markdown or JSON

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cache;
mod cli;
mod config;
mod error;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod summarize;
mod utils;
mod web;

use cache::TopicCache;
use cli::{Cli, Command};
use config::Config;
use outputs::{json, markdown::MarkdownReport};
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_summarizer starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let mut config = Config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => web::serve(config).await?,
        Command::Pass {
            topic,
            quantity,
            json: as_json,
            json_output_dir,
        } => {
            // Early check: ensure JSON output dir is writable
            if let Some(dir) = &json_output_dir {
                if let Err(e) = ensure_writable_dir(dir).await {
                    error!(
                        path = %dir.display(),
                        error = %e,
                        "JSON output directory is not writable (fix perms or choose a different path)"
                    );
                    return Err(e.into());
                }
            }

            let pipeline = pipeline::build_pipeline(&config)?;
            let mut cache = TopicCache::new();
            let quantity = quantity.unwrap_or(config.default_quantity);
            let report = pipeline.run_pass(&topic, quantity, &mut cache).await?;

            if as_json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", MarkdownReport(&report));
            }

            if let Some(dir) = &json_output_dir {
                let path = json::write_pass_snapshot(&report, dir).await?;
                info!(path = %path.display(), "Wrote pass snapshot");
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
