use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use pagescore::{analysis, config::Config, fetcher::Fetcher};
use serde_json::json;
use tokio_util::sync::CancellationToken;

/// Fetch a web page and score its on-page SEO.
#[derive(Parser, Debug)]
#[command(name = "pagescore", version, about)]
struct Cli {
    /// Page to analyze; a bare domain gets https:// prepended
    url: String,

    /// Print the page signals and report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let fetcher = Fetcher::new(config.fetch())?;

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let signals = match fetcher.fetch_with_cancel(&cli.url, &cancel).await {
        Ok(signals) => signals,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };
    let report = analysis::analyze(&signals);

    if cli.json {
        let document = json!({ "data": signals, "report": report });
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        print!("{}", analysis::render::render_text(&signals, &report));
    }

    Ok(ExitCode::SUCCESS)
}
