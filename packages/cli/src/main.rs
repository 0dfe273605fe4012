// Main entry point for the price tracker CLI

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tracker::{
    check_alerts, pipeline, AggregateResult, HttpFetcher, PersistReport, PriceAlert, RunStatus,
    Storage, TrackerConfig,
};

/// Track one product's price across the configured sale sites.
#[derive(Parser)]
#[command(name = "pricewatch", version, about)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Override the product name from the configuration
    #[arg(long)]
    product: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tracker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = TrackerConfig::from_file(&args.config).with_context(|| {
        format!("failed to load configuration from {}", args.config.display())
    })?;
    if let Some(product) = args.product {
        config.product.name = product;
    }

    tracing::info!(
        product = %config.product.name,
        sites = config.sites.len(),
        "price tracker starting"
    );

    let fetcher = Arc::new(HttpFetcher::new(&config.settings));
    let storage = Storage::new(&config.settings.output);

    // Read the previous snapshot before this run replaces it
    let previous = storage.previous_prices();

    let started = Instant::now();
    let result = pipeline::run(fetcher, &config).await;

    let alerts = match &config.settings.alerts {
        Some(alert_config) => check_alerts(alert_config, &previous, &result.quotes),
        None => Vec::new(),
    };

    let report = storage
        .persist(&result)
        .context("failed to persist run results")?;

    print_summary(&result, &alerts, &report, started.elapsed().as_secs_f64());

    // Zero quotes is a reportable condition, not a crash
    if result.status() == RunStatus::Failed {
        std::process::exit(1);
    }
    Ok(())
}

fn print_summary(
    result: &AggregateResult,
    alerts: &[PriceAlert],
    report: &PersistReport,
    elapsed_secs: f64,
) {
    println!();
    println!("{}", format!("Price tracker - {}", result.product).bold());
    println!("{}", "-".repeat(60));

    for quote in &result.quotes {
        println!(
            "{} {}: {} - {}",
            "✔".green(),
            quote.site.bold(),
            truncate(&quote.title, 50),
            quote.price.green().bold()
        );
    }
    for (site, error) in &result.errors {
        println!("{} {}: {}", "✘".red(), site.bold(), error.to_string().red());
    }

    if !alerts.is_empty() {
        println!("{}", "-".repeat(60));
        for alert in alerts {
            println!(
                "{} {}: {} (was €{:.2}, now {})",
                "⚠".yellow(),
                alert.site.bold(),
                alert.reasons.join(", ").yellow(),
                alert.previous_price,
                alert.display_price
            );
        }
    }

    println!("{}", "-".repeat(60));
    let status = match result.status() {
        RunStatus::Complete => "complete".green(),
        RunStatus::Degraded => "degraded".yellow(),
        RunStatus::Failed => "failed".red(),
    };
    println!(
        "Run {}: {}/{} prices collected in {:.2}s",
        status,
        result.successes(),
        result.sites_tracked(),
        elapsed_secs
    );
    println!(
        "Snapshot: {} · history: {} (+{} rows)",
        report.snapshot_path.display(),
        report.history_path.display(),
        report.history_rows
    );
}

/// Clip long product titles for the one-line summary.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let clipped: String = text.chars().take(max_chars).collect();
    format!("{clipped}...")
}
