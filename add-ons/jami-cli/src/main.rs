//! Jami CLI: collects birth fields, asks the chart service for a Jami Dusu chart, prints it.
//! Run: cargo run -p jami-cli -- --year 1990 --month 6 --day 24 --hour 12 --gender M

mod terminal;

use clap::Parser;
use jami_client::ChartClient;
use jami_core::{init_api_base, ChartCache, ChartOrchestrator, Gender, RawBirthFields};
use std::process::ExitCode;
use std::sync::Arc;
use terminal::TerminalHost;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about = "Jami Dusu chart client")]
struct Cli {
    /// Birth year; unreadable values fall back to 1990
    #[arg(long, default_value = "1990")]
    year: String,

    #[arg(long, default_value = "6")]
    month: String,

    #[arg(long, default_value = "24")]
    day: String,

    /// Hour of birth (0-23)
    #[arg(long, default_value = "12")]
    hour: String,

    /// The date is given in the lunar calendar
    #[arg(long)]
    lunar: bool,

    /// Lunar date falls in a leap month
    #[arg(long, requires = "lunar")]
    intercalation: bool,

    #[arg(long, default_value = "M")]
    gender: Gender,

    /// Service base address; overrides config and API_URL
    #[arg(long)]
    api_url: Option<String>,

    /// Pre-flight: check the service health endpoint and exit
    #[arg(long)]
    verify: bool,

    /// Hide the busy indicator
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn raw_fields(&self) -> RawBirthFields {
        RawBirthFields {
            year: self.year.clone(),
            month: self.month.clone(),
            day: self.day.clone(),
            hour: self.hour.clone(),
            is_lunar: self.lunar,
            is_intercalation: self.intercalation,
            gender: self.gender,
        }
    }
}

async fn run_verify(client: &ChartClient) -> ExitCode {
    print!("Checking {}... ", client.base_url());
    match client.health().await {
        Ok(health) if health.is_ok() => {
            println!("OK");
            ExitCode::SUCCESS
        }
        Ok(health) => {
            println!("UNHEALTHY (status: {})", health.status);
            ExitCode::FAILURE
        }
        Err(e) => {
            println!("FAILED");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("[jami] .env not loaded: {} (using system environment)", e);
        }
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    init_api_base(cli.api_url.as_deref());
    let client = match ChartClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("[jami] could not build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!(target: "jami::cli", base_url = client.base_url(), "Chart client ready");

    if cli.verify {
        return run_verify(&client).await;
    }

    let cache = ChartCache::new();
    let host = Arc::new(TerminalHost::new(cache.clone(), cli.quiet));
    let orchestrator = ChartOrchestrator::new(Arc::new(client), cache).with_host(host);

    match orchestrator.submit(&cli.raw_fields()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
