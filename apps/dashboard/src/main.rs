use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use finboard_dashboard::{snapshot, terminal, ApiClient, App};

/// Live terminal view of income, expenses and budgets.
#[derive(Parser, Debug)]
#[command(name = "finboard-dashboard", version)]
struct Cli {
    /// Base URL of the Finboard API
    #[arg(long, env = "FB_API_URL", default_value = "http://127.0.0.1:8000")]
    api_url: String,

    /// Seconds between refreshes
    #[arg(long, env = "FB_REFRESH_SECS", default_value_t = 5,
          value_parser = clap::value_parser!(u64).range(1..))]
    interval_secs: u64,

    /// Bearer token sent with every request
    #[arg(long, env = "FB_API_TOKEN")]
    token: Option<String>,

    /// Log file; the terminal itself is owned by the dashboard
    #[arg(long, default_value = "finboard-dashboard.log")]
    log_file: PathBuf,

    /// Fetch once, print a text report and exit
    #[arg(long)]
    once: bool,
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let interval = Duration::from_secs(cli.interval_secs);
    // Request timeout tracks the refresh interval, floored at 2s
    let client = ApiClient::new(&cli.api_url, cli.token, interval.max(Duration::from_secs(2)))?;

    if cli.once {
        let snap = client
            .fetch_snapshot()
            .await
            .with_context(|| format!("Failed to load data from {}", client.base_url()))?;
        print!("{}", snapshot::report(&snap));
        return Ok(());
    }

    let mut app = App::new(client.base_url(), cli.interval_secs);
    terminal::run(&client, &mut app, interval).await
}
