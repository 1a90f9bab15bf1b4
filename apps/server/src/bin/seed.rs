use clap::Parser;
use finboard_server::{
    build_state,
    config::{Config, LogFormat},
    init_tracing,
    seed::{self, SeedOptions},
};
use rand::thread_rng;

/// Fill a Finboard database with sample categories, transactions and budgets.
#[derive(Parser, Debug)]
#[command(name = "finboard-seed", version)]
struct Cli {
    /// SQLite database file
    #[arg(long, env = "FB_DB_PATH", default_value = "./db/finboard.db")]
    db_path: String,

    /// Number of transactions to generate
    #[arg(long, default_value_t = 60)]
    transactions: usize,

    /// Delete existing categories, transactions and budgets first
    #[arg(long)]
    reset: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(LogFormat::Text);

    let config = Config {
        db_path: cli.db_path,
        // The seeder never issues tokens
        jwt_secret: Some(vec![0u8; 32]),
        ..Config::default()
    };
    let state = build_state(&config).await?;

    let options = SeedOptions {
        transactions: cli.transactions,
        reset: cli.reset,
    };
    let report = seed::run(&state, &options, &mut thread_rng()).await?;

    println!("Seeded {}", state.db_path);
    println!("  Categories:   {}", report.categories.len());
    println!("  Transactions: {}", report.transactions_created);
    println!("  Budgets:      {}", report.budgets_created);
    println!("  Total income:   {:.2}", report.summary.total_income);
    println!("  Total expenses: {:.2}", report.summary.total_expenses);
    println!("  Balance:        {:.2}", report.summary.balance);
    Ok(())
}
