use anyhow::Context;
use clap::Parser;

use kit_db::service::KitService;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("klg error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose);

    let config = kit_config::KitConfig::load_with_dotenv()?;
    let db_path = cli
        .db
        .clone()
        .unwrap_or_else(|| config.database.resolve_path());
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }

    tracing::debug!(db = %db_path.display(), "opening database");
    let svc = KitService::new_local(
        db_path
            .to_str()
            .context("database path is not valid UTF-8")?,
    )
    .await?;

    let flags = cli.global_flags(&config);
    match &cli.command {
        cli::Commands::User { action } => commands::user::handle(action, &svc, &flags).await,
        cli::Commands::Asset { action } => commands::asset::handle(action, &svc, &flags).await,
        cli::Commands::History(args) => commands::history::handle(args, &svc, &flags).await,
        cli::Commands::Stats => commands::stats::handle(&svc, &flags).await,
    }
}

fn init_tracing(quiet: bool, verbose: bool) {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("KITLOG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
