/*
[INPUT]:  CLI arguments, .env file, optional settings file, ALT5_* environment
[OUTPUT]: Smoke test run or single API call with exit status
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags or startup flow
*/

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::EnvFilter;

use alt5_pro_smoke::{Prompter, Settings};

use cli::Cli;
use cli::terminal::ConsolePrompter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let args = Cli::parse();
    init_tracing(&args.log_level)?;

    let mut settings = Settings::load(args.config_path.as_deref()).context("load settings")?;
    args.apply_overrides(&mut settings);
    info!(
        environment = ?settings.environment,
        base_url = settings.base_url(),
        "starting alt5-pro-smoke"
    );

    let prompter: Arc<dyn Prompter> = Arc::new(ConsolePrompter);
    cli::commands::dispatch(&args, &settings, prompter).await
}

fn init_tracing(log_level: &str) -> Result<()> {
    let filter = EnvFilter::try_new(log_level).context("invalid log level")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(())
}
