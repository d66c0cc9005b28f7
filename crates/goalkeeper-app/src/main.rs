use clap::Parser;
use std::process::ExitCode;

use goalkeeper_infrastructure::config::AppConfig;
use goalkeeper_lib::presentation::cli::{self, Cli};
use goalkeeper_lib::presentation::error::CommandError;
use goalkeeper_lib::presentation::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;

    match goalkeeper_infrastructure::logging::init_logger(config.log_dir.clone(), config.log_level)
    {
        Ok(_) => {
            tracing::info!("🚀 GoalKeeper starting...");
            tracing::info!("📝 File logging initialized at: {}", config.log_dir.display());
        }
        Err(e) => {
            eprintln!("⚠️  Failed to initialize file logging: {}", e);
            eprintln!("   Falling back to console logging only");

            let _ = tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
                )
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true)
                .try_init();
        }
    }

    let state = match AppState::new(config).await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("❌ Failed to initialize app state: {:#}", e);
            return Err(e);
        }
    };

    match cli::run(cli.command, &state).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::warn!("Command failed: {}", err);
            print_error(&err)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_error(err: &CommandError) -> anyhow::Result<()> {
    eprintln!("{}", serde_json::to_string_pretty(err)?);
    Ok(())
}
