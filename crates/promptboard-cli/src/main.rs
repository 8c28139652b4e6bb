mod cli;
mod context;
mod handlers;
mod output;

use clap::{CommandFactory, Parser};
use cli::{Cli, Commands};
use context::CliContext;
use promptboard_core::AppConfig;
use promptboard_tui::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Ok(log_path) = std::env::var("PROMPTBOARD_DEBUG_LOG") {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(log_file))
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .init();
    }

    let cli = Cli::parse();
    let config = AppConfig::load();
    let board_path = cli
        .file
        .clone()
        .unwrap_or_else(|| config.effective_board_path());
    let credential_path = cli
        .credential_file
        .clone()
        .unwrap_or_else(|| config.effective_credential_path());

    match cli.command {
        None => {
            let api_base = config
                .api_base
                .clone()
                .unwrap_or_else(|| promptboard_dispatch::DEFAULT_API_BASE.to_string());
            let (mut app, run_rx) = App::load(board_path, credential_path, api_base).await;
            app.run(run_rx).await?;
        }
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "promptboard", &mut std::io::stdout());
        }
        Some(Commands::Card(card_cmd)) => {
            let mut ctx = load_context(&board_path, &credential_path).await;
            handlers::card::handle(&mut ctx, card_cmd.action).await?;
        }
        Some(Commands::Credential(credential_cmd)) => {
            let mut ctx = load_context(&board_path, &credential_path).await;
            handlers::credential::handle(&mut ctx, credential_cmd.action).await?;
        }
    }

    Ok(())
}

async fn load_context(
    board_path: &std::path::Path,
    credential_path: &std::path::Path,
) -> CliContext {
    match CliContext::load(board_path, credential_path).await {
        Ok(ctx) => ctx,
        Err(e) => output::output_error(&e.to_string()),
    }
}
