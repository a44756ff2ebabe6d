//! capcast CLI entry point

use std::process::ExitCode;

use clap::Parser;

use capcast::cli::{
    app::{cli_config, load_merged_config, run_capture, run_check, run_list, CaptureOptions, EXIT_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    logging::init_logging,
    presenter::Presenter,
};
use capcast::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();
    let store = XdgConfigStore::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Merge config: defaults < file < CLI
    let config = load_merged_config(&store, cli_config(&cli), &presenter).await;
    tracing::debug!(?config, "Effective configuration");

    // Route to appropriate handler
    if cli.test {
        return run_check(&config, presenter).await;
    }

    let kinds = cli.listed_kinds();
    if !kinds.is_empty() {
        return run_list(&config, &kinds, cli.json, presenter).await;
    }

    let options = CaptureOptions {
        output: cli.output,
        dry_run: cli.dry,
    };
    run_capture(config, options, presenter).await
}
