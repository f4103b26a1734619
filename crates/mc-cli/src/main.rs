//! migcheck CLI - structural checks and remote apply for SQL migrations

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::common::ExitCode;
use commands::{apply, check, init, ls, statements};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);

    let result = match &cli.command {
        Commands::Check(args) => check::execute(args, &cli.global).await,
        Commands::Apply(args) => apply::execute(args, &cli.global).await,
        Commands::Statements(args) => statements::execute(args, &cli.global).await,
        Commands::Ls(args) => ls::execute(args, &cli.global).await,
        Commands::Init(args) => init::execute(args).await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => std::process::ExitCode::from(*code),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::ExitCode::FAILURE
            }
        },
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `info` with `--verbose`
fn init_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
