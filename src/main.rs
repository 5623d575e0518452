// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, set up logging, build the API
//   client and hand the command to `commands::run`.
// - Any failure prints its message to stderr and exits with status 1.

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vault_build_cli::{
    cli::Cli, commands, ApiClient, Config, Context, FileTokenStore, TerminalPrompter,
};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli, config: &Config) -> anyhow::Result<()> {
    let tokens = FileTokenStore::new(config.token_file.clone());
    let api = ApiClient::new(config, Box::new(tokens))?;
    tracing::debug!(base_url = %api.base_url(), "client ready");

    let mut prompter = TerminalPrompter;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut ctx = Context::new(&api, &mut prompter, &mut out);
    commands::run(cli.command, &mut ctx)?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = cli.config();
    init_logging(config.verbose);

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            if config.verbose {
                eprintln!("{:?}", err);
            }
            ExitCode::FAILURE
        }
    }
}
