pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod fetch;
pub mod models;
pub mod resolve;

use cli::output::print_error;
use config::{AuthConfig, ClientCredentials, OutputMode, RuntimeConfig};
use error::AppError;
use tracing_subscriber::EnvFilter;

pub async fn run(cli_args: cli::Cli) -> i32 {
    init_logging(cli_args.verbose);

    let config = RuntimeConfig {
        output_mode: if cli_args.json {
            OutputMode::Json
        } else if cli_args.table {
            OutputMode::Table
        } else {
            OutputMode::Text
        },
        verbose: cli_args.verbose,
        auth: AuthConfig::new(
            ClientCredentials::from_parts(cli_args.client_id, cli_args.client_secret),
            cli_args.token_file,
        ),
    };

    let result = dispatch(cli_args.command, &config).await;

    match result {
        Ok(()) => 0,
        Err(err) => {
            print_error(&err);
            err.exit_code()
        }
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the level picked by `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "yfbx=debug" } else { "yfbx=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

async fn dispatch(command: cli::Commands, config: &RuntimeConfig) -> Result<(), AppError> {
    match command {
        cli::Commands::Login => cli::auth::handle_login(config).await,
        cli::Commands::Logout => cli::auth::handle_logout(config).await,
        cli::Commands::Status => cli::auth::handle_status(config).await,
        cli::Commands::Leagues => cli::leagues::handle(config).await,
        cli::Commands::Teams { output, date } => {
            cli::teams::handle(&output, date.as_deref(), config).await
        }
        cli::Commands::FreeAgents { output, max } => {
            cli::free_agents::handle(&output, max, config).await
        }
        cli::Commands::Roster {
            team_key,
            refresh_token,
            date,
            output,
        } => {
            cli::roster::handle(
                team_key.as_deref(),
                refresh_token.as_deref(),
                date.as_deref(),
                &output,
                config,
            )
            .await
        }
    }
}
