pub mod auth;
pub mod free_agents;
pub mod leagues;
pub mod output;
pub mod roster;
pub mod teams;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::fetch::DEFAULT_FREE_AGENT_MAX;

#[derive(Parser)]
#[command(
    name = "yfbx",
    version,
    about = "Yahoo Fantasy Basketball CLI - export rosters and free agents to CSV"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON instead of per-player lines
    #[arg(short = 'j', long = "json", global = true, conflicts_with = "table")]
    pub json: bool,

    /// Output as human-readable table instead of per-player lines
    #[arg(short = 't', long = "table", global = true)]
    pub table: bool,

    /// Verbose output (log HTTP requests and token handling)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Token file holding the persisted OAuth2 credential
    #[arg(long, global = true, env = "YFBX_TOKEN_FILE")]
    pub token_file: Option<PathBuf>,

    /// Yahoo application client id
    #[arg(long, global = true, env = "YAHOO_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// Yahoo application client secret
    #[arg(long, global = true, env = "YAHOO_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authorize with Yahoo (opens the approval flow once) and store the token
    Login,

    /// Delete the stored token file
    Logout,

    /// Show authentication status
    Status,

    /// List NBA leagues reachable by the stored credential
    Leagues,

    /// Dump every team's roster in the first league
    Teams {
        /// CSV output path
        #[arg(short, long, default_value = crate::export::ALL_TEAMS_FILE)]
        output: PathBuf,

        /// Roster date (YYYY-MM-DD); defaults to the current roster
        #[arg(long, value_parser = parse_date)]
        date: Option<String>,
    },

    /// Dump free agents of the first league
    FreeAgents {
        /// CSV output path
        #[arg(short, long, default_value = crate::export::FREE_AGENTS_FILE)]
        output: PathBuf,

        /// Maximum players per query
        #[arg(long, default_value_t = DEFAULT_FREE_AGENT_MAX)]
        max: usize,
    },

    /// Dump a single team's roster
    Roster {
        /// Team key, e.g. 466.l.207335.t.2; defaults to the first team of the first league
        #[arg(long, env = "Y_TEAM_KEY")]
        team_key: Option<String>,

        /// Pre-obtained refresh token; skips the token file entirely
        #[arg(long, env = "YAHOO_REFRESH_TOKEN", hide_env_values = true)]
        refresh_token: Option<String>,

        /// Roster date (YYYY-MM-DD); defaults to the current roster
        #[arg(long, value_parser = parse_date)]
        date: Option<String>,

        /// CSV output path
        #[arg(short, long, default_value = crate::export::ROSTER_FILE)]
        output: PathBuf,
    },
}

fn parse_date(s: &str) -> Result<String, String> {
    chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}
